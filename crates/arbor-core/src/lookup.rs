//! Lookup and ancestry tests.

use arbor_dom::{DomTree, NodeId};

/// Find the element in the document whose id attribute is `id`.
///
/// Only nodes connected to the document are searched. `None` is an ordinary
/// answer, not an error.
#[must_use]
pub fn by_id(tree: &DomTree, id: &str) -> Option<NodeId> {
    tree.get_element_by_id(id)
}

/// Whether `ancestor` is `candidate` itself or one of its ancestors.
///
/// Text and comment nodes take part like elements do.
#[must_use]
pub fn contains(tree: &DomTree, ancestor: NodeId, candidate: NodeId) -> bool {
    tree.is_inclusive_ancestor(ancestor, candidate)
}
