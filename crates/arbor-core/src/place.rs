//! Position-based placement and removal.

use strum_macros::{Display, EnumIter, EnumString};

use arbor_dom::{DomTree, NodeId};

use crate::error::PlaceError;

/// Where [`place`] puts a node relative to its reference node.
///
/// Parses case-insensitively from the variant name, so `"firstin"` and
/// `"FirstIn"` both give [`Position::FirstIn`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(ascii_case_insensitive)]
pub enum Position {
    /// Immediately before the reference, as its previous sibling.
    Before,
    /// Immediately after the reference, as its next sibling.
    After,
    /// In the reference's slot; the reference is detached.
    Replace,
    /// As the reference's first child.
    FirstIn,
    /// As the reference's last child.
    LastIn,
}

impl Position {
    /// Whether the position is relative to the reference's parent, so that a
    /// parentless reference cannot be used.
    #[must_use]
    pub const fn needs_parent(self) -> bool {
        matches!(self, Self::Before | Self::After | Self::Replace)
    }
}

/// Insert `node` at `position` relative to `reference`.
///
/// `node` is detached from wherever it currently is first, and a
/// [`NodeType::DocumentFragment`](arbor_dom::NodeType::DocumentFragment)
/// contributes its children instead of itself, leaving it empty.
///
/// # Errors
///
/// - [`PlaceError::NoParent`] for `Before`, `After` or `Replace` when
///   `reference` has no parent. The tree is unchanged.
/// - [`PlaceError::Dom`] when the tree refuses the insertion, for example
///   placing a node inside itself. The tree is unchanged.
pub fn place(
    tree: &mut DomTree,
    node: NodeId,
    position: Position,
    reference: NodeId,
) -> Result<(), PlaceError> {
    let parent = tree
        .parent(reference)
        .ok_or(PlaceError::NoParent { position });

    match position {
        Position::Before => tree.insert_before(parent?, node, Some(reference))?,
        Position::After => {
            let next = tree.next_sibling(reference);
            tree.insert_before(parent?, node, next)?;
        }
        Position::Replace => tree.replace_child(parent?, node, reference)?,
        Position::FirstIn => {
            let first = tree.first_child(reference);
            tree.insert_before(reference, node, first)?;
        }
        Position::LastIn => tree.append_child(reference, node)?,
    }
    Ok(())
}

/// Detach `node` from its parent. Nodes without a parent are left alone.
///
/// The node keeps its subtree and can be placed again later.
pub fn remove(tree: &mut DomTree, node: NodeId) {
    tree.detach(node);
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn test_position_parses_case_insensitively() {
        assert_eq!(Position::from_str("firstin"), Ok(Position::FirstIn));
        assert_eq!(Position::from_str("LASTIN"), Ok(Position::LastIn));
        assert_eq!(Position::from_str("Before"), Ok(Position::Before));
        assert!(Position::from_str("inside").is_err());
    }

    #[test]
    fn test_position_display_round_trips() {
        for position in Position::iter() {
            assert_eq!(Position::from_str(&position.to_string()), Ok(position));
        }
    }

    #[test]
    fn test_only_sibling_positions_need_a_parent() {
        let needing: Vec<Position> = Position::iter().filter(|p| p.needs_parent()).collect();
        assert_eq!(
            needing,
            vec![Position::Before, Position::After, Position::Replace]
        );
    }
}
