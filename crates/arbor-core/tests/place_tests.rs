//! Integration tests for placement and removal.

use quickcheck_macros::quickcheck;
use strum::IntoEnumIterator;

use arbor_core::dom::{DomError, DomTree, NodeId};
use arbor_core::{PlaceError, Position, contains, from_string, place, remove};

fn parent_with_reference(tree: &mut DomTree) -> (NodeId, NodeId) {
    let parent = tree.create_element("div");
    let reference = tree.create_element("div");
    tree.append_child(parent, reference).unwrap();
    (parent, reference)
}

#[test]
fn test_sibling_positions_need_a_parent() {
    let mut tree = DomTree::new();
    let node = tree.create_element("div");
    let reference = tree.create_element("div");

    for position in [Position::After, Position::Before, Position::Replace] {
        assert_eq!(
            place(&mut tree, node, position, reference),
            Err(PlaceError::NoParent { position })
        );
        assert_eq!(tree.parent(node), None);
    }
    for position in [Position::FirstIn, Position::LastIn] {
        assert_eq!(place(&mut tree, node, position, reference), Ok(()));
    }
}

#[test]
fn test_no_parent_error_names_the_position() {
    let err = PlaceError::NoParent {
        position: Position::Replace,
    };
    assert!(err.to_string().contains("Replace"));
    assert!(err.to_string().starts_with("ReferenceError"));
}

#[test]
fn test_place_before() {
    let mut tree = DomTree::new();
    let (parent, reference) = parent_with_reference(&mut tree);
    let node = tree.create_element("div");

    place(&mut tree, node, Position::Before, reference).unwrap();
    assert_eq!(tree.prev_sibling(reference), Some(node));
    assert_eq!(tree.children(parent), &[node, reference]);
}

#[test]
fn test_place_after() {
    let mut tree = DomTree::new();
    let (parent, reference) = parent_with_reference(&mut tree);
    let node = tree.create_element("div");

    place(&mut tree, node, Position::After, reference).unwrap();
    assert_eq!(tree.next_sibling(reference), Some(node));
    assert_eq!(tree.children(parent), &[reference, node]);
}

#[test]
fn test_place_after_middle_child() {
    let mut tree = DomTree::new();
    let (parent, reference) = parent_with_reference(&mut tree);
    let last = tree.create_element("p");
    tree.append_child(parent, last).unwrap();
    let node = tree.create_element("span");

    place(&mut tree, node, Position::After, reference).unwrap();
    assert_eq!(tree.children(parent), &[reference, node, last]);
}

#[test]
fn test_place_replace() {
    let mut tree = DomTree::new();
    let (container, reference) = parent_with_reference(&mut tree);
    let node = tree.create_element("div");

    place(&mut tree, node, Position::Replace, reference).unwrap();
    assert_eq!(tree.first_child(container), Some(node));
    assert_eq!(tree.children(container).len(), 1);
    assert_eq!(tree.parent(reference), None);
}

#[test]
fn test_replace_with_itself_is_a_no_op() {
    let mut tree = DomTree::new();
    let (container, reference) = parent_with_reference(&mut tree);

    place(&mut tree, reference, Position::Replace, reference).unwrap();
    assert_eq!(tree.children(container), &[reference]);
}

fn check_child_end(position: Position, end: fn(&DomTree, NodeId) -> Option<NodeId>) {
    let mut tree = DomTree::new();
    let reference = tree.create_element("div");

    let node = tree.create_element("div");
    place(&mut tree, node, position, reference).unwrap();
    assert_eq!(end(&tree, reference), Some(node), "{position} into empty");
    assert_eq!(tree.children(reference).len(), 1);

    let node = tree.create_element("div");
    place(&mut tree, node, position, reference).unwrap();
    assert_eq!(end(&tree, reference), Some(node), "{position} with children");
    assert_eq!(tree.children(reference).len(), 2);
}

#[test]
fn test_place_first_in() {
    check_child_end(Position::FirstIn, DomTree::first_child);
}

#[test]
fn test_place_last_in() {
    check_child_end(Position::LastIn, DomTree::last_child);
}

#[test]
fn test_place_moves_attached_node() {
    let mut tree = DomTree::new();
    let old_parent = tree.create_element("ul");
    let node = tree.create_element("li");
    tree.append_child(old_parent, node).unwrap();
    let (new_parent, reference) = parent_with_reference(&mut tree);

    place(&mut tree, node, Position::Before, reference).unwrap();
    assert!(tree.children(old_parent).is_empty());
    assert_eq!(tree.children(new_parent), &[node, reference]);
}

#[test]
fn test_place_fragment_inserts_its_children() {
    let mut tree = DomTree::new();
    let fragment = from_string(&mut tree, "<li>a</li><li>b</li>").unwrap();
    let list = tree.create_element("ul");

    place(&mut tree, fragment, Position::LastIn, list).unwrap();
    assert_eq!(tree.inner_html(list), "<li>a</li><li>b</li>");
    assert!(tree.children(fragment).is_empty());
}

#[test]
fn test_place_into_own_descendant_fails() {
    let mut tree = DomTree::new();
    let outer = tree.create_element("div");
    let inner = tree.create_element("div");
    tree.append_child(outer, inner).unwrap();

    let result = place(&mut tree, outer, Position::LastIn, inner);
    assert!(matches!(
        result,
        Err(PlaceError::Dom(DomError::HierarchyRequest(_)))
    ));
    assert_eq!(tree.parent(inner), Some(outer));
    assert!(tree.children(inner).is_empty());
}

#[test]
fn test_remove_parentless_node_is_a_no_op() {
    let mut tree = DomTree::new();
    let node = tree.create_element("div");
    remove(&mut tree, node);
    assert_eq!(tree.parent(node), None);
}

#[test]
fn test_remove_detaches_from_parent() {
    let mut tree = DomTree::new();
    let parent = tree.create_element("div");
    let node = tree.create_element("div");
    let text = tree.create_text("kept");
    tree.append_child(parent, node).unwrap();
    tree.append_child(node, text).unwrap();
    assert_eq!(tree.children(parent).len(), 1);
    assert_eq!(tree.parent(node), Some(parent));

    remove(&mut tree, node);
    assert!(tree.children(parent).is_empty());
    assert_eq!(tree.parent(node), None);
    // The subtree travels with the node.
    assert_eq!(tree.parent(text), Some(node));
}

#[quickcheck]
fn prop_placed_node_is_contained(choice: u8) -> bool {
    let positions: Vec<Position> = Position::iter().collect();
    let position = positions[usize::from(choice) % positions.len()];

    let mut tree = DomTree::new();
    let (parent, reference) = parent_with_reference(&mut tree);
    let node = tree.create_element("span");
    if place(&mut tree, node, position, reference).is_err() {
        return false;
    }

    let host = if position.needs_parent() { parent } else { reference };
    contains(&tree, host, node) && contains(&tree, parent, node)
}

#[quickcheck]
fn prop_remove_clears_containment(depth: u8) -> bool {
    let mut tree = DomTree::new();
    let root = tree.create_element("div");
    let mut leaf = root;
    for _ in 0..(depth % 16) {
        let child = tree.create_element("div");
        tree.append_child(leaf, child).unwrap();
        leaf = child;
    }
    let node = tree.create_element("em");
    tree.append_child(leaf, node).unwrap();

    remove(&mut tree, node);
    tree.parent(node).is_none() && !contains(&tree, root, node) && contains(&tree, node, node)
}
