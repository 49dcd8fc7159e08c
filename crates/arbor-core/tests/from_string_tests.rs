//! Integration tests for building fragments from markup.

use arbor_core::dom::{DomTree, NodeId};
use arbor_core::html::{FragmentParser, HtmlError};
use arbor_core::{TAG_WRAP, from_string, from_string_with};

/// Helper to parse quietly, so test output stays free of warnings.
fn parse(tree: &mut DomTree, markup: &str) -> NodeId {
    from_string_with(tree, markup, &FragmentParser::new().without_warnings())
        .expect("lenient parse should succeed")
}

fn node_name(tree: &DomTree, id: Option<NodeId>) -> String {
    id.and_then(|id| tree.node_name(id)).unwrap_or_default()
}

#[test]
fn test_single_node_gives_fragment() {
    let mut tree = DomTree::new();
    let fragment = from_string(&mut tree, "<div></div>").unwrap();

    assert_eq!(node_name(&tree, Some(fragment)), "#document-fragment");
    assert_eq!(node_name(&tree, tree.first_child(fragment)), "DIV");
    assert_eq!(tree.parent(fragment), None);
}

#[test]
fn test_tree_round_trips_through_outer_html() {
    let mut tree = DomTree::new();
    let parent = tree.create_element("div");
    let child = tree.create_element("span");
    tree.append_child(parent, child).unwrap();
    let markup = tree.outer_html(parent);

    let fragment = parse(&mut tree, &markup);
    let first = tree.first_child(fragment).unwrap();
    assert_eq!(tree.outer_html(first), markup);
    assert_eq!(markup, "<div><span></span></div>");
}

#[test]
fn test_forest_keeps_top_level_order() {
    let mut tree = DomTree::new();
    let parent = tree.create_element("div");
    let span = tree.create_element("span");
    let div = tree.create_element("div");
    tree.append_child(parent, span).unwrap();
    tree.append_child(parent, div).unwrap();

    let markup = tree.inner_html(parent);
    let fragment = parse(&mut tree, &markup);
    let names: Vec<String> = tree
        .children(fragment)
        .iter()
        .map(|&id| node_name(&tree, Some(id)))
        .collect();
    assert_eq!(names, vec!["SPAN", "DIV"]);
}

#[test]
fn test_wrapped_tags_come_back_unwrapped() {
    for (tag, _) in TAG_WRAP {
        let expected = tag.to_ascii_uppercase();
        let single = format!("<{tag}></{tag}>");
        let mut tree = DomTree::new();

        let fragment = parse(&mut tree, &single);
        assert_eq!(tree.children(fragment).len(), 1, "single <{tag}>");
        assert_eq!(node_name(&tree, tree.first_child(fragment)), expected);

        let double = single.repeat(2);
        let fragment = parse(&mut tree, &double);
        assert_eq!(tree.children(fragment).len(), 2, "double <{tag}>");
        assert_eq!(node_name(&tree, tree.first_child(fragment)), expected);
        assert_eq!(node_name(&tree, tree.last_child(fragment)), expected);

        for &child in tree.children(fragment) {
            assert_eq!(tree.parent(child), Some(fragment), "<{tag}> parent");
        }
    }
}

#[test]
fn test_wrapped_tag_after_leading_text() {
    let mut tree = DomTree::new();
    let fragment = parse(&mut tree, "  <TD>a</TD><td>b</td>");

    // Whitespace is kept as text in a row, the cells are lowercased.
    assert_eq!(tree.inner_html(fragment), "  <td>a</td><td>b</td>");
}

#[test]
fn test_plain_text_gives_single_text_node() {
    let mut tree = DomTree::new();
    let fragment = parse(&mut tree, "just text");

    assert_eq!(tree.children(fragment).len(), 1);
    assert_eq!(tree.text_content(fragment), "just text");
}

#[test]
fn test_empty_markup_gives_empty_fragment() {
    let mut tree = DomTree::new();
    let fragment = parse(&mut tree, "");

    assert!(tree.is_fragment(fragment));
    assert!(tree.children(fragment).is_empty());
}

#[test]
fn test_unwrapped_table_part_is_lost_after_other_markup() {
    // Only the first tag picks the wrapper, so a cell after a div is parsed
    // in a plain container and dropped by the tree builder.
    let mut tree = DomTree::new();
    let fragment = parse(&mut tree, "<div></div><td>x</td>");

    assert_eq!(tree.inner_html(fragment), "<div></div>x");
}

#[test]
fn test_fragment_is_not_connected() {
    let mut tree = DomTree::new();
    let fragment = parse(&mut tree, "<p id=\"p\">x</p>");

    assert!(!tree.is_connected(fragment));
    assert!(tree.children(NodeId::ROOT).is_empty());
    assert_eq!(tree.get_element_by_id("p"), None);
}

#[test]
fn test_strict_parser_rejects_misplaced_cells() {
    let mut tree = DomTree::new();
    let strict = FragmentParser::new().with_strict_mode();

    assert!(from_string_with(&mut tree, "<td></td>", &strict).is_ok());
    let result = from_string_with(&mut tree, "<div></div><td></td>", &strict);
    assert!(matches!(result, Err(HtmlError::Rejected { .. })));
}

#[test]
fn test_svg_names_round_trip_with_case() {
    let mut tree = DomTree::new();
    let markup = "<svg><clipPath></clipPath><foreignObject></foreignObject></svg>";
    let fragment = parse(&mut tree, markup);

    let svg = tree.first_child(fragment).unwrap();
    assert_eq!(tree.outer_html(svg), markup);

    let serialized = tree.outer_html(svg);
    let reparsed = parse(&mut tree, &serialized);
    assert_eq!(tree.inner_html(reparsed), markup);
}

#[test]
fn test_svg_prefixed_attribute_round_trips() {
    let mut tree = DomTree::new();
    let markup = "<svg><a xlink:href=\"#x\"><linearGradient></linearGradient></a></svg>";
    let fragment = parse(&mut tree, markup);

    assert_eq!(tree.inner_html(fragment), markup);
}

/// Helper to count arena nodes, attached or not, that are `tag` elements.
fn count_tag(tree: &DomTree, tag: &str) -> usize {
    (0..tree.len())
        .filter(|&i| tree.as_element(NodeId(i)).is_some_and(|e| e.tag_name == tag))
        .count()
}

#[test]
fn test_wrapped_parse_allocates_one_fragment() {
    let mut tree = DomTree::new();
    let fragment = parse(&mut tree, "<td>x</td>");
    assert_eq!(tree.inner_html(fragment), "<td>x</td>");

    // The cells are parsed straight into the returned fragment; the wrapper
    // chain is built once and stays empty apart from its own nesting.
    let fragments = (0..tree.len()).filter(|&i| tree.is_fragment(NodeId(i))).count();
    assert_eq!(fragments, 1);
    assert_eq!(count_tag(&tree, "table"), 1);
    assert_eq!(count_tag(&tree, "tr"), 1);
    let row = (0..tree.len())
        .map(NodeId)
        .find(|&id| tree.as_element(id).is_some_and(|e| e.tag_name == "tr"))
        .unwrap();
    assert!(tree.children(row).is_empty());
}
