//! Integration tests for context-scoped fragment parsing.

use arbor_dom::{DomTree, NodeId};
use arbor_html::{FragmentParser, HtmlError};

/// Helper to parse `markup` in a fresh `<context>` element.
fn parse_in(tree: &mut DomTree, context: &str, markup: &str) -> NodeId {
    let element = tree.create_element(context);
    FragmentParser::new()
        .without_warnings()
        .parse(tree, element, markup)
        .expect("lenient parse should succeed")
}

/// Helper to collect the tag names of a node's element children.
fn child_tags(tree: &DomTree, id: NodeId) -> Vec<String> {
    tree.children(id)
        .iter()
        .filter_map(|&child| tree.as_element(child))
        .map(|e| e.tag_name.clone())
        .collect()
}

#[test]
fn test_plain_markup_in_div_context() {
    let mut tree = DomTree::new();
    let fragment = parse_in(&mut tree, "div", "<p>one</p><!-- two --><span>three</span>");

    assert_eq!(
        tree.inner_html(fragment),
        "<p>one</p><!-- two --><span>three</span>"
    );
    assert!(tree.children(fragment).iter().all(|&c| tree.parent(c) == Some(fragment)));
}

#[test]
fn test_table_cell_is_dropped_in_div_context() {
    let mut tree = DomTree::new();
    let div = tree.create_element("div");
    let (fragment, issues) = FragmentParser::new()
        .without_warnings()
        .parse_with_issues(&mut tree, div, "<td>x</td>")
        .unwrap();

    // "in body" ignores the cell tags and keeps only the text.
    assert_eq!(tree.inner_html(fragment), "x");
    assert!(!issues.is_empty());
    assert!(issues.iter().all(|issue| issue.context == "div"));
}

#[test]
fn test_table_cell_survives_in_row_context() {
    let mut tree = DomTree::new();
    let fragment = parse_in(&mut tree, "tr", "<td>x</td><td>y</td>");

    assert_eq!(child_tags(&tree, fragment), vec!["td", "td"]);
    assert_eq!(tree.inner_html(fragment), "<td>x</td><td>y</td>");
}

#[test]
fn test_row_context_parses_cleanly() {
    let mut tree = DomTree::new();
    let tr = tree.create_element("tr");
    let (_, issues) = FragmentParser::new()
        .with_strict_mode()
        .parse_with_issues(&mut tree, tr, "<td></td>")
        .unwrap();
    assert!(issues.is_empty());
}

#[test]
fn test_columns_in_colgroup_context() {
    let mut tree = DomTree::new();
    let fragment = parse_in(&mut tree, "colgroup", "<col><col span=\"2\">");

    assert_eq!(child_tags(&tree, fragment), vec!["col", "col"]);
    assert_eq!(tree.inner_html(fragment), "<col><col span=\"2\">");
}

#[test]
fn test_options_in_select_context() {
    let mut tree = DomTree::new();
    let fragment = parse_in(&mut tree, "select", "<option>a</option><option>b</option>");

    assert_eq!(child_tags(&tree, fragment), vec!["option", "option"]);
}

#[test]
fn test_strict_mode_rejects_recovered_errors() {
    let mut tree = DomTree::new();
    let div = tree.create_element("div");
    let result = FragmentParser::new()
        .with_strict_mode()
        .parse(&mut tree, div, "<td>x</td>");

    match result {
        Err(HtmlError::Rejected { context, issues }) => {
            assert_eq!(context, "div");
            assert!(!issues.is_empty());
        }
        other => panic!("expected rejection, got {other:?}"),
    }
    assert!(tree.children(div).is_empty());
}

#[test]
fn test_set_inner_html_replaces_children() {
    let mut tree = DomTree::new();
    let div = tree.create_element("div");
    let old = tree.create_element("em");
    tree.append_child(div, old).unwrap();

    FragmentParser::new()
        .set_inner_html(&mut tree, div, "<span>a</span>b")
        .unwrap();

    assert_eq!(tree.inner_html(div), "<span>a</span>b");
    assert_eq!(tree.parent(old), None);
}

#[test]
fn test_attributes_round_trip_in_order() {
    let mut tree = DomTree::new();
    let markup = "<a href=\"/x?a=1&amp;b=2\" class=\"c d\" title=\"&quot;q&quot;\">t</a>";
    let fragment = parse_in(&mut tree, "div", markup);

    let first = tree.first_child(fragment).unwrap();
    assert_eq!(tree.outer_html(first), markup);
    assert_eq!(tree.as_element(first).unwrap().attr("href"), Some("/x?a=1&b=2"));
}

#[test]
fn test_scratch_nodes_are_not_connected() {
    let mut tree = DomTree::new();
    let fragment = parse_in(&mut tree, "div", "<p id=\"p\"></p>");

    assert!(!tree.is_connected(fragment));
    assert_eq!(tree.get_element_by_id("p"), None);
    assert!(tree.children(NodeId::ROOT).is_empty());
}
