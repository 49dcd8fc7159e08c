//! Tree dumps for debugging and the CLI.

use arbor_dom::{DomTree, NodeId, NodeType};

/// Print a DOM tree for debugging.
pub fn print_tree(tree: &DomTree, id: NodeId, indent: usize) {
    print!("{}", format_tree(tree, id, indent));
}

/// Render the subtree at `id` as an indented outline, one node per line.
#[must_use]
pub fn format_tree(tree: &DomTree, id: NodeId, indent: usize) -> String {
    let mut out = String::new();
    write_node(tree, id, indent, &mut out);
    out
}

fn write_node(tree: &DomTree, id: NodeId, indent: usize, out: &mut String) {
    let Some(node) = tree.get(id) else {
        return;
    };
    out.push_str(&"  ".repeat(indent));
    out.push_str(&describe(&node.node_type));
    out.push('\n');
    for &child_id in tree.children(id) {
        write_node(tree, child_id, indent + 1, out);
    }
}

/// One-line label for a node, without indentation.
fn describe(node_type: &NodeType) -> String {
    match node_type {
        NodeType::Document => "Document".to_string(),
        NodeType::DocumentFragment => "DocumentFragment".to_string(),
        NodeType::Doctype(data) => format!("<!DOCTYPE {}>", data.name),
        NodeType::Element(data) if data.attrs.is_empty() => format!("<{}>", data.tag_name),
        NodeType::Element(data) => {
            let attrs: Vec<String> = data
                .attrs
                .iter()
                .map(|a| {
                    if a.value.is_empty() {
                        a.name.clone()
                    } else {
                        format!("{}=\"{}\"", a.name, a.value)
                    }
                })
                .collect();
            format!("<{} {}>", data.tag_name, attrs.join(" "))
        }
        NodeType::Text(data) => {
            let display = data.replace('\n', "\\n").replace(' ', "\u{00B7}");
            format!("\"{display}\"")
        }
        NodeType::Comment(data) => format!("<!-- {data} -->"),
    }
}
