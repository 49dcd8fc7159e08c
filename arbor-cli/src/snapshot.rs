//! JSON snapshots of a DOM subtree.

use serde::Serialize;

use arbor_dom::{DomTree, NodeId, NodeType};

/// Serializable copy of one node and its subtree.
#[derive(Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NodeSnapshot {
    Document {
        children: Vec<NodeSnapshot>,
    },
    Fragment {
        children: Vec<NodeSnapshot>,
    },
    Doctype {
        name: String,
    },
    Element {
        tag: String,
        attributes: Vec<AttributeSnapshot>,
        children: Vec<NodeSnapshot>,
    },
    Text {
        data: String,
    },
    Comment {
        data: String,
    },
}

/// One attribute, kept in source order.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct AttributeSnapshot {
    pub name: String,
    pub value: String,
}

impl NodeSnapshot {
    /// Capture the subtree rooted at `id`. Unknown ids capture as an empty
    /// fragment.
    #[must_use]
    pub fn capture(tree: &DomTree, id: NodeId) -> Self {
        let children = || {
            tree.children(id)
                .iter()
                .map(|&child| Self::capture(tree, child))
                .collect()
        };
        match tree.get(id).map(|node| &node.node_type) {
            Some(NodeType::Document) => Self::Document {
                children: children(),
            },
            Some(NodeType::DocumentFragment) | None => Self::Fragment {
                children: children(),
            },
            Some(NodeType::Doctype(data)) => Self::Doctype {
                name: data.name.clone(),
            },
            Some(NodeType::Element(data)) => Self::Element {
                tag: data.tag_name.clone(),
                attributes: data
                    .attrs
                    .iter()
                    .map(|a| AttributeSnapshot {
                        name: a.name.clone(),
                        value: a.value.clone(),
                    })
                    .collect(),
                children: children(),
            },
            Some(NodeType::Text(data)) => Self::Text { data: data.clone() },
            Some(NodeType::Comment(data)) => Self::Comment { data: data.clone() },
        }
    }
}

#[cfg(test)]
mod tests {
    use arbor_dom::Attribute;

    use super::*;

    #[test]
    fn test_capture_element_tree() {
        let mut tree = DomTree::new();
        let fragment = tree.create_document_fragment();
        let a = tree.create_element_with_attrs(
            "a",
            vec![Attribute::new("href", "/"), Attribute::new("class", "x")],
        );
        let text = tree.create_text("home");
        tree.append_child(fragment, a).unwrap();
        tree.append_child(a, text).unwrap();

        let json = serde_json::to_value(NodeSnapshot::capture(&tree, fragment)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "type": "fragment",
                "children": [{
                    "type": "element",
                    "tag": "a",
                    "attributes": [
                        {"name": "href", "value": "/"},
                        {"name": "class", "value": "x"}
                    ],
                    "children": [{"type": "text", "data": "home"}]
                }]
            })
        );
    }

    #[test]
    fn test_capture_comment() {
        let mut tree = DomTree::new();
        let comment = tree.create_comment(" c ");
        assert_eq!(
            NodeSnapshot::capture(&tree, comment),
            NodeSnapshot::Comment {
                data: " c ".to_string()
            }
        );
    }
}
