//! html5ever `TreeSink` that builds straight into an existing [`DomTree`].
//!
//! The sink borrows the caller's tree for the duration of one parse. Nodes
//! html5ever creates are ordinary arena nodes, so once the parse finishes the
//! caller can move them anywhere without copying.

use std::borrow::Cow;
use std::cell::RefCell;

use html5ever::tendril::StrTendril;
use html5ever::tree_builder::{ElementFlags, NodeOrText, QuirksMode, TreeSink};
use html5ever::{Attribute as Html5Attribute, QualName};

use arbor_dom::{Attribute, DoctypeData, DomError, DomTree, NodeId, NodeType};

/// Handle used by html5ever to reference nodes.
///
/// Element handles carry their qualified name because html5ever asks for it
/// by reference, and the arena sits behind a `RefCell`.
#[derive(Debug, Clone)]
pub struct SinkHandle {
    id: NodeId,
    name: Option<QualName>,
}

impl SinkHandle {
    pub(crate) const fn element(id: NodeId, name: QualName) -> Self {
        Self {
            id,
            name: Some(name),
        }
    }

    const fn node(id: NodeId) -> Self {
        Self { id, name: None }
    }
}

/// `TreeSink` implementation over a borrowed `DomTree`.
///
/// Uses interior mutability (`RefCell`) because html5ever's `TreeSink` trait
/// requires methods to take `&self` but we need to mutate the DOM.
pub(crate) struct DomSink<'t> {
    tree: RefCell<&'t mut DomTree>,
    /// Scratch document the tree builder hangs its root `html` element on.
    document: NodeId,
    errors: RefCell<Vec<Cow<'static, str>>>,
}

impl<'t> DomSink<'t> {
    pub(crate) fn new(tree: &'t mut DomTree) -> Self {
        let document = tree.alloc(NodeType::Document);
        Self {
            tree: RefCell::new(tree),
            document,
            errors: RefCell::new(Vec::new()),
        }
    }

    /// Consume the sink, returning the scratch document and the parse errors.
    pub(crate) fn into_parts(self) -> (NodeId, Vec<Cow<'static, str>>) {
        (self.document, self.errors.into_inner())
    }

    fn record(&self, result: Result<(), DomError>) {
        if let Err(err) = result {
            self.errors
                .borrow_mut()
                .push(Cow::Owned(format!("tree construction: {err}")));
        }
    }

    /// Append text to `parent`, merging into a trailing text node.
    fn append_text(&self, parent: NodeId, text: &str) {
        let mut tree = self.tree.borrow_mut();
        if let Some(last) = tree.last_child(parent)
            && let Some(NodeType::Text(existing)) = tree.get_mut(last).map(|n| &mut n.node_type)
        {
            existing.push_str(text);
            return;
        }
        let node = tree.create_text(text);
        let result = tree.append_child(parent, node);
        drop(tree);
        self.record(result);
    }
}

/// Attribute names are stored flat, with any prefix kept as `prefix:local`.
fn attribute_name(name: &QualName) -> String {
    match &name.prefix {
        Some(prefix) => format!("{prefix}:{}", name.local),
        None => name.local.to_string(),
    }
}

impl TreeSink for DomSink<'_> {
    type Handle = SinkHandle;
    type Output = Self;
    type ElemName<'a>
        = &'a QualName
    where
        Self: 'a;

    fn finish(self) -> Self::Output {
        self
    }

    fn parse_error(&self, msg: Cow<'static, str>) {
        self.errors.borrow_mut().push(msg);
    }

    fn get_document(&self) -> Self::Handle {
        SinkHandle::node(self.document)
    }

    fn elem_name<'a>(&'a self, target: &'a Self::Handle) -> Self::ElemName<'a> {
        static EMPTY: QualName = QualName {
            prefix: None,
            ns: html5ever::ns!(),
            local: html5ever::local_name!(""),
        };
        target.name.as_ref().unwrap_or(&EMPTY)
    }

    fn create_element(
        &self,
        name: QualName,
        attrs: Vec<Html5Attribute>,
        _flags: ElementFlags,
    ) -> Self::Handle {
        let converted: Vec<Attribute> = attrs
            .into_iter()
            .map(|a| Attribute::new(attribute_name(&a.name), a.value.to_string()))
            .collect();

        let id = self
            .tree
            .borrow_mut()
            .create_parsed_element(name.local.to_string(), converted);
        SinkHandle::element(id, name)
    }

    fn create_comment(&self, text: StrTendril) -> Self::Handle {
        SinkHandle::node(self.tree.borrow_mut().create_comment(text.to_string()))
    }

    fn create_pi(&self, target: StrTendril, data: StrTendril) -> Self::Handle {
        // HTML has no processing instructions; keep the text as a comment.
        let text = format!("?{target} {data}");
        SinkHandle::node(self.tree.borrow_mut().create_comment(text))
    }

    fn append(&self, parent: &Self::Handle, child: NodeOrText<Self::Handle>) {
        match child {
            NodeOrText::AppendNode(node) => {
                let result = self.tree.borrow_mut().append_child(parent.id, node.id);
                self.record(result);
            }
            NodeOrText::AppendText(text) => self.append_text(parent.id, &text),
        }
    }

    fn append_based_on_parent_node(
        &self,
        element: &Self::Handle,
        prev_element: &Self::Handle,
        child: NodeOrText<Self::Handle>,
    ) {
        // Foster parenting: go before the table when it is attached,
        // otherwise into the previous element on the stack.
        let has_parent = self.tree.borrow().parent(element.id).is_some();
        if has_parent {
            self.append_before_sibling(element, child);
        } else {
            self.append(prev_element, child);
        }
    }

    fn append_doctype_to_document(
        &self,
        name: StrTendril,
        public_id: StrTendril,
        system_id: StrTendril,
    ) {
        let mut tree = self.tree.borrow_mut();
        let doctype = tree.create_doctype(DoctypeData {
            name: name.to_string(),
            public_id: public_id.to_string(),
            system_id: system_id.to_string(),
        });
        let result = tree.append_child(self.document, doctype);
        drop(tree);
        self.record(result);
    }

    fn get_template_contents(&self, target: &Self::Handle) -> Self::Handle {
        // Template contents live directly under the template element.
        target.clone()
    }

    fn same_node(&self, x: &Self::Handle, y: &Self::Handle) -> bool {
        x.id == y.id
    }

    fn set_quirks_mode(&self, _mode: QuirksMode) {}

    fn append_before_sibling(&self, sibling: &Self::Handle, new_node: NodeOrText<Self::Handle>) {
        let mut tree = self.tree.borrow_mut();
        let Some(parent) = tree.parent(sibling.id) else {
            return;
        };

        let node = match new_node {
            NodeOrText::AppendNode(node) => node.id,
            NodeOrText::AppendText(text) => {
                if let Some(prev) = tree.prev_sibling(sibling.id)
                    && let Some(NodeType::Text(existing)) =
                        tree.get_mut(prev).map(|n| &mut n.node_type)
                {
                    existing.push_str(&text);
                    return;
                }
                tree.create_text(text.to_string())
            }
        };
        let result = tree.insert_before(parent, node, Some(sibling.id));
        drop(tree);
        self.record(result);
    }

    fn add_attrs_if_missing(&self, target: &Self::Handle, attrs: Vec<Html5Attribute>) {
        let mut tree = self.tree.borrow_mut();
        if let Some(element) = tree.as_element_mut(target.id) {
            for attr in attrs {
                let name = attribute_name(&attr.name);
                if element.attr(&name).is_none() {
                    element.attrs.push(Attribute::new(name, attr.value.to_string()));
                }
            }
        }
    }

    fn remove_from_parent(&self, target: &Self::Handle) {
        self.tree.borrow_mut().detach(target.id);
    }

    fn reparent_children(&self, node: &Self::Handle, new_parent: &Self::Handle) {
        let result = self.tree.borrow_mut().move_children(node.id, new_parent.id);
        self.record(result);
    }
}
