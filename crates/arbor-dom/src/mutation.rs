//! Checked tree mutation.
//!
//! [§ 4.2.3 Mutation algorithms](https://dom.spec.whatwg.org/#mutation-algorithms)
//!
//! Every public mutator validates its arguments first and only then touches
//! the arena, so a failed call leaves the tree unchanged. Inserting a node
//! that already has a parent removes it from that parent first, and inserting
//! a document fragment inserts the fragment's children instead, leaving the
//! fragment empty.

use crate::{DomError, DomTree, NodeId, NodeType};

impl DomTree {
    /// [§ 4.2.3 Ensure pre-insertion validity](https://dom.spec.whatwg.org/#concept-node-ensure-pre-insertion-validity)
    ///
    /// NOTE: The document element count rules of STEP 6 are not enforced;
    /// scratch documents used during parsing rely on that.
    fn ensure_pre_insertion_validity(
        &self,
        node: NodeId,
        parent: NodeId,
        child: Option<NodeId>,
    ) -> Result<(), DomError> {
        self.check(node)?;
        self.check(parent)?;
        if let Some(child) = child {
            self.check(child)?;
        }

        // STEP 1: "If parent is not a Document, DocumentFragment, or Element
        //          node, then throw a "HierarchyRequestError" DOMException."
        let parent_is_document = match self.nodes[parent.0].node_type {
            NodeType::Document => true,
            NodeType::DocumentFragment | NodeType::Element(_) => false,
            _ => {
                return Err(DomError::HierarchyRequest(
                    "parent is not a Document, DocumentFragment, or Element node",
                ));
            }
        };

        // STEP 2: "If node is a host-including inclusive ancestor of parent,
        //          then throw a "HierarchyRequestError" DOMException."
        if self.is_inclusive_ancestor(node, parent) {
            return Err(DomError::HierarchyRequest(
                "node is an inclusive ancestor of parent",
            ));
        }

        // STEP 3: "If child is non-null and its parent is not parent, then
        //          throw a "NotFoundError" DOMException."
        if let Some(child) = child
            && self.parent(child) != Some(parent)
        {
            return Err(DomError::NotFound("child is not a child of parent"));
        }

        // STEP 4: "If node is not a DocumentFragment, DocumentType, Element,
        //          or CharacterData node, then throw a "HierarchyRequestError"
        //          DOMException."
        // STEP 5: "If either node is a Text node and parent is a document, or
        //          node is a doctype and parent is not a document, then throw
        //          a "HierarchyRequestError" DOMException."
        match self.nodes[node.0].node_type {
            NodeType::Document => Err(DomError::HierarchyRequest(
                "a Document cannot be inserted",
            )),
            NodeType::Text(_) if parent_is_document => Err(DomError::HierarchyRequest(
                "a Text node cannot be a child of a Document",
            )),
            NodeType::Doctype(_) if !parent_is_document => Err(DomError::HierarchyRequest(
                "a DocumentType can only be a child of a Document",
            )),
            _ => Ok(()),
        }
    }

    /// [§ 4.2.3 Pre-insert](https://dom.spec.whatwg.org/#concept-node-pre-insert)
    ///
    /// [§ 4.4 insertBefore](https://dom.spec.whatwg.org/#dom-node-insertbefore)
    ///
    /// Inserts `node` into `parent` before `child`, or at the end when `child`
    /// is `None`.
    ///
    /// # Errors
    ///
    /// Returns a [`DomError`] when the insertion would produce an invalid tree
    /// or `child` is not a child of `parent`.
    pub fn insert_before(
        &mut self,
        parent: NodeId,
        node: NodeId,
        child: Option<NodeId>,
    ) -> Result<(), DomError> {
        // STEP 1: "Ensure pre-insertion validity of node into parent before child."
        self.ensure_pre_insertion_validity(node, parent, child)?;

        // STEP 2: "Let referenceChild be child."
        // STEP 3: "If referenceChild is node, then set referenceChild to node's
        //          next sibling."
        let reference = if child == Some(node) {
            self.next_sibling(node)
        } else {
            child
        };

        // STEP 4: "Insert node into parent before referenceChild."
        self.insert(node, parent, reference);
        Ok(())
    }

    /// [§ 4.2.3 Append](https://dom.spec.whatwg.org/#concept-node-append)
    ///
    /// "To append a node to a parent, pre-insert node into parent before null."
    ///
    /// # Errors
    ///
    /// Returns a [`DomError`] when the insertion would produce an invalid tree.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        self.insert_before(parent, child, None)
    }

    /// [§ 4.2.3 Pre-remove](https://dom.spec.whatwg.org/#concept-node-pre-remove)
    ///
    /// STEP 1: "If child's parent is not parent, then throw a "`NotFoundError`"
    ///          `DOMException`."
    /// STEP 2: "Remove child."
    ///
    /// # Errors
    ///
    /// Returns [`DomError::NotFound`] when `child` is not a child of `parent`.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        self.check(parent)?;
        self.check(child)?;
        if self.parent(child) != Some(parent) {
            return Err(DomError::NotFound("child is not a child of parent"));
        }
        self.unlink(child);
        Ok(())
    }

    /// [§ 4.2.3 Replace](https://dom.spec.whatwg.org/#concept-node-replace)
    ///
    /// Puts `node` where `child` was and removes `child`. Replacing a node
    /// with itself leaves the tree unchanged.
    ///
    /// # Errors
    ///
    /// Returns a [`DomError`] under the same conditions as [`Self::insert_before`].
    pub fn replace_child(
        &mut self,
        parent: NodeId,
        node: NodeId,
        child: NodeId,
    ) -> Result<(), DomError> {
        // STEPS 1-6 match pre-insertion validity with child required.
        self.ensure_pre_insertion_validity(node, parent, Some(child))?;

        // STEP 7: "Let referenceChild be child's next sibling."
        // STEP 8: "If referenceChild is node, then set referenceChild to node's
        //          next sibling."
        let mut reference = self.next_sibling(child);
        if reference == Some(node) {
            reference = self.next_sibling(node);
        }

        // STEP 10: "If child's parent is non-null, then remove child."
        self.unlink(child);

        // STEP 13: "Insert node into parent before referenceChild."
        self.insert(node, parent, reference);
        Ok(())
    }

    /// [§ 4.2.3 Replace all](https://dom.spec.whatwg.org/#concept-node-replace-all)
    ///
    /// Removes every child of `parent`, then inserts `node` (if any). This is
    /// what the `innerHTML` setter does with a freshly parsed fragment.
    ///
    /// # Errors
    ///
    /// Returns a [`DomError`] when `node` may not be inserted into `parent`.
    pub fn replace_all(&mut self, parent: NodeId, node: Option<NodeId>) -> Result<(), DomError> {
        self.check(parent)?;
        if let Some(node) = node {
            self.ensure_pre_insertion_validity(node, parent, None)?;
        }

        while let Some(child) = self.last_child(parent) {
            self.unlink(child);
        }
        if let Some(node) = node {
            self.insert(node, parent, None);
        }
        Ok(())
    }

    /// Move all children of `from` to the end of `to`, keeping their order.
    ///
    /// # Errors
    ///
    /// Returns a [`DomError`] if a child may not be inserted into `to`, for
    /// example because `to` is inside one of the children. Children moved
    /// before the failing one stay moved.
    pub fn move_children(&mut self, from: NodeId, to: NodeId) -> Result<(), DomError> {
        self.check(from)?;
        while let Some(child) = self.first_child(from) {
            self.append_child(to, child)?;
        }
        Ok(())
    }

    /// [§ 4.2.3 Remove](https://dom.spec.whatwg.org/#concept-node-remove)
    ///
    /// Detaches `node` from its parent. A node without a parent, or an id
    /// this tree never allocated, is left alone.
    pub fn detach(&mut self, node: NodeId) {
        if self.has_node(node) {
            self.unlink(node);
        }
    }

    fn check(&self, id: NodeId) -> Result<(), DomError> {
        if self.has_node(id) {
            Ok(())
        } else {
            Err(DomError::InvalidNode(id))
        }
    }

    /// [§ 4.2.3 Insert](https://dom.spec.whatwg.org/#concept-node-insert)
    ///
    /// Callers have already validated the arguments.
    fn insert(&mut self, node: NodeId, parent: NodeId, child: Option<NodeId>) {
        // STEP 1: "Let nodes be node's children, if node is a DocumentFragment
        //          node; otherwise « node »."
        // STEP 4: "If node is a DocumentFragment node, then remove its
        //          children."
        let nodes = if self.is_fragment(node) {
            let children = std::mem::take(&mut self.nodes[node.0].children);
            for &id in &children {
                let moved = &mut self.nodes[id.0];
                moved.parent = None;
                moved.prev_sibling = None;
                moved.next_sibling = None;
            }
            children
        } else {
            // [§ 4.2.3 Adopt](https://dom.spec.whatwg.org/#concept-node-adopt)
            // "If node's parent is non-null, then remove node."
            self.unlink(node);
            vec![node]
        };

        // The reference child is located after the removals above, since
        // removing node may have shifted it.
        let mut index = child
            .and_then(|c| self.nodes[parent.0].children.iter().position(|&id| id == c))
            .unwrap_or(self.nodes[parent.0].children.len());

        // STEP 7: "For each node in nodes, in tree order: insert node into
        //          parent's children before child or at the end."
        for id in nodes {
            self.insert_at(parent, index, id);
            index += 1;
        }
    }

    fn insert_at(&mut self, parent: NodeId, index: usize, child: NodeId) {
        self.nodes[parent.0].children.insert(index, child);

        let siblings = &self.nodes[parent.0].children;
        let prev = index.checked_sub(1).map(|i| siblings[i]);
        let next = siblings.get(index + 1).copied();

        let node = &mut self.nodes[child.0];
        node.parent = Some(parent);
        node.prev_sibling = prev;
        node.next_sibling = next;

        if let Some(prev) = prev {
            self.nodes[prev.0].next_sibling = Some(child);
        }
        if let Some(next) = next {
            self.nodes[next.0].prev_sibling = Some(child);
        }
    }

    fn unlink(&mut self, child: NodeId) {
        let Some(parent) = self.nodes[child.0].parent else {
            return;
        };
        let prev = self.nodes[child.0].prev_sibling;
        let next = self.nodes[child.0].next_sibling;

        self.nodes[parent.0].children.retain(|&id| id != child);
        if let Some(prev) = prev {
            self.nodes[prev.0].next_sibling = next;
        }
        if let Some(next) = next {
            self.nodes[next.0].prev_sibling = prev;
        }

        let node = &mut self.nodes[child.0];
        node.parent = None;
        node.prev_sibling = None;
        node.next_sibling = None;
    }
}
