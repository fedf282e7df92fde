//! Document - High-level document API

use crate::node_list::ElementsByTagName;
use crate::{DomError, DomResult, DomTree, NodeId, NodeOperations};

/// DOM Document
///
/// Owns the tree arena. The Document node is [`NodeId::ROOT`]; its single
/// element child, once set, is the document element.
#[derive(Debug, Clone, Default)]
pub struct Document {
    tree: DomTree,
}

impl Document {
    /// Create an empty document with no document element
    pub fn new() -> Self {
        Self { tree: DomTree::new() }
    }

    /// The Document node
    #[inline]
    pub fn node(&self) -> NodeId {
        self.tree.root()
    }

    /// The document element, if one has been set
    pub fn document_element(&self) -> Option<NodeId> {
        self.tree.first_child(self.tree.root())
    }

    /// Install `element` as the document element
    ///
    /// # Errors
    ///
    /// `HierarchyRequest` if a document element is already present or
    /// `element` is not an element; the document is left unchanged.
    pub fn set_document_element(&mut self, element: NodeId) -> DomResult<NodeId> {
        if self.document_element().is_some() {
            return Err(DomError::HierarchyRequest);
        }
        let root = self.tree.root();
        self.tree.append_child(root, element)
    }

    /// Create a detached element
    pub fn create_element(&mut self, tag_name: &str) -> NodeId {
        self.tree.create_element(tag_name)
    }

    /// Create a detached Text node
    pub fn create_text_node(&mut self, data: &str) -> NodeId {
        self.tree.create_text_node(data)
    }

    /// Create a detached Comment node
    pub fn create_comment(&mut self, data: &str) -> NodeId {
        self.tree.create_comment(data)
    }

    /// Create a detached CDATA section
    pub fn create_cdata_section(&mut self, data: &str) -> NodeId {
        self.tree.create_cdata_section(data)
    }

    /// Create an unowned attribute
    pub fn create_attribute(&mut self, name: &str) -> NodeId {
        self.tree.create_attribute(name)
    }

    /// Get element by ID, searching from the document element
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.tree.get_element_by_id(self.document_element()?, id)
    }

    /// Live list of all elements named `name` (`"*"` for all)
    pub fn get_elements_by_tag_name(&self, name: &str) -> ElementsByTagName {
        self.tree.get_elements_by_tag_name(self.tree.root(), name)
    }

    /// Access the DOM tree
    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Access the DOM tree mutably
    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }
}
