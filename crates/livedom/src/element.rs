//! Element attribute ownership and element queries
//!
//! An Attribute node is held by at most one element's table at a time. The
//! owner link on the attribute and the table entry are always updated
//! together, and attaching an attribute that already has an owner is refused
//! before anything is modified.

use crate::node_list::ElementsByTagName;
use crate::{DomError, DomResult, DomTree, Node, NodeId};

impl DomTree {
    /// Tag name of an element
    pub fn tag_name(&self, element: NodeId) -> Option<&str> {
        self.get(element)?.as_element().map(|e| e.tag_name.as_str())
    }

    /// Attribute value, or the empty string when absent
    pub fn get_attribute(&self, element: NodeId, name: &str) -> &str {
        self.get_attribute_node(element, name)
            .and_then(|attr| self.attr_value(attr))
            .unwrap_or("")
    }

    /// Attribute node stored under `name`
    pub fn get_attribute_node(&self, element: NodeId, name: &str) -> Option<NodeId> {
        self.attr_table(element)?.get(name)
    }

    /// Check whether the element has an attribute called `name`
    pub fn has_attribute(&self, element: NodeId, name: &str) -> bool {
        self.get_attribute_node(element, name).is_some()
    }

    /// Set an attribute value
    ///
    /// An existing attribute keeps its node identity and only its value
    /// changes; otherwise a new attribute owned by `element` is created.
    ///
    /// # Errors
    ///
    /// `InvalidNodeType` if `element` is not an element, `NotFound` if it
    /// does not exist.
    pub fn set_attribute(&mut self, element: NodeId, name: &str, value: &str) -> DomResult<()> {
        self.node(element)?.as_element().ok_or(DomError::InvalidNodeType)?;

        if let Some(existing) = self.get_attribute_node(element, name) {
            return self.set_attr_value(existing, value);
        }

        let mut node = Node::attribute(name, value);
        if let Some(data) = node.as_attr_mut() {
            data.owner = Some(element);
        }
        let attr = self.alloc(node);
        if let Some(e) = self.node_mut(element)?.as_element_mut() {
            e.attrs.insert(name, attr);
        }
        Ok(())
    }

    /// Attach an unowned attribute node
    ///
    /// Returns the attribute previously stored under the same name, which
    /// becomes unowned, or None.
    ///
    /// # Errors
    ///
    /// `InUseAttribute` if `attr` already has an owner (including `element`
    /// itself); the table is left untouched. `InvalidNodeType` if `element`
    /// is not an element or `attr` is not an attribute.
    pub fn set_attribute_node(&mut self, element: NodeId, attr: NodeId) -> DomResult<Option<NodeId>> {
        self.node(element)?.as_element().ok_or(DomError::InvalidNodeType)?;
        let data = self.node(attr)?.as_attr().ok_or(DomError::InvalidNodeType)?;
        if data.owner.is_some() {
            return Err(DomError::InUseAttribute);
        }
        let name = data.name.clone();

        let replaced = match self.node_mut(element)?.as_element_mut() {
            Some(e) => e.attrs.insert(&name, attr),
            None => None,
        };
        if let Some(a) = self.node_mut(attr)?.as_attr_mut() {
            a.owner = Some(element);
        }
        if let Some(old) = replaced {
            if let Some(a) = self.node_mut(old)?.as_attr_mut() {
                a.owner = None;
            }
        }
        Ok(replaced)
    }

    /// Remove the attribute called `name`, returning its node
    pub fn remove_attribute(&mut self, element: NodeId, name: &str) -> Option<NodeId> {
        let attr = self.get_attribute_node(element, name)?;
        self.remove_attribute_node(element, attr)
    }

    /// Remove `attr` from the element's table
    ///
    /// The attribute is found by identity, not by name; returns None and
    /// changes nothing when it is not in the table.
    pub fn remove_attribute_node(&mut self, element: NodeId, attr: NodeId) -> Option<NodeId> {
        if !self.attr_table(element)?.contains_node(attr) {
            return None;
        }
        let name = self.attr_name(attr)?.to_string();
        self.get_mut(element)?.as_element_mut()?.attrs.remove(&name);
        if let Some(a) = self.get_mut(attr).and_then(Node::as_attr_mut) {
            a.owner = None;
        }
        Some(attr)
    }

    /// Live list of descendant elements named `name` (`"*"` matches all)
    pub fn get_elements_by_tag_name(&self, root: NodeId, name: &str) -> ElementsByTagName {
        ElementsByTagName::new(root, name)
    }

    /// First element in pre-order, starting at `start` itself, whose `id`
    /// attribute equals `id`
    pub fn get_element_by_id(&self, start: NodeId, id: &str) -> Option<NodeId> {
        std::iter::once(start)
            .chain(self.descendants(start))
            .find(|&n| {
                self.get_attribute_node(n, "id")
                    .and_then(|attr| self.attr_value(attr))
                    == Some(id)
            })
    }
}
