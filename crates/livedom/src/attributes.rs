//! Element Attributes
//!
//! [`AttrTable`] is the per-element storage mapping attribute names to the
//! Attribute nodes the element owns. [`NamedNodeMap`] is the live view over
//! one element's table.

use std::collections::HashMap;

use crate::{DomResult, DomTree, NodeId};

/// Attribute table owned by an element
///
/// Entries keep insertion order; replacing a name keeps its slot.
#[derive(Debug, Clone, Default)]
pub(crate) struct AttrTable {
    entries: Vec<NodeId>,
    by_name: HashMap<String, usize>,
}

impl AttrTable {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn get(&self, name: &str) -> Option<NodeId> {
        self.by_name.get(name).map(|&i| self.entries[i])
    }

    pub(crate) fn item(&self, index: usize) -> Option<NodeId> {
        self.entries.get(index).copied()
    }

    pub(crate) fn contains_node(&self, id: NodeId) -> bool {
        self.entries.contains(&id)
    }

    /// Insert under `name`, returning the entry it displaced
    pub(crate) fn insert(&mut self, name: &str, id: NodeId) -> Option<NodeId> {
        if let Some(&index) = self.by_name.get(name) {
            Some(std::mem::replace(&mut self.entries[index], id))
        } else {
            self.by_name.insert(name.to_string(), self.entries.len());
            self.entries.push(id);
            None
        }
    }

    /// Remove the entry stored under `name`
    pub(crate) fn remove(&mut self, name: &str) -> Option<NodeId> {
        let index = self.by_name.remove(name)?;
        // Update indices for items after removed
        for idx in self.by_name.values_mut() {
            if *idx > index {
                *idx -= 1;
            }
        }
        Some(self.entries.remove(index))
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.entries.iter().copied()
    }
}

/// Live attribute map of one element
///
/// Holds only the element handle; every call reads the element's current
/// attribute table. Enumeration order is table order, which is stable until
/// the table is next mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NamedNodeMap {
    element: NodeId,
}

impl NamedNodeMap {
    pub(crate) fn new(element: NodeId) -> Self {
        Self { element }
    }

    /// The element this map views
    pub fn owner(&self) -> NodeId {
        self.element
    }

    /// Current number of attributes
    pub fn length(&self, tree: &DomTree) -> usize {
        tree.attr_table(self.element).map_or(0, AttrTable::len)
    }

    /// Attribute at `index`, or None when out of range
    pub fn item(&self, tree: &DomTree, index: usize) -> Option<NodeId> {
        tree.attr_table(self.element)?.item(index)
    }

    /// Attribute named `name`
    pub fn get_named_item(&self, tree: &DomTree, name: &str) -> Option<NodeId> {
        tree.get_attribute_node(self.element, name)
    }

    /// Add an unowned attribute, returning the one it replaced
    ///
    /// # Errors
    ///
    /// Same as [`DomTree::set_attribute_node`].
    pub fn set_named_item(&self, tree: &mut DomTree, attr: NodeId) -> DomResult<Option<NodeId>> {
        tree.set_attribute_node(self.element, attr)
    }

    /// Remove the attribute named `name`, returning it
    pub fn remove_named_item(&self, tree: &mut DomTree, name: &str) -> Option<NodeId> {
        let attr = tree.get_attribute_node(self.element, name)?;
        tree.remove_attribute_node(self.element, attr)
    }

    /// Iterate the current attributes
    pub fn iter<'a>(&self, tree: &'a DomTree) -> impl Iterator<Item = NodeId> + 'a {
        tree.attr_table(self.element)
            .into_iter()
            .flat_map(AttrTable::iter)
    }
}
