//! Live node lists
//!
//! A list is a handle naming what to look at, not a copy of it. `length` and
//! `item` re-read the tree on each call. [`ElementsByTagName`] walks the
//! whole subtree every time, which keeps it exact after any mutation at the
//! price of O(subtree) per call.

use crate::{DomTree, NodeId};

/// DOM `NodeList`
pub trait NodeList {
    /// Current number of nodes in the list
    fn length(&self, tree: &DomTree) -> usize;

    /// Node at `index`, or None when out of range
    fn item(&self, tree: &DomTree, index: usize) -> Option<NodeId>;

    /// Copy the current contents
    fn to_vec(&self, tree: &DomTree) -> Vec<NodeId> {
        (0..self.length(tree))
            .filter_map(|i| self.item(tree, i))
            .collect()
    }
}

/// Live list of a node's children
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChildNodes {
    parent: NodeId,
}

impl ChildNodes {
    pub(crate) fn new(parent: NodeId) -> Self {
        Self { parent }
    }

    /// The node whose children this list shows
    pub fn parent(&self) -> NodeId {
        self.parent
    }
}

impl NodeList for ChildNodes {
    fn length(&self, tree: &DomTree) -> usize {
        tree.children(self.parent).len()
    }

    fn item(&self, tree: &DomTree, index: usize) -> Option<NodeId> {
        tree.children(self.parent).get(index).copied()
    }

    fn to_vec(&self, tree: &DomTree) -> Vec<NodeId> {
        tree.children(self.parent).to_vec()
    }
}

/// Tag filter of an [`ElementsByTagName`] list
#[derive(Debug, Clone, PartialEq, Eq)]
enum TagFilter {
    Any,
    Name(String),
}

/// Live list of descendant elements with a given tag name
///
/// The root itself is never part of the list. Matching is exact
/// (case-sensitive); `"*"` matches every element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementsByTagName {
    root: NodeId,
    filter: TagFilter,
}

impl ElementsByTagName {
    pub(crate) fn new(root: NodeId, name: &str) -> Self {
        let filter = if name == "*" {
            TagFilter::Any
        } else {
            TagFilter::Name(name.to_string())
        };
        Self { root, filter }
    }

    /// The node whose descendants are searched
    pub fn root(&self) -> NodeId {
        self.root
    }

    fn matches(&self, tree: &DomTree, id: NodeId) -> bool {
        match tree.tag_name(id) {
            None => false,
            Some(tag) => match &self.filter {
                TagFilter::Any => true,
                TagFilter::Name(name) => tag == name,
            },
        }
    }

    /// Iterate the matching elements in document order
    pub fn iter<'a>(&'a self, tree: &'a DomTree) -> impl Iterator<Item = NodeId> + 'a {
        tree.descendants(self.root)
            .filter(move |&id| self.matches(tree, id))
    }
}

impl NodeList for ElementsByTagName {
    fn length(&self, tree: &DomTree) -> usize {
        self.iter(tree).count()
    }

    fn item(&self, tree: &DomTree, index: usize) -> Option<NodeId> {
        self.iter(tree).nth(index)
    }

    fn to_vec(&self, tree: &DomTree) -> Vec<NodeId> {
        self.iter(tree).collect()
    }
}
