//! livedom - Document Object Model Core
//!
//! Arena-backed, mutable DOM tree with live views.
//!
//! Every node lives in a [`DomTree`] arena and is addressed by a [`NodeId`].
//! Parents own their ordered child sequence; the child's parent link is a
//! plain handle back into the arena, so the graph has no ownership cycles.
//! Elements own their attributes through an attribute table, and Attribute
//! nodes never appear in a child sequence.
//!
//! Views such as [`ChildNodes`], [`ElementsByTagName`] and [`NamedNodeMap`]
//! are small `Copy`/`Clone` handles. They hold no nodes, only the root they
//! were created for, and re-read the tree on every call, so a view obtained
//! before a mutation reflects that mutation afterwards.
//!
//! # Threading
//!
//! The tree carries no locks. Mutation needs `&mut DomTree` and views need
//! `&DomTree` for each call; sharing a tree between threads requires the
//! caller to provide mutual exclusion.

mod attributes;
mod document;
mod element;
mod node;
mod node_list;
mod operations;
mod tree;

pub use attributes::NamedNodeMap;
pub use document::Document;
pub use node::{AttrData, ElementData, Node, NodeData, NodeType};
pub use node_list::{ChildNodes, ElementsByTagName, NodeList};
pub use operations::{DomError, DomResult, NodeOperations};
pub use tree::{Descendants, DomTree};

/// Node identifier (index into the tree's arena)
///
/// Identifiers are only meaningful for the [`DomTree`] that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// The Document node of every tree
    pub const ROOT: NodeId = NodeId(0);

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }

    /// Id for arena slot `index`; None past `u32::MAX`
    #[inline]
    pub(crate) fn from_index(index: usize) -> Option<NodeId> {
        u32::try_from(index).ok().map(NodeId)
    }

    /// Raw arena index
    #[inline]
    pub fn as_u32(self) -> u32 {
        self.0
    }
}
