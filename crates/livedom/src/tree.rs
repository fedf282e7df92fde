//! DOM Tree (arena-based allocation)
//!
//! All nodes of a document live in one `Vec<Node>` and refer to each other by
//! [`NodeId`]. Nodes are never freed individually: a detached node keeps its
//! slot so that handles held by callers stay valid, and everything is released
//! when the tree is dropped.

use crate::attributes::AttrTable;
use crate::node_list::ChildNodes;
use crate::{DomError, DomResult, NamedNodeMap, Node, NodeData, NodeId, NodeType};

/// Arena-based DOM tree
#[derive(Debug, Clone)]
pub struct DomTree {
    nodes: Vec<Node>,
}

impl DomTree {
    /// Create a tree holding only the Document node
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(NodeData::Document)],
        }
    }

    /// The Document node
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    pub(crate) fn node(&self, id: NodeId) -> DomResult<&Node> {
        self.get(id).ok_or(DomError::NotFound)
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> DomResult<&mut Node> {
        self.get_mut(id).ok_or(DomError::NotFound)
    }

    /// Number of nodes ever allocated, attached or not
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: the Document node is allocated up front
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Store a new node and hand out its id
    ///
    /// # Panics
    ///
    /// Panics if the arena already holds `u32::MAX + 1` nodes.
    pub(crate) fn alloc(&mut self, node: Node) -> NodeId {
        let Some(id) = NodeId::from_index(self.nodes.len()) else {
            panic!("DomTree arena is full ({} nodes)", self.nodes.len());
        };
        self.nodes.push(node);
        id
    }

    // ------------------------------------------------------------------
    // Factories. Every node starts detached.
    // ------------------------------------------------------------------

    /// Create a detached element
    pub fn create_element(&mut self, tag_name: &str) -> NodeId {
        self.alloc(Node::element(tag_name))
    }

    /// Create a detached Text node
    pub fn create_text_node(&mut self, data: &str) -> NodeId {
        self.alloc(Node::new(NodeData::Text(data.to_string())))
    }

    /// Create a detached Comment node
    pub fn create_comment(&mut self, data: &str) -> NodeId {
        self.alloc(Node::new(NodeData::Comment(data.to_string())))
    }

    /// Create a detached CDATA section
    pub fn create_cdata_section(&mut self, data: &str) -> NodeId {
        self.alloc(Node::new(NodeData::CdataSection(data.to_string())))
    }

    /// Create an unowned attribute with an empty value
    pub fn create_attribute(&mut self, name: &str) -> NodeId {
        self.alloc(Node::attribute(name, ""))
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    /// DOM node type
    pub fn node_type(&self, id: NodeId) -> Option<NodeType> {
        self.get(id).map(Node::node_type)
    }

    /// `nodeName`
    pub fn node_name(&self, id: NodeId) -> Option<&str> {
        self.get(id).map(Node::node_name)
    }

    /// `nodeValue`
    pub fn node_value(&self, id: NodeId) -> Option<&str> {
        self.get(id).map(Node::node_value)
    }

    /// Set `nodeValue` of character data or an attribute
    ///
    /// # Errors
    ///
    /// `InvalidNodeType` for Document and Element nodes, whose value is
    /// always empty.
    pub fn set_node_value(&mut self, id: NodeId, value: &str) -> DomResult<()> {
        let node = self.node_mut(id)?;
        match &mut node.data {
            NodeData::Attribute(a) => a.value = value.to_string(),
            NodeData::Text(s) | NodeData::Comment(s) | NodeData::CdataSection(s) => {
                *s = value.to_string();
            }
            NodeData::Document | NodeData::Element(_) => return Err(DomError::InvalidNodeType),
        }
        Ok(())
    }

    /// Parent of a structural child; None for detached nodes, the Document
    /// and attributes
    pub fn parent_node(&self, id: NodeId) -> Option<NodeId> {
        self.get(id)?.parent
    }

    /// Document that `id` belongs to, attached or not; None for the Document
    /// itself and for unknown ids
    pub fn owner_document(&self, id: NodeId) -> Option<NodeId> {
        let node = self.get(id)?;
        (!matches!(node.data, NodeData::Document)).then_some(NodeId::ROOT)
    }

    /// Live view of `id`'s children
    pub fn child_nodes(&self, id: NodeId) -> ChildNodes {
        ChildNodes::new(id)
    }

    /// Current children of `id`
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(|n| n.children.as_slice()).unwrap_or_default()
    }

    /// Check whether `id` has any children
    pub fn has_child_nodes(&self, id: NodeId) -> bool {
        !self.children(id).is_empty()
    }

    /// First child
    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.children(id).first().copied()
    }

    /// Last child
    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.children(id).last().copied()
    }

    /// Previous sibling, derived from the parent's child sequence
    pub fn previous_sibling(&self, id: NodeId) -> Option<NodeId> {
        let siblings = self.children(self.parent_node(id)?);
        let pos = siblings.iter().position(|&c| c == id)?;
        pos.checked_sub(1).map(|i| siblings[i])
    }

    /// Next sibling, derived from the parent's child sequence
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        let siblings = self.children(self.parent_node(id)?);
        let pos = siblings.iter().position(|&c| c == id)?;
        siblings.get(pos + 1).copied()
    }

    /// Live attribute map for elements, None for every other kind
    pub fn attributes(&self, id: NodeId) -> Option<NamedNodeMap> {
        self.get(id)?.as_element().map(|_| NamedNodeMap::new(id))
    }

    pub(crate) fn attr_table(&self, id: NodeId) -> Option<&AttrTable> {
        self.get(id)?.as_element().map(|e| &e.attrs)
    }

    /// Pre-order walk of `id`'s descendants, `id` itself excluded
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        let mut stack: Vec<NodeId> = self.children(id).to_vec();
        stack.reverse();
        Descendants { tree: self, stack }
    }

    /// Whether `other` is `id` or one of its descendants
    pub fn contains(&self, id: NodeId, other: NodeId) -> bool {
        let mut cursor = Some(other);
        while let Some(current) = cursor {
            if current == id {
                return true;
            }
            cursor = self.parent_node(current);
        }
        false
    }

    // ------------------------------------------------------------------
    // Character data
    // ------------------------------------------------------------------

    /// Data of a Text, Comment or CDATA node
    pub fn data(&self, id: NodeId) -> Option<&str> {
        self.get(id)?.as_character_data()
    }

    /// Replace the data of a Text, Comment or CDATA node
    ///
    /// # Errors
    ///
    /// `InvalidNodeType` if `id` does not hold character data.
    pub fn set_data(&mut self, id: NodeId, data: &str) -> DomResult<()> {
        let content = self
            .node_mut(id)?
            .as_character_data_mut()
            .ok_or(DomError::InvalidNodeType)?;
        *content = data.to_string();
        Ok(())
    }

    /// Length of character data in characters
    pub fn length(&self, id: NodeId) -> Option<usize> {
        self.data(id).map(|d| d.chars().count())
    }

    /// Concatenated Text and CDATA data of the subtree; the value of
    /// attributes and character data nodes
    pub fn text_content(&self, id: NodeId) -> String {
        let Some(node) = self.get(id) else {
            return String::new();
        };
        match &node.data {
            NodeData::Document | NodeData::Element(_) => self
                .descendants(id)
                .filter_map(|d| match &self.nodes[d.index()].data {
                    NodeData::Text(s) | NodeData::CdataSection(s) => Some(s.as_str()),
                    _ => None,
                })
                .collect(),
            _ => node.node_value().to_string(),
        }
    }

    // ------------------------------------------------------------------
    // Attribute nodes
    // ------------------------------------------------------------------

    /// Name of an attribute node
    pub fn attr_name(&self, attr: NodeId) -> Option<&str> {
        self.get(attr)?.as_attr().map(|a| a.name.as_str())
    }

    /// Value of an attribute node
    pub fn attr_value(&self, attr: NodeId) -> Option<&str> {
        self.get(attr)?.as_attr().map(|a| a.value.as_str())
    }

    /// Set the value of an attribute node, owned or not
    ///
    /// # Errors
    ///
    /// `InvalidNodeType` if `attr` is not an attribute.
    pub fn set_attr_value(&mut self, attr: NodeId, value: &str) -> DomResult<()> {
        let data = self.node_mut(attr)?.as_attr_mut().ok_or(DomError::InvalidNodeType)?;
        data.value = value.to_string();
        Ok(())
    }

    /// Element that owns `attr`
    pub fn owner_element(&self, attr: NodeId) -> Option<NodeId> {
        self.get(attr)?.as_attr()?.owner
    }

    // ------------------------------------------------------------------
    // Equality
    // ------------------------------------------------------------------

    /// Structural equality of `id` here and `other_id` in `other`
    ///
    /// Compares kind, name, value, attribute sets (by name and value, order
    /// ignored) and children pairwise.
    pub fn is_equal_node(&self, id: NodeId, other: &DomTree, other_id: NodeId) -> bool {
        let mut pending = vec![(id, other_id)];
        while let Some((left, right)) = pending.pop() {
            let (Some(a), Some(b)) = (self.get(left), other.get(right)) else {
                return false;
            };
            if !self.same_shallow(a, other, b) || a.children.len() != b.children.len() {
                return false;
            }
            pending.extend(a.children.iter().copied().zip(b.children.iter().copied()));
        }
        true
    }

    /// Kind, name, value and attribute set of two nodes, children ignored
    fn same_shallow(&self, a: &Node, other: &DomTree, b: &Node) -> bool {
        if a.node_type() != b.node_type()
            || a.node_name() != b.node_name()
            || a.node_value() != b.node_value()
        {
            return false;
        }
        let (Some(ea), Some(eb)) = (a.as_element(), b.as_element()) else {
            return true;
        };
        ea.attrs.len() == eb.attrs.len()
            && ea.attrs.iter().all(|attr| {
                let Some(data) = self.get(attr).and_then(Node::as_attr) else {
                    return false;
                };
                eb.attrs
                    .get(&data.name)
                    .and_then(|o| other.attr_value(o))
                    .is_some_and(|v| v == data.value)
            })
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Pre-order depth-first iterator over a subtree
///
/// Created by [`DomTree::descendants`].
#[derive(Debug)]
pub struct Descendants<'a> {
    tree: &'a DomTree,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        self.stack.extend(self.tree.children(id).iter().rev());
        Some(id)
    }
}
