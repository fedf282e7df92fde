//! DOM Node Operations
//!
//! Core node manipulation: appendChild, removeChild, insertBefore,
//! replaceChild, cloneNode, normalize.
//!
//! Every insertion first detaches the node from wherever it currently sits,
//! so inserting an attached node moves it rather than duplicating it. All
//! checks run before the tree is touched: an operation either applies fully
//! or returns an error with the tree unchanged.

use crate::node::{AttrData, ElementData};
use crate::{DomTree, Node, NodeData, NodeId};

/// Result type for DOM operations
pub type DomResult<T> = Result<T, DomError>;

/// DOM operation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    /// Node is not where the operation expects it
    #[error("Node not found")]
    NotFound,
    /// Structural violation (cycle, second document element, misplaced kind)
    #[error("Hierarchy request error")]
    HierarchyRequest,
    /// Operation does not apply to this kind of node
    #[error("Invalid node type")]
    InvalidNodeType,
    /// Attribute is already owned by an element
    #[error("Attribute already in use by another element")]
    InUseAttribute,
    /// Operation is not supported for this node
    #[error("Operation not supported")]
    NotSupported,
}

/// Node operations trait
pub trait NodeOperations {
    /// Append a child node, moving it from its current parent
    fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId>;

    /// Remove a child node; it stays alive and can be inserted again
    fn remove_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId>;

    /// Insert before a reference node (append when `ref_child` is None)
    fn insert_before(
        &mut self,
        parent: NodeId,
        new_child: NodeId,
        ref_child: Option<NodeId>,
    ) -> DomResult<NodeId>;

    /// Replace a child with another node, returning the old child
    fn replace_child(
        &mut self,
        parent: NodeId,
        new_child: NodeId,
        old_child: NodeId,
    ) -> DomResult<NodeId>;

    /// Clone a node into a new, detached node
    fn clone_node(&mut self, node: NodeId, deep: bool) -> DomResult<NodeId>;

    /// Normalize text nodes (merge adjacent, drop empty)
    fn normalize(&mut self, node: NodeId) -> DomResult<()>;
}

impl DomTree {
    /// Validate inserting `child` under `parent`, optionally in place of
    /// `replacing`
    fn check_insert(
        &self,
        parent: NodeId,
        child: NodeId,
        replacing: Option<NodeId>,
    ) -> DomResult<()> {
        let parent_node = self.node(parent)?;
        let child_node = self.node(child)?;

        if !parent_node.accepts_children() {
            return Err(DomError::HierarchyRequest);
        }
        if matches!(child_node.data, NodeData::Document | NodeData::Attribute(_)) {
            return Err(DomError::HierarchyRequest);
        }
        // child must not be parent or one of its ancestors; a childless node
        // can only be an ancestor of itself
        let cycle = if child_node.children.is_empty() {
            child == parent
        } else {
            self.contains(child, parent)
        };
        if cycle {
            return Err(DomError::HierarchyRequest);
        }
        if matches!(parent_node.data, NodeData::Document) {
            if !child_node.is_element() {
                return Err(DomError::HierarchyRequest);
            }
            let occupied = parent_node
                .children
                .iter()
                .any(|&c| c != child && Some(c) != replacing);
            if occupied {
                return Err(DomError::HierarchyRequest);
            }
        }
        Ok(())
    }

    /// Unlink `child` from its parent's sequence, if it has one
    fn detach(&mut self, child: NodeId) {
        let Some(parent) = self.parent_node(child) else {
            return;
        };
        tracing::trace!(?child, ?parent, "detaching node");
        if let Some(p) = self.get_mut(parent) {
            if let Some(pos) = p.children.iter().position(|&c| c == child) {
                p.children.remove(pos);
            }
        }
        if let Some(c) = self.get_mut(child) {
            c.parent = None;
        }
    }

    fn position_in(&self, parent: NodeId, child: NodeId) -> DomResult<usize> {
        self.children(parent)
            .iter()
            .position(|&c| c == child)
            .ok_or(DomError::NotFound)
    }

    /// Detached copy of one node; elements get fresh copies of their
    /// attributes, children are not copied
    fn clone_shallow(&mut self, node: NodeId) -> DomResult<NodeId> {
        let source = self.node(node)?;
        let data = match &source.data {
            NodeData::Document => return Err(DomError::NotSupported),
            NodeData::Element(e) => NodeData::Element(ElementData::new(&e.tag_name)),
            NodeData::Attribute(a) => NodeData::Attribute(AttrData {
                name: a.name.clone(),
                value: a.value.clone(),
                owner: None,
            }),
            other => other.clone(),
        };
        let attrs: Vec<(String, String)> = source
            .as_element()
            .map(|e| {
                e.attrs
                    .iter()
                    .filter_map(|a| self.get(a).and_then(Node::as_attr))
                    .map(|a| (a.name.clone(), a.value.clone()))
                    .collect()
            })
            .unwrap_or_default();

        let copy = self.alloc(Node::new(data));
        for (name, value) in &attrs {
            self.set_attribute(copy, name, value)?;
        }
        Ok(copy)
    }

    /// Link a detached `child` into `parent` at `index`
    fn attach(&mut self, parent: NodeId, child: NodeId, index: usize) -> DomResult<()> {
        self.node_mut(parent)?.children.insert(index, child);
        self.node_mut(child)?.parent = Some(parent);
        Ok(())
    }
}

impl NodeOperations for DomTree {
    fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId> {
        self.check_insert(parent, child, None)?;
        self.detach(child);
        let end = self.children(parent).len();
        self.attach(parent, child, end)?;
        Ok(child)
    }

    fn remove_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId> {
        self.node(parent)?;
        if self.parent_node(child) != Some(parent) {
            return Err(DomError::NotFound);
        }
        self.detach(child);
        Ok(child)
    }

    fn insert_before(
        &mut self,
        parent: NodeId,
        new_child: NodeId,
        ref_child: Option<NodeId>,
    ) -> DomResult<NodeId> {
        let Some(reference) = ref_child else {
            return self.append_child(parent, new_child);
        };
        if self.parent_node(reference) != Some(parent) {
            return Err(DomError::NotFound);
        }
        self.check_insert(parent, new_child, None)?;
        if new_child == reference {
            return Ok(new_child);
        }
        self.detach(new_child);
        // detaching may have shifted the reference within the same parent
        let index = self.position_in(parent, reference)?;
        self.attach(parent, new_child, index)?;
        Ok(new_child)
    }

    fn replace_child(
        &mut self,
        parent: NodeId,
        new_child: NodeId,
        old_child: NodeId,
    ) -> DomResult<NodeId> {
        if self.parent_node(old_child) != Some(parent) {
            return Err(DomError::NotFound);
        }
        self.check_insert(parent, new_child, Some(old_child))?;
        if new_child == old_child {
            return Ok(old_child);
        }
        self.detach(new_child);
        let index = self.position_in(parent, old_child)?;
        self.node_mut(parent)?.children[index] = new_child;
        self.node_mut(new_child)?.parent = Some(parent);
        self.node_mut(old_child)?.parent = None;
        Ok(old_child)
    }

    fn clone_node(&mut self, node: NodeId, deep: bool) -> DomResult<NodeId> {
        let copy = self.clone_shallow(node)?;
        if !deep {
            return Ok(copy);
        }

        // (source, copy) pairs whose children still need copying
        let mut pending = vec![(node, copy)];
        while let Some((source, target)) = pending.pop() {
            let children = self.node(source)?.children.clone();
            for child in children {
                let child_copy = self.clone_shallow(child)?;
                let end = self.children(target).len();
                self.attach(target, child_copy, end)?;
                pending.push((child, child_copy));
            }
        }
        Ok(copy)
    }

    fn normalize(&mut self, node: NodeId) -> DomResult<()> {
        self.node(node)?;
        let mut pending = vec![node];

        while let Some(current) = pending.pop() {
            let children = self.node(current)?.children.clone();
            let mut kept = Vec::with_capacity(children.len());
            let mut run_start: Option<NodeId> = None;

            for child in children {
                let text = self
                    .get(child)
                    .filter(|n| n.is_text())
                    .and_then(Node::as_character_data)
                    .map(str::to_owned);
                match text {
                    Some(text) => {
                        if text.is_empty() {
                            self.node_mut(child)?.parent = None;
                            continue;
                        }
                        if let Some(first) = run_start {
                            if let Some(data) = self.node_mut(first)?.as_character_data_mut() {
                                data.push_str(&text);
                            }
                            self.node_mut(child)?.parent = None;
                            continue;
                        }
                        run_start = Some(child);
                        kept.push(child);
                    }
                    None => {
                        run_start = None;
                        kept.push(child);
                        pending.push(child);
                    }
                }
            }

            self.node_mut(current)?.children = kept;
        }
        Ok(())
    }
}
