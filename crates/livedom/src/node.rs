//! DOM Node - kinds and per-kind payload
//!
//! A node is a parent link, an ordered child sequence and a payload. The set
//! of kinds is closed, so behaviour that differs per kind is an exhaustive
//! `match` on [`NodeData`] rather than a trait object.

use crate::NodeId;
use crate::attributes::AttrTable;

/// DOM Core node type codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum NodeType {
    Element = 1,
    Attribute = 2,
    Text = 3,
    CdataSection = 4,
    EntityReference = 5,
    Entity = 6,
    ProcessingInstruction = 7,
    Comment = 8,
    Document = 9,
    DocumentType = 10,
    DocumentFragment = 11,
    Notation = 12,
}

impl NodeType {
    /// Numeric `nodeType` value
    #[inline]
    pub fn code(self) -> u16 {
        self as u16
    }
}

/// DOM Node - core structure
#[derive(Debug, Clone)]
pub struct Node {
    /// Parent node (None if detached, the Document, or an Attribute)
    pub(crate) parent: Option<NodeId>,
    /// Ordered children; sibling links are derived from positions here
    pub(crate) children: Vec<NodeId>,
    /// Node-specific data
    pub data: NodeData,
}

impl Node {
    pub(crate) fn new(data: NodeData) -> Self {
        Self {
            parent: None,
            children: Vec::new(),
            data,
        }
    }

    /// Create a new element node
    pub(crate) fn element(tag_name: &str) -> Self {
        Self::new(NodeData::Element(ElementData::new(tag_name)))
    }

    /// Create a new, unowned attribute node
    pub(crate) fn attribute(name: &str, value: &str) -> Self {
        Self::new(NodeData::Attribute(AttrData {
            name: name.to_string(),
            value: value.to_string(),
            owner: None,
        }))
    }

    /// Parent node, if attached
    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Child sequence
    #[inline]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// DOM node type
    pub fn node_type(&self) -> NodeType {
        match self.data {
            NodeData::Document => NodeType::Document,
            NodeData::Element(_) => NodeType::Element,
            NodeData::Attribute(_) => NodeType::Attribute,
            NodeData::Text(_) => NodeType::Text,
            NodeData::Comment(_) => NodeType::Comment,
            NodeData::CdataSection(_) => NodeType::CdataSection,
        }
    }

    /// `nodeName`: tag name, attribute name, or a `#`-prefixed kind name
    pub fn node_name(&self) -> &str {
        match &self.data {
            NodeData::Document => "#document",
            NodeData::Element(e) => &e.tag_name,
            NodeData::Attribute(a) => &a.name,
            NodeData::Text(_) => "#text",
            NodeData::Comment(_) => "#comment",
            NodeData::CdataSection(_) => "#cdata-section",
        }
    }

    /// `nodeValue`: empty for Document and Element
    pub fn node_value(&self) -> &str {
        match &self.data {
            NodeData::Document | NodeData::Element(_) => "",
            NodeData::Attribute(a) => &a.value,
            NodeData::Text(s) | NodeData::Comment(s) | NodeData::CdataSection(s) => s,
        }
    }

    /// Check if this is an element
    #[inline]
    pub fn is_element(&self) -> bool {
        matches!(self.data, NodeData::Element(_))
    }

    /// Check if this is a Text node
    #[inline]
    pub fn is_text(&self) -> bool {
        matches!(self.data, NodeData::Text(_))
    }

    /// Check if this holds character data (Text, Comment, CDATA)
    #[inline]
    pub fn is_character_data(&self) -> bool {
        matches!(
            self.data,
            NodeData::Text(_) | NodeData::Comment(_) | NodeData::CdataSection(_)
        )
    }

    /// Whether this kind may own a child sequence
    #[inline]
    pub(crate) fn accepts_children(&self) -> bool {
        matches!(self.data, NodeData::Document | NodeData::Element(_))
    }

    /// Get element data if this is an element
    #[inline]
    pub fn as_element(&self) -> Option<&ElementData> {
        match &self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    #[inline]
    pub(crate) fn as_element_mut(&mut self) -> Option<&mut ElementData> {
        match &mut self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get attribute data if this is an attribute
    #[inline]
    pub fn as_attr(&self) -> Option<&AttrData> {
        match &self.data {
            NodeData::Attribute(a) => Some(a),
            _ => None,
        }
    }

    #[inline]
    pub(crate) fn as_attr_mut(&mut self) -> Option<&mut AttrData> {
        match &mut self.data {
            NodeData::Attribute(a) => Some(a),
            _ => None,
        }
    }

    /// Character data of Text, Comment and CDATA nodes
    #[inline]
    pub fn as_character_data(&self) -> Option<&str> {
        match &self.data {
            NodeData::Text(s) | NodeData::Comment(s) | NodeData::CdataSection(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    pub(crate) fn as_character_data_mut(&mut self) -> Option<&mut String> {
        match &mut self.data {
            NodeData::Text(s) | NodeData::Comment(s) | NodeData::CdataSection(s) => Some(s),
            _ => None,
        }
    }
}

/// Node-specific data
#[derive(Debug, Clone)]
pub enum NodeData {
    /// Document root
    Document,
    /// Element
    Element(ElementData),
    /// Attribute, reachable only through its owner's attribute table
    Attribute(AttrData),
    /// Text content
    Text(String),
    /// Comment
    Comment(String),
    /// CDATA section
    CdataSection(String),
}

/// Element-specific data
#[derive(Debug, Clone)]
pub struct ElementData {
    pub(crate) tag_name: String,
    pub(crate) attrs: AttrTable,
}

impl ElementData {
    pub(crate) fn new(tag_name: &str) -> Self {
        Self {
            tag_name: tag_name.to_string(),
            attrs: AttrTable::new(),
        }
    }

    /// Tag name
    #[inline]
    pub fn tag_name(&self) -> &str {
        &self.tag_name
    }

    /// Number of attributes
    #[inline]
    pub fn attr_count(&self) -> usize {
        self.attrs.len()
    }

    /// Attribute nodes in table order
    pub fn attr_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.attrs.iter()
    }
}

/// Attribute-specific data
#[derive(Debug, Clone)]
pub struct AttrData {
    pub(crate) name: String,
    pub(crate) value: String,
    /// The element whose table holds this attribute
    pub(crate) owner: Option<NodeId>,
}

impl AttrData {
    /// Attribute name
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Attribute value
    #[inline]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Owning element
    #[inline]
    pub fn owner(&self) -> Option<NodeId> {
        self.owner
    }
}
