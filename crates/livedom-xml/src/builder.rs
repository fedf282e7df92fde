//! Event-driven tree builder
//!
//! Turns a stream of structural events into a [`Document`]. Nodes are made
//! with the document factories and attached with `append_child` in document
//! order; an element's attributes are set before any of its children arrive.

use livedom::{Document, NodeId, NodeOperations};

use crate::ParseError;

/// Builds a Document from open/close/text/comment events
#[derive(Debug)]
pub struct TreeBuilder {
    document: Document,
    /// Currently open elements, innermost last
    open: Vec<NodeId>,
    keep_whitespace_text: bool,
}

impl TreeBuilder {
    /// Create a builder for an empty document
    pub fn new() -> Self {
        Self {
            document: Document::new(),
            open: Vec::new(),
            keep_whitespace_text: true,
        }
    }

    /// Keep or drop whitespace-only text inside elements
    #[must_use]
    pub fn keep_whitespace_text(mut self, keep: bool) -> Self {
        self.keep_whitespace_text = keep;
        self
    }

    /// Number of currently open elements
    pub fn depth(&self) -> usize {
        self.open.len()
    }

    /// The document built so far
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Open an element with its attributes
    ///
    /// The first top-level element becomes the document element.
    pub fn start_element<'a, I>(&mut self, name: &str, attrs: I) -> Result<NodeId, ParseError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        tracing::trace!("<{}>", name);
        let element = self.document.create_element(name);
        for (attr_name, value) in attrs {
            self.document.tree_mut().set_attribute(element, attr_name, value)?;
        }

        match self.open.last() {
            Some(&parent) => {
                self.document.tree_mut().append_child(parent, element)?;
            }
            None => {
                if self.document.document_element().is_some() {
                    return Err(ParseError::MultipleRoots { tag: name.to_string() });
                }
                self.document.set_document_element(element)?;
            }
        }

        self.open.push(element);
        Ok(element)
    }

    /// Close the innermost open element, which must be named `name`
    pub fn end_element(&mut self, name: &str) -> Result<(), ParseError> {
        tracing::trace!("</{}>", name);
        let unexpected = || ParseError::UnexpectedClose { tag: name.to_string() };
        let &current = self.open.last().ok_or_else(unexpected)?;
        if self.document.tree().tag_name(current) != Some(name) {
            return Err(unexpected());
        }
        self.open.pop();
        Ok(())
    }

    /// Character data
    pub fn text(&mut self, data: &str) -> Result<Option<NodeId>, ParseError> {
        if !self.keep_whitespace_text && is_whitespace(data) {
            return Ok(None);
        }
        let Some(&parent) = self.open.last() else {
            if !is_whitespace(data) {
                tracing::warn!("Dropping text outside the document element");
            }
            return Ok(None);
        };
        let id = self.document.create_text_node(data);
        self.document.tree_mut().append_child(parent, id)?;
        Ok(Some(id))
    }

    /// Comment
    pub fn comment(&mut self, data: &str) -> Result<Option<NodeId>, ParseError> {
        let Some(&parent) = self.open.last() else {
            tracing::warn!("Dropping comment outside the document element");
            return Ok(None);
        };
        let id = self.document.create_comment(data);
        self.document.tree_mut().append_child(parent, id)?;
        Ok(Some(id))
    }

    /// CDATA section
    pub fn cdata(&mut self, data: &str) -> Result<Option<NodeId>, ParseError> {
        let Some(&parent) = self.open.last() else {
            tracing::warn!("Dropping CDATA section outside the document element");
            return Ok(None);
        };
        let id = self.document.create_cdata_section(data);
        self.document.tree_mut().append_child(parent, id)?;
        Ok(Some(id))
    }

    /// Finish building
    ///
    /// Fails if elements are still open or no element was ever opened.
    pub fn finish(self) -> Result<Document, ParseError> {
        if !self.open.is_empty() {
            let tree = self.document.tree();
            let open = self
                .open
                .iter()
                .filter_map(|&id| tree.tag_name(id))
                .map(str::to_owned)
                .collect();
            return Err(ParseError::UnclosedElements { open });
        }
        if self.document.document_element().is_none() {
            return Err(ParseError::NoRootElement);
        }
        Ok(self.document)
    }
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn is_whitespace(data: &str) -> bool {
    data.chars().all(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;
    use livedom::{NodeList, NodeType};

    #[test]
    fn test_build_simple_tree() {
        let mut builder = TreeBuilder::new();
        builder.start_element("parent", [("attr", "val")]).unwrap();
        builder.text("mom").unwrap();
        builder.start_element("foo", []).unwrap();
        assert_eq!(builder.depth(), 2);
        builder.end_element("foo").unwrap();
        builder.comment(" note ").unwrap();
        builder.cdata("<raw>").unwrap();
        builder.end_element("parent").unwrap();
        let doc = builder.finish().unwrap();

        let tree = doc.tree();
        let root = doc.document_element().unwrap();
        assert_eq!(tree.tag_name(root), Some("parent"));
        assert_eq!(tree.get_attribute(root, "attr"), "val");
        let kinds: Vec<_> = tree
            .child_nodes(root)
            .to_vec(tree)
            .into_iter()
            .filter_map(|c| tree.node_type(c))
            .collect();
        assert_eq!(
            kinds,
            [NodeType::Text, NodeType::Element, NodeType::Comment, NodeType::CdataSection]
        );
    }

    #[test]
    fn test_whitespace_handling() {
        let mut builder = TreeBuilder::new().keep_whitespace_text(false);
        builder.text("  \n").unwrap();
        builder.start_element("a", []).unwrap();
        assert_eq!(builder.text("\n  ").unwrap(), None);
        assert!(builder.text(" x ").unwrap().is_some());
        builder.end_element("a").unwrap();
        let doc = builder.finish().unwrap();
        let root = doc.document_element().unwrap();
        assert_eq!(doc.tree().children(root).len(), 1);
    }

    #[test]
    fn test_multiple_roots() {
        let mut builder = TreeBuilder::new();
        builder.start_element("a", []).unwrap();
        builder.end_element("a").unwrap();
        let err = builder.start_element("b", []).unwrap_err();
        assert!(matches!(err, ParseError::MultipleRoots { tag } if tag == "b"));
    }

    #[test]
    fn test_mismatched_close() {
        let mut builder = TreeBuilder::new();
        assert!(matches!(
            builder.end_element("a"),
            Err(ParseError::UnexpectedClose { .. })
        ));
        builder.start_element("a", []).unwrap();
        assert!(matches!(
            builder.end_element("b"),
            Err(ParseError::UnexpectedClose { tag }) if tag == "b"
        ));
    }

    #[test]
    fn test_finish_errors() {
        assert!(matches!(TreeBuilder::new().finish(), Err(ParseError::NoRootElement)));

        let mut builder = TreeBuilder::new();
        builder.start_element("a", []).unwrap();
        builder.start_element("b", []).unwrap();
        match builder.finish() {
            Err(ParseError::UnclosedElements { open }) => assert_eq!(open, ["a", "b"]),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_attribute_keeps_last() {
        let mut builder = TreeBuilder::new();
        builder.start_element("a", [("x", "1"), ("x", "2")]).unwrap();
        builder.end_element("a").unwrap();
        let doc = builder.finish().unwrap();
        let root = doc.document_element().unwrap();
        assert_eq!(doc.tree().get_attribute(root, "x"), "2");
        assert_eq!(doc.tree().attributes(root).unwrap().length(doc.tree()), 1);
    }
}
