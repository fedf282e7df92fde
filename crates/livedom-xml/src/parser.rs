//! XML parser implementation
//!
//! Uses xml5ever's RcDom and replays it into a [`TreeBuilder`].
//! Doctypes and processing instructions are not part of the tree model and
//! are skipped.

use std::io::Read;

use livedom::Document;
use markup5ever_rcdom::{Handle, NodeData as RcNodeData, RcDom};
use xml5ever::driver::{XmlParseOpts, parse_document};
use xml5ever::tendril::TendrilSink;

use crate::{ParseError, TreeBuilder};

/// Parser configuration
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Keep whitespace-only text nodes inside elements. Defaults to `true`.
    pub keep_whitespace_text: bool,
    /// Fail on the first error xml5ever reports instead of recovering.
    /// Defaults to `false`.
    pub strict: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            keep_whitespace_text: true,
            strict: false,
        }
    }
}

/// XML parser
#[derive(Debug, Clone, Default)]
pub struct XmlParser {
    options: ParseOptions,
}

impl XmlParser {
    /// Create a parser with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser with the given options
    pub fn with_options(options: ParseOptions) -> Self {
        Self { options }
    }

    /// Current options
    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Parse an XML string into a Document
    pub fn parse(&self, xml: &str) -> Result<Document, ParseError> {
        self.parse_reader(&mut xml.as_bytes())
    }

    /// Parse UTF-8 XML from a reader
    pub fn parse_reader<R: Read>(&self, reader: &mut R) -> Result<Document, ParseError> {
        tracing::debug!("Parsing XML document");

        let dom = parse_document(RcDom::default(), XmlParseOpts::default())
            .from_utf8()
            .read_from(reader)?;

        {
            let errors = dom.errors.borrow();
            if self.options.strict {
                if let Some(first) = errors.first() {
                    return Err(ParseError::Malformed {
                        message: first.to_string(),
                    });
                }
            }
            for error in errors.iter() {
                tracing::debug!("Recovered from XML error: {}", error);
            }
        }

        let mut builder =
            TreeBuilder::new().keep_whitespace_text(self.options.keep_whitespace_text);
        self.replay(&dom.document, &mut builder)?;
        let document = builder.finish()?;

        tracing::debug!("Parsed {} nodes", document.tree().len());
        Ok(document)
    }

    /// Feed an RcDom node and its subtree to the builder, in document order
    fn replay(&self, handle: &Handle, builder: &mut TreeBuilder) -> Result<(), ParseError> {
        let mut steps = vec![Replay::Enter(handle.clone())];

        while let Some(step) = steps.pop() {
            let handle = match step {
                Replay::Enter(handle) => handle,
                Replay::Exit(tag) => {
                    builder.end_element(&tag)?;
                    continue;
                }
            };
            match &handle.data {
                RcNodeData::Document => {}
                RcNodeData::Element { name, attrs, .. } => {
                    let tag = qualified(name.prefix.as_deref(), &name.local);
                    let attrs: Vec<(String, String)> = attrs
                        .borrow()
                        .iter()
                        .map(|a| {
                            (
                                qualified(a.name.prefix.as_deref(), &a.name.local),
                                a.value.to_string(),
                            )
                        })
                        .collect();

                    builder.start_element(
                        &tag,
                        attrs.iter().map(|(n, v)| (n.as_str(), v.as_str())),
                    )?;
                    steps.push(Replay::Exit(tag));
                }
                RcNodeData::Text { contents } => {
                    builder.text(&contents.borrow())?;
                }
                RcNodeData::Comment { contents } => {
                    builder.comment(contents)?;
                }
                RcNodeData::Doctype { .. } | RcNodeData::ProcessingInstruction { .. } => {
                    tracing::trace!("Skipping doctype or processing instruction");
                }
            }
            steps.extend(handle.children.borrow().iter().rev().cloned().map(Replay::Enter));
        }
        Ok(())
    }
}

/// Pending work while replaying an RcDom
enum Replay {
    Enter(Handle),
    Exit(String),
}

/// `prefix:local`, or just `local` without a prefix
fn qualified(prefix: Option<&str>, local: &str) -> String {
    match prefix {
        Some(prefix) if !prefix.is_empty() => format!("{prefix}:{local}"),
        _ => local.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use livedom::{NodeList, NodeType};

    #[test]
    fn test_parse_simple() {
        let doc = XmlParser::new().parse("<foo><bar/></foo>").unwrap();
        let root = doc.document_element().unwrap();
        assert_eq!(doc.tree().tag_name(root), Some("foo"));
        assert_eq!(doc.tree().child_nodes(root).length(doc.tree()), 1);
    }

    #[test]
    fn test_parse_attributes() {
        let doc = XmlParser::new()
            .parse(r#"<foo a="1" b="x &amp; y"/>"#)
            .unwrap();
        let root = doc.document_element().unwrap();
        assert_eq!(doc.tree().get_attribute(root, "a"), "1");
        assert_eq!(doc.tree().get_attribute(root, "b"), "x & y");
        assert_eq!(doc.tree().attributes(root).unwrap().length(doc.tree()), 2);
    }

    #[test]
    fn test_parse_comment() {
        let doc = XmlParser::new()
            .parse("<parent><foo/><!-- comment is here --><bar/></parent>")
            .unwrap();
        let tree = doc.tree();
        let root = doc.document_element().unwrap();
        assert_eq!(tree.children(root).len(), 3);
        let comment = tree.child_nodes(root).item(tree, 1).unwrap();
        assert_eq!(tree.node_type(comment), Some(NodeType::Comment));
        assert_eq!(tree.node_name(comment), Some("#comment"));
        assert_eq!(tree.node_value(comment), Some(" comment is here "));
    }

    #[test]
    fn test_whitespace_option() {
        let xml = "<a>\n  <b/>\n</a>";
        let kept = XmlParser::new().parse(xml).unwrap();
        let root = kept.document_element().unwrap();
        assert_eq!(kept.tree().children(root).len(), 3);

        let options = ParseOptions {
            keep_whitespace_text: false,
            ..Default::default()
        };
        let dropped = XmlParser::with_options(options).parse(xml).unwrap();
        let root = dropped.document_element().unwrap();
        assert_eq!(dropped.tree().children(root).len(), 1);
    }

    #[test]
    fn test_parse_empty_input() {
        assert!(matches!(
            XmlParser::new().parse(""),
            Err(ParseError::NoRootElement)
        ));
    }

    #[test]
    fn test_parse_reader() {
        let mut input = "<doc>text</doc>".as_bytes();
        let doc = XmlParser::new().parse_reader(&mut input).unwrap();
        let root = doc.document_element().unwrap();
        assert_eq!(doc.tree().text_content(root), "text");
    }

    #[test]
    fn test_qualified_names() {
        assert_eq!(qualified(Some("xml"), "lang"), "xml:lang");
        assert_eq!(qualified(None, "lang"), "lang");
        assert_eq!(qualified(Some(""), "lang"), "lang");
    }
}
