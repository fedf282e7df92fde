//! XML serializer
//!
//! Writes a tree back to XML text by walking it read-only. Reparsing the
//! output of [`serialize`] yields an equal tree (same kinds, names, values,
//! attribute sets and structure); exact formatting is not preserved.

use livedom::{Document, DomTree, Node, NodeData, NodeId};

/// Options controlling XML serialization output
#[derive(Debug, Clone)]
pub struct SerializeOptions {
    /// Emit an `<?xml ...?>` declaration. Defaults to `false`.
    pub xml_declaration: bool,
    /// Indent element-only content. Mixed content is never indented.
    /// Defaults to `false`.
    pub indent: bool,
    /// Indentation per level when `indent` is set. Defaults to two spaces.
    pub indent_str: String,
}

impl Default for SerializeOptions {
    fn default() -> Self {
        Self {
            xml_declaration: false,
            indent: false,
            indent_str: "  ".to_string(),
        }
    }
}

impl SerializeOptions {
    /// Enable or disable the XML declaration
    #[must_use]
    pub fn xml_declaration(mut self, enabled: bool) -> Self {
        self.xml_declaration = enabled;
        self
    }

    /// Enable or disable indentation
    #[must_use]
    pub fn indent(mut self, indent: bool) -> Self {
        self.indent = indent;
        self
    }

    /// Set the indentation string
    #[must_use]
    pub fn indent_str(mut self, s: &str) -> Self {
        self.indent_str = s.to_string();
        self
    }
}

/// Serialize a document with default options
pub fn serialize(doc: &Document) -> String {
    serialize_with_options(doc, &SerializeOptions::default())
}

/// Serialize a document
pub fn serialize_with_options(doc: &Document, options: &SerializeOptions) -> String {
    let mut out = String::new();
    if options.xml_declaration {
        out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>");
        if options.indent {
            out.push('\n');
        }
    }
    write_node(&mut out, doc.tree(), doc.node(), options, 0);
    if options.indent && !out.ends_with('\n') {
        out.push('\n');
    }
    out
}

/// Serialize a single node and its subtree
///
/// An attribute serializes as `name="value"`.
pub fn serialize_node(tree: &DomTree, id: NodeId, options: &SerializeOptions) -> String {
    let mut out = String::new();
    write_node(&mut out, tree, id, options, 0);
    out
}

/// Pending output while walking a subtree
enum Emit {
    /// Write a node, preceded by an indented newline when `newline` is set
    Node { id: NodeId, depth: usize, newline: bool },
    /// Write an element's end tag
    Close { id: NodeId, depth: usize, pretty: bool },
}

fn write_node(out: &mut String, tree: &DomTree, id: NodeId, options: &SerializeOptions, depth: usize) {
    let mut pending = vec![Emit::Node { id, depth, newline: false }];

    while let Some(emit) = pending.pop() {
        let (id, depth) = match emit {
            Emit::Node { id, depth, newline: indented } => {
                if indented {
                    newline(out, options, depth);
                }
                (id, depth)
            }
            Emit::Close { id, depth, pretty } => {
                if pretty {
                    newline(out, options, depth);
                }
                if let Some(element) = tree.get(id).and_then(Node::as_element) {
                    out.push_str("</");
                    out.push_str(element.tag_name());
                    out.push('>');
                }
                continue;
            }
        };
        let Some(node) = tree.get(id) else {
            continue;
        };
        match &node.data {
            NodeData::Document => {
                let children = node.children().iter().rev();
                pending.extend(children.map(|&child| Emit::Node { id: child, depth, newline: false }));
            }
            NodeData::Element(element) => {
                out.push('<');
                out.push_str(element.tag_name());
                for attr in element.attr_ids() {
                    if let Some(a) = tree.get(attr).and_then(Node::as_attr) {
                        out.push(' ');
                        write_attr(out, a.name(), a.value());
                    }
                }

                let children = node.children();
                if children.is_empty() {
                    out.push_str("/>");
                    continue;
                }
                out.push('>');

                let pretty = options.indent && is_element_only(tree, children);
                pending.push(Emit::Close { id, depth, pretty });
                pending.extend(children.iter().rev().map(|&child| Emit::Node {
                    id: child,
                    depth: depth + 1,
                    newline: pretty,
                }));
            }
            NodeData::Attribute(a) => write_attr(out, a.name(), a.value()),
            NodeData::Text(text) => write_escaped_text(out, text),
            NodeData::Comment(text) => {
                out.push_str("<!--");
                out.push_str(text);
                out.push_str("-->");
            }
            NodeData::CdataSection(text) => {
                out.push_str("<![CDATA[");
                // a literal "]]>" has to be split across two sections
                out.push_str(&text.replace("]]>", "]]]]><![CDATA[>"));
                out.push_str("]]>");
            }
        }
    }
}

/// No text or CDATA among the children, so whitespace can be added freely
fn is_element_only(tree: &DomTree, children: &[NodeId]) -> bool {
    children.iter().all(|&c| {
        tree.get(c)
            .is_some_and(|n| !matches!(n.data, NodeData::Text(_) | NodeData::CdataSection(_)))
    })
}

fn newline(out: &mut String, options: &SerializeOptions, depth: usize) {
    out.push('\n');
    for _ in 0..depth {
        out.push_str(&options.indent_str);
    }
}

fn write_attr(out: &mut String, name: &str, value: &str) {
    out.push_str(name);
    out.push_str("=\"");
    write_escaped_attr(out, value);
    out.push('"');
}

/// Escape `<`, `>`, `&` and carriage returns in text content
fn write_escaped_text(out: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '\r' => out.push_str("&#13;"),
            _ => out.push(ch),
        }
    }
}

/// Escape markup, quotes and whitespace that attribute normalization would
/// otherwise rewrite
fn write_escaped_attr(out: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\n' => out.push_str("&#10;"),
            '\r' => out.push_str("&#13;"),
            '\t' => out.push_str("&#9;"),
            _ => out.push(ch),
        }
    }
}
