//! livedom XML front-end
//!
//! Builds [`livedom::Document`] trees from XML text and writes them back.
//! Parsing is done by xml5ever; the resulting tree is replayed as a stream
//! of open/close/text/comment events into a [`TreeBuilder`], which creates
//! nodes through the document factories and wires them with `append_child`.

mod builder;
mod parser;
mod serializer;

pub use builder::TreeBuilder;
pub use parser::{ParseOptions, XmlParser};
pub use serializer::{SerializeOptions, serialize, serialize_node, serialize_with_options};

pub use livedom::Document;

/// Parse an XML string into a Document
pub fn parse(xml: &str) -> Result<Document, ParseError> {
    XmlParser::new().parse(xml)
}

/// Parse error
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("I/O error while reading input: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed XML: {message}")]
    Malformed { message: String },

    #[error("Document has no root element")]
    NoRootElement,

    #[error("Second root element <{tag}>")]
    MultipleRoots { tag: String },

    #[error("Unexpected closing tag </{tag}>")]
    UnexpectedClose { tag: String },

    #[error("Unclosed elements: {}", open.join(", "))]
    UnclosedElements { open: Vec<String> },

    #[error(transparent)]
    Dom(#[from] livedom::DomError),
}
