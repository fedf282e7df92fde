//! Example: parse, edit and re-serialize an XML document
//!
//! Reads the file named on the command line, or a built-in sample.
//! Set `RUST_LOG=livedom_xml=debug` to see parser logging.

use livedom::{NodeList, NodeOperations};
use livedom_xml::{SerializeOptions, XmlParser, serialize_with_options};

const SAMPLE: &str = r#"<library>
  <book id="b1" lang="en"><title>Dune</title></book>
  <book id="b2"><title>Solaris</title></book>
</library>"#;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut doc = match std::env::args().nth(1) {
        Some(path) => {
            let mut file = std::fs::File::open(&path)?;
            XmlParser::new().parse_reader(&mut file)?
        }
        None => XmlParser::new().parse(SAMPLE)?,
    };

    let books = doc.get_elements_by_tag_name("book");
    println!("{} <book> elements", books.length(doc.tree()));

    // Move the last book to the front and tag it
    let last = books.to_vec(doc.tree()).pop();
    if let (Some(root), Some(last)) = (doc.document_element(), last) {
        let first = doc.tree().first_child(root);
        doc.tree_mut().insert_before(root, last, first)?;
        doc.tree_mut().set_attribute(last, "moved", "true")?;
    }

    let options = SerializeOptions::default().xml_declaration(true).indent(true);
    print!("{}", serialize_with_options(&doc, &options));
    Ok(())
}
