//! Edge case tests for livedom-xml
//!
//! Serialization round trips, malformed input, and tree operations that
//! only show up on parsed documents.

use livedom::{NodeList, NodeOperations, NodeType};
use livedom_xml::{
    Document, ParseError, ParseOptions, SerializeOptions, XmlParser, parse, serialize,
    serialize_with_options,
};

fn assert_round_trip(xml: &str) {
    let first = parse(xml).unwrap();
    let text = serialize(&first);
    let second = parse(&text).unwrap_or_else(|e| panic!("reparse of {text:?} failed: {e}"));
    assert!(
        first.tree().is_equal_node(first.node(), second.tree(), second.node()),
        "round trip changed the tree: {xml:?} -> {text:?}"
    );
}

// ============================================================================
// ROUND TRIPS
// ============================================================================

#[test]
fn test_to_xml() {
    let d1 = parse(r#"<parent attr="val">mom<foo/></parent>"#).unwrap();
    let d2 = parse(&serialize(&d1)).unwrap();
    let tree = d2.tree();
    let root = d2.document_element().unwrap();

    assert_eq!(tree.node_name(root), Some("parent"));
    assert_eq!(tree.get_attribute(root, "attr"), "val");
    assert_eq!(tree.child_nodes(root).length(tree), 2);
    let first = tree.child_nodes(root).item(tree, 0).unwrap();
    assert_eq!(tree.node_value(first), Some("mom"));
}

#[test]
fn test_round_trip_documents() {
    let cases = [
        "<a/>",
        r#"<a x="1" y="2"><b>text</b><c/></a>"#,
        "<a><!-- note --><b/>tail</a>",
        r#"<a q="&quot;quoted&quot; &amp; &lt;escaped&gt;">1 &lt; 2 &amp;&amp; 3 &gt; 2</a>"#,
        "<outer>\n  <inner>\n    <leaf/>\n  </inner>\n</outer>",
        r#"<a xml:lang="en"><b>世界 🚀</b></a>"#,
    ];
    for xml in cases {
        assert_round_trip(xml);
    }
}

#[test]
fn test_round_trip_attribute_whitespace() {
    let mut doc = parse("<a/>").unwrap();
    let root = doc.document_element().unwrap();
    doc.tree_mut()
        .set_attribute(root, "v", "line one\nline two\ttabbed")
        .unwrap();

    let reparsed = parse(&serialize(&doc)).unwrap();
    let root = reparsed.document_element().unwrap();
    assert_eq!(
        reparsed.tree().get_attribute(root, "v"),
        "line one\nline two\ttabbed"
    );
}

#[test]
fn test_round_trip_after_mutation() {
    let mut doc = parse("<list><item>one</item><item>two</item></list>").unwrap();
    let root = doc.document_element().unwrap();
    let first = doc.tree().first_child(root).unwrap();
    let last = doc.tree().last_child(root).unwrap();
    doc.tree_mut().insert_before(root, last, Some(first)).unwrap();

    let text = serialize(&doc);
    assert_eq!(text, "<list><item>two</item><item>one</item></list>");
    assert_round_trip(&text);
}

#[test]
fn test_cdata_serializes_and_reparses_as_text() {
    let mut doc = parse("<a/>").unwrap();
    let root = doc.document_element().unwrap();
    let cdata = doc.create_cdata_section("<raw> & ]]> end");
    doc.tree_mut().append_child(root, cdata).unwrap();

    let reparsed = parse(&serialize(&doc)).unwrap();
    let root = reparsed.document_element().unwrap();
    assert_eq!(reparsed.tree().text_content(root), "<raw> & ]]> end");
}

#[test]
fn test_indented_output_reparses() {
    let doc = parse("<a><b><c/></b><d/></a>").unwrap();
    let options = SerializeOptions::default().xml_declaration(true).indent(true);
    let text = serialize_with_options(&doc, &options);
    assert_eq!(
        text,
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<a>\n  <b>\n    <c/>\n  </b>\n  <d/>\n</a>\n"
    );

    let strip = ParseOptions {
        keep_whitespace_text: false,
        ..Default::default()
    };
    let reparsed = XmlParser::with_options(strip).parse(&text).unwrap();
    assert!(doc.tree().is_equal_node(doc.node(), reparsed.tree(), reparsed.node()));
}

// ============================================================================
// MALFORMED INPUT
// ============================================================================

#[test]
fn test_parse_empty_and_whitespace() {
    assert!(matches!(parse(""), Err(ParseError::NoRootElement)));
    assert!(matches!(parse("   \n "), Err(ParseError::NoRootElement)));
}

#[test]
fn test_strict_mode_rejects_malformed() {
    let strict = ParseOptions {
        strict: true,
        ..Default::default()
    };
    let result = XmlParser::with_options(strict).parse("<a></b></a>");
    assert!(matches!(result, Err(ParseError::Malformed { .. })));
}

#[test]
fn test_error_messages() {
    let err = ParseError::UnclosedElements {
        open: vec!["a".into(), "b".into()],
    };
    assert_eq!(err.to_string(), "Unclosed elements: a, b");

    let err = ParseError::MultipleRoots { tag: "b".into() };
    assert_eq!(err.to_string(), "Second root element <b>");
}

// ============================================================================
// PARSED TREE OPERATIONS
// ============================================================================

#[test]
fn test_text_content_and_normalize() {
    let mut doc = parse("<p>Hello, <b>brave</b> world</p>").unwrap();
    let root = doc.document_element().unwrap();
    assert_eq!(doc.tree().text_content(root), "Hello, brave world");

    let bold = doc.tree().child_nodes(root).item(doc.tree(), 1).unwrap();
    let inner = doc.tree().first_child(bold).unwrap();
    doc.tree_mut().remove_child(root, bold).unwrap();
    let tail = doc.tree().last_child(root).unwrap();
    doc.tree_mut().insert_before(root, inner, Some(tail)).unwrap();
    assert_eq!(doc.tree().children(root).len(), 3);

    doc.tree_mut().normalize(root).unwrap();
    let tree = doc.tree();
    assert_eq!(tree.children(root).len(), 1);
    assert_eq!(tree.first_child(root).and_then(|t| tree.data(t)), Some("Hello, brave world"));
}

#[test]
fn test_deep_clone_of_parsed_subtree() {
    let mut doc = parse(r#"<root><item id="x" k="v"><sub>t</sub></item></root>"#).unwrap();
    let root = doc.document_element().unwrap();
    let item = doc.tree().first_child(root).unwrap();

    let copy = doc.tree_mut().clone_node(item, true).unwrap();
    assert_eq!(doc.tree().parent_node(copy), None);
    assert!(doc.tree().is_equal_node(item, doc.tree(), copy));

    doc.tree_mut().append_child(root, copy).unwrap();
    assert_eq!(doc.get_elements_by_tag_name("sub").length(doc.tree()), 2);
    // pre-order search finds the original first
    assert_eq!(doc.get_element_by_id("x"), Some(item));
}

#[test]
fn test_namespaced_names_kept_qualified() {
    let doc = parse(r#"<svg:svg xmlns:svg="http://www.w3.org/2000/svg"><svg:g/></svg:svg>"#).unwrap();
    let tree = doc.tree();
    let root = doc.document_element().unwrap();
    assert_eq!(tree.tag_name(root), Some("svg:svg"));
    assert_eq!(doc.get_elements_by_tag_name("svg:g").length(tree), 1);
}

#[test]
fn test_wildcard_counts_every_element() {
    let doc: Document = parse("<a><b><c/></b>text<!-- c --><d/></a>").unwrap();
    let tree = doc.tree();
    let all = doc.get_elements_by_tag_name("*");
    assert_eq!(all.length(tree), 4);
    assert!(all.iter(tree).all(|id| tree.node_type(id) == Some(NodeType::Element)));
}

// ============================================================================
// DEEP NESTING
// ============================================================================

const DEPTH: usize = 50_000;

fn nested_xml(depth: usize) -> String {
    let mut xml = String::with_capacity(depth * 7 + 4);
    xml.push_str(&"<a>".repeat(depth));
    xml.push_str("end");
    xml.push_str(&"</a>".repeat(depth));
    xml
}

#[test]
fn test_deeply_nested_document() {
    let xml = nested_xml(DEPTH);
    let mut doc = parse(&xml).unwrap();
    let root = doc.document_element().unwrap();
    assert_eq!(doc.tree().descendants(root).count(), DEPTH);
    assert_eq!(doc.get_elements_by_tag_name("a").length(doc.tree()), DEPTH - 1);
    assert_eq!(doc.tree().text_content(root), "end");

    let text = serialize(&doc);
    assert_eq!(text, xml);
    let reparsed = parse(&text).unwrap();
    assert!(doc.tree().is_equal_node(doc.node(), reparsed.tree(), reparsed.node()));

    let copy = doc.tree_mut().clone_node(root, true).unwrap();
    assert!(doc.tree().is_equal_node(root, doc.tree(), copy));
    doc.tree_mut().normalize(root).unwrap();
    assert!(doc.tree().is_equal_node(root, doc.tree(), copy));
}
