//! Resource document parsing into an owned, read-only element tree.
//!
//! Every resource document is parsed exactly once per load pass into a
//! [`Document`]: an element/text tree preserving document order and byte
//! positions. The tree is independent of what it means; the loaders decide
//! which elements carry resource semantics.
//!
//! # Behavior
//!
//! - Comments, processing instructions and whitespace-only text are
//!   discarded; they carry no resource semantics.
//! - Encoding follows the XML prolog declaration, defaulting to UTF-8.
//! - Any parse error rejects the whole document with
//!   [`crate::Error::MalformedXml`]; a partially built tree is never
//!   returned.
//!
//! # Example
//!
//! ```rust
//! use rescope::xml;
//!
//! let doc = xml::parse(
//!     br#"<resources><string name="app_name">Demo</string></resources>"#,
//!     "values/strings.xml",
//! )?;
//! assert_eq!(doc.root.name, "resources");
//! let string = doc.root.child_elements().next().unwrap();
//! assert_eq!(string.attribute("name"), Some("app_name"));
//! assert_eq!(string.text(), "Demo");
//! # Ok::<(), rescope::Error>(())
//! ```

use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::Result;

/// A parsed resource document.
#[derive(Debug, Clone)]
pub struct Document {
    /// The single root element of the document
    pub root: Element,
}

/// One element of a parsed document.
#[derive(Debug, Clone)]
pub struct Element {
    /// The element tag name
    pub name: String,
    /// Attributes in document order
    pub attributes: Vec<Attribute>,
    /// Child nodes in document order
    pub children: Vec<Node>,
    /// Byte position of the element start within the document
    pub position: u64,
}

/// One attribute of an element.
#[derive(Debug, Clone)]
pub struct Attribute {
    /// The attribute name as written, including any namespace prefix
    pub name: String,
    /// The unescaped attribute value
    pub value: String,
}

/// A child node of an element.
#[derive(Debug, Clone)]
pub enum Node {
    /// A nested element
    Element(Element),
    /// A run of character data; whitespace-only runs are never stored
    Text(String),
}

impl Element {
    /// Returns the value of the attribute `name`, if present.
    ///
    /// Matches the full attribute name as written; `attribute("name")` does
    /// not match `android:name`.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Iterates the element children, skipping text nodes.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        })
    }

    /// Returns the text content of this element with nested markup flattened
    /// away, e.g. `Hello <b>world</b>!` becomes `Hello world!`.
    #[must_use]
    pub fn text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for node in &self.children {
            match node {
                Node::Text(text) => out.push_str(text),
                Node::Element(element) => element.collect_text(out),
            }
        }
    }
}

/// Parses one document from raw bytes.
///
/// # Arguments
///
/// * `data` - The complete document contents
/// * `source` - Source path used in error messages
///
/// # Errors
///
/// Returns [`crate::Error::Empty`] for empty input and
/// [`crate::Error::MalformedXml`] for any structural error: unbalanced tags,
/// invalid attribute syntax, multiple or missing root elements, or an
/// undecodable encoding.
pub fn parse(data: &[u8], source: &str) -> Result<Document> {
    if data.is_empty() {
        return Err(crate::Error::Empty);
    }

    let mut reader = Reader::from_reader(data);
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        let position = reader.buffer_position();
        match reader.read_event() {
            Err(e) => {
                return Err(malformed_xml!(source, reader.error_position(), e));
            }
            Ok(Event::Eof) => break,
            Ok(Event::Start(start)) => {
                stack.push(read_element(&reader, &start, position, source)?);
            }
            Ok(Event::Empty(start)) => {
                let element = read_element(&reader, &start, position, source)?;
                attach(element, &mut stack, &mut root, source, position)?;
            }
            Ok(Event::End(_)) => {
                let element = stack.pop().ok_or_else(|| {
                    malformed_xml!(source, position, "close tag without open tag")
                })?;
                attach(element, &mut stack, &mut root, source, position)?;
            }
            Ok(Event::Text(text)) => {
                let decoded = reader
                    .decoder()
                    .decode(&text)
                    .map_err(|e| malformed_xml!(source, position, e))?;
                let unescaped =
                    unescape(&decoded).map_err(|e| malformed_xml!(source, position, e))?;
                push_text(&unescaped, &mut stack);
            }
            Ok(Event::CData(cdata)) => {
                let decoded = reader
                    .decoder()
                    .decode(&cdata)
                    .map_err(|e| malformed_xml!(source, position, e))?;
                push_text(&decoded, &mut stack);
            }
            // Comments, the prolog, processing instructions and doctype
            // declarations carry no resource semantics.
            Ok(_) => {}
        }
    }

    if !stack.is_empty() {
        return Err(malformed_xml!(
            source,
            reader.buffer_position(),
            "unclosed element '{}'",
            stack[stack.len() - 1].name
        ));
    }

    match root {
        Some(root) => Ok(Document { root }),
        None => Err(malformed_xml!(
            source,
            reader.buffer_position(),
            "document has no root element"
        )),
    }
}

/// Builds an element shell (name, attributes, position) from a start tag.
fn read_element(
    reader: &Reader<&[u8]>,
    start: &BytesStart<'_>,
    position: u64,
    source: &str,
) -> Result<Element> {
    let decoder = reader.decoder();
    let name = decoder
        .decode(start.name().as_ref())
        .map_err(|e| malformed_xml!(source, position, e))?
        .into_owned();

    let mut attributes = Vec::new();
    for attribute in start.attributes() {
        let attribute = attribute.map_err(|e| malformed_xml!(source, position, e))?;
        let key = decoder
            .decode(attribute.key.as_ref())
            .map_err(|e| malformed_xml!(source, position, e))?
            .into_owned();
        let raw = decoder
            .decode(&attribute.value)
            .map_err(|e| malformed_xml!(source, position, e))?;
        let value = unescape(&raw)
            .map_err(|e| malformed_xml!(source, position, e))?
            .into_owned();
        attributes.push(Attribute { name: key, value });
    }

    Ok(Element {
        name,
        attributes,
        children: Vec::new(),
        position,
    })
}

/// Attaches a completed element to its parent, or installs it as the root.
fn attach(
    element: Element,
    stack: &mut [Element],
    root: &mut Option<Element>,
    source: &str,
    position: u64,
) -> Result<()> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(Node::Element(element));
        return Ok(());
    }
    if root.is_some() {
        return Err(malformed_xml!(
            source,
            position,
            "multiple root elements ('{}' after the first)",
            element.name
        ));
    }
    *root = Some(element);
    Ok(())
}

/// Stores a text run on the innermost open element, discarding
/// whitespace-only runs and any text outside the root element.
fn push_text(text: &str, stack: &mut [Element]) {
    if text.trim().is_empty() {
        return;
    }
    if let Some(parent) = stack.last_mut() {
        parent.children.push(Node::Text(text.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn parses_elements_in_order() {
        let doc = parse(
            br#"<resources>
                  <string name="a">first</string>
                  <color name="b">#FF0000</color>
                </resources>"#,
            "values/test.xml",
        )
        .unwrap();

        assert_eq!(doc.root.name, "resources");
        let children: Vec<&Element> = doc.root.child_elements().collect();
        assert_eq!(children.len(), 2);
        assert_eq!(children[0].name, "string");
        assert_eq!(children[0].attribute("name"), Some("a"));
        assert_eq!(children[0].text(), "first");
        assert_eq!(children[1].name, "color");
    }

    #[test]
    fn flattens_nested_markup() {
        let doc = parse(
            br#"<resources><string name="s">Hello <b>world</b>!</string></resources>"#,
            "t.xml",
        )
        .unwrap();
        let string = doc.root.child_elements().next().unwrap();
        assert_eq!(string.text(), "Hello world!");
    }

    #[test]
    fn discards_comments_and_whitespace() {
        let doc = parse(
            br#"<resources>
                  <!-- a comment -->
                  <string name="s">v</string>
                </resources>"#,
            "t.xml",
        )
        .unwrap();
        assert_eq!(doc.root.children.len(), 1);
    }

    #[test]
    fn unescapes_entities() {
        let doc = parse(
            br#"<resources><string name="s" extra="a &amp; b">x &lt; y</string></resources>"#,
            "t.xml",
        )
        .unwrap();
        let string = doc.root.child_elements().next().unwrap();
        assert_eq!(string.attribute("extra"), Some("a & b"));
        assert_eq!(string.text(), "x < y");
    }

    #[test]
    fn keeps_cdata_verbatim() {
        let doc = parse(
            br#"<resources><string name="s"><![CDATA[a < b & c]]></string></resources>"#,
            "t.xml",
        )
        .unwrap();
        let string = doc.root.child_elements().next().unwrap();
        assert_eq!(string.text(), "a < b & c");
    }

    #[test]
    fn honors_prolog_declaration() {
        let doc = parse(
            br#"<?xml version="1.0" encoding="UTF-8"?><resources/>"#,
            "t.xml",
        )
        .unwrap();
        assert_eq!(doc.root.name, "resources");
    }

    #[test]
    fn rejects_unbalanced_documents() {
        assert!(matches!(
            parse(br#"<resources><string>"#, "t.xml"),
            Err(Error::MalformedXml { .. })
        ));
    }

    #[test]
    fn rejects_mismatched_close_tag() {
        assert!(matches!(
            parse(br#"<resources><a></b></resources>"#, "t.xml"),
            Err(Error::MalformedXml { .. })
        ));
    }

    #[test]
    fn rejects_multiple_roots() {
        assert!(matches!(
            parse(br#"<a/><b/>"#, "t.xml"),
            Err(Error::MalformedXml { .. })
        ));
    }

    #[test]
    fn rejects_empty_input() {
        assert!(matches!(parse(b"", "t.xml"), Err(Error::Empty)));
    }

    #[test]
    fn error_carries_source_path() {
        let err = parse(br#"<broken"#, "values/strings.xml").unwrap_err();
        match err {
            Error::MalformedXml { path, .. } => assert_eq!(path, "values/strings.xml"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn positions_increase_in_document_order() {
        let doc = parse(
            br#"<resources><string name="a">x</string><string name="b">y</string></resources>"#,
            "t.xml",
        )
        .unwrap();
        let children: Vec<&Element> = doc.root.child_elements().collect();
        assert!(children[0].position < children[1].position);
        assert!(doc.root.position < children[0].position);
    }
}
