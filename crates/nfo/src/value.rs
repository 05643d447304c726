// crates/nfo/src/value.rs
//! Loosely-shaped XML value tree
//!
//! NFO files are not validated against any schema, so the same field can
//! show up as plain text, as an element with attributes and inline text, or
//! repeated any number of times. The tree keeps those shapes distinct:
//!
//! - an element with neither attributes nor child elements is [`XmlValue::Text`]
//! - anything else is an [`XmlValue::Element`], with attributes and child
//!   elements merged into one ordered field list and any inline text kept
//!   as the element's text node
//! - a field that occurs more than once becomes an [`XmlValue::List`];
//!   a single occurrence is never wrapped
//! - text is kept exactly as written; only whitespace-only text inside an
//!   element with fields is dropped, since that is layout
//!
//! The document root is not part of the tree: [`XmlValue::parse`] returns
//! the root element's own value.

use crate::error::{NfoError, NfoResult};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// One parsed XML value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlValue {
    /// Plain text content
    Text(String),
    /// Element carrying attributes and/or child elements
    Element(XmlElement),
    /// Repeated sibling elements, in document order
    List(Vec<XmlValue>),
}

/// Attributes and child elements of one element, merged
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlElement {
    /// Inline text, when the element has any alongside its fields
    pub text: Option<String>,
    fields: Vec<(String, XmlValue)>,
}

impl XmlElement {
    /// Creates an empty element
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a field (attribute or child element) by name
    pub fn get(&self, name: &str) -> Option<&XmlValue> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    /// Field names in first-seen order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(key, _)| key.as_str())
    }

    /// Returns true if the element has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Adds a field, turning an existing field of the same name into a list
    pub fn insert(&mut self, name: String, value: XmlValue) {
        match self.fields.iter_mut().find(|(key, _)| *key == name) {
            Some((_, XmlValue::List(items))) => items.push(value),
            Some((_, existing)) => {
                let first = std::mem::replace(existing, XmlValue::List(Vec::new()));
                *existing = XmlValue::List(vec![first, value]);
            }
            None => self.fields.push((name, value)),
        }
    }
}

impl XmlValue {
    /// Parses an XML document and returns the value of its root element.
    pub fn parse(content: &str) -> NfoResult<XmlValue> {
        let mut reader = Reader::from_str(content);

        let mut stack: Vec<Frame> = Vec::new();
        let mut root: Option<XmlValue> = None;
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(e) => {
                    ensure_single_root(&root, &stack)?;
                    stack.push(Frame::open(&e)?);
                }
                Event::Empty(e) => {
                    ensure_single_root(&root, &stack)?;
                    let (name, value) = Frame::open(&e)?.close();
                    attach(&mut stack, &mut root, name, value);
                }
                Event::Text(e) => {
                    let text = e.unescape()?;
                    push_text(&mut stack, &text)?;
                }
                Event::CData(e) => {
                    let text = String::from_utf8_lossy(&e.into_inner()).into_owned();
                    push_text(&mut stack, &text)?;
                }
                Event::End(_) => {
                    // quick-xml has already matched the end tag against its start
                    if let Some(frame) = stack.pop() {
                        let (name, value) = frame.close();
                        attach(&mut stack, &mut root, name, value);
                    }
                }
                Event::Eof => break,
                Event::Decl(_) | Event::PI(_) | Event::Comment(_) | Event::DocType(_) => {}
            }
            buf.clear();
        }

        if let Some(open) = stack.last() {
            return Err(NfoError::XmlParse(format!(
                "unexpected end of document inside <{}>",
                open.name
            )));
        }

        root.ok_or_else(|| NfoError::XmlParse("document has no root element".to_string()))
    }

    /// Looks up a field when this value is an element
    pub fn get(&self, name: &str) -> Option<&XmlValue> {
        match self {
            XmlValue::Element(element) => element.get(name),
            XmlValue::Text(_) | XmlValue::List(_) => None,
        }
    }

    /// Views the value as a sequence: lists as-is, anything else as one item
    pub fn as_slice(&self) -> &[XmlValue] {
        match self {
            XmlValue::List(items) => items,
            single => std::slice::from_ref(single),
        }
    }
}

/// Extracts the text content of an optional value.
///
/// Absent values yield empty text, elements yield their text node (empty if
/// they have none), and lists yield the text of their first item.
pub fn extract_text(value: Option<&XmlValue>) -> String {
    match value {
        None => String::new(),
        Some(XmlValue::Text(text)) => text.clone(),
        Some(XmlValue::Element(element)) => element.text.clone().unwrap_or_default(),
        Some(XmlValue::List(items)) => extract_text(items.first()),
    }
}

/// An element whose end tag has not been seen yet
struct Frame {
    name: String,
    element: XmlElement,
    text: String,
}

impl Frame {
    fn open(start: &BytesStart<'_>) -> NfoResult<Self> {
        let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
        let mut element = XmlElement::new();

        for attr in start.attributes() {
            let attr = attr?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr.unescape_value()?.into_owned();
            element.insert(key, XmlValue::Text(value));
        }

        Ok(Self {
            name,
            element,
            text: String::new(),
        })
    }

    fn close(self) -> (String, XmlValue) {
        let Frame {
            name,
            mut element,
            text,
        } = self;

        let value = if element.is_empty() {
            XmlValue::Text(text)
        } else {
            if !text.trim().is_empty() {
                element.text = Some(text);
            }
            XmlValue::Element(element)
        };

        (name, value)
    }
}

fn ensure_single_root(root: &Option<XmlValue>, stack: &[Frame]) -> NfoResult<()> {
    if root.is_some() && stack.is_empty() {
        return Err(NfoError::XmlParse(
            "multiple root elements in document".to_string(),
        ));
    }
    Ok(())
}

fn push_text(stack: &mut [Frame], text: &str) -> NfoResult<()> {
    match stack.last_mut() {
        Some(frame) => {
            frame.text.push_str(text);
            Ok(())
        }
        None if text.trim().is_empty() => Ok(()),
        None => Err(NfoError::XmlParse(
            "text content outside of the root element".to_string(),
        )),
    }
}

fn attach(stack: &mut [Frame], root: &mut Option<XmlValue>, name: String, value: XmlValue) {
    match stack.last_mut() {
        Some(parent) => parent.element.insert(name, value),
        None => *root = Some(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_is_discarded() {
        let value = XmlValue::parse("<movie><title>Heat</title></movie>").expect("Should parse");
        assert_eq!(
            value.get("title"),
            Some(&XmlValue::Text("Heat".to_string()))
        );
    }

    #[test]
    fn test_single_occurrence_is_not_a_list() {
        let value = XmlValue::parse("<movie><genre>Drama</genre></movie>").expect("Should parse");
        assert!(matches!(value.get("genre"), Some(XmlValue::Text(_))));
    }

    #[test]
    fn test_repeated_siblings_become_list() {
        let value = XmlValue::parse("<movie><genre>Drama</genre><genre>Crime</genre><genre>War</genre></movie>")
            .expect("Should parse");
        let genres = value.get("genre").expect("Should have genre");
        let texts: Vec<String> = genres
            .as_slice()
            .iter()
            .map(|g| extract_text(Some(g)))
            .collect();
        assert_eq!(texts, vec!["Drama", "Crime", "War"]);
    }

    #[test]
    fn test_attributes_merge_with_text_node() {
        let value = XmlValue::parse(r#"<movie><uniqueid type="num" default="true">ABC-123</uniqueid></movie>"#)
            .expect("Should parse");
        let uniqueid = value.get("uniqueid").expect("Should have uniqueid");
        assert_eq!(
            uniqueid.get("type"),
            Some(&XmlValue::Text("num".to_string()))
        );
        assert_eq!(extract_text(Some(uniqueid)), "ABC-123");
    }

    #[test]
    fn test_attributes_and_children_share_fields() {
        let value = XmlValue::parse(r#"<movie><actor role="lead"><name>Al Pacino</name></actor></movie>"#)
            .expect("Should parse");
        let actor = value.get("actor").expect("Should have actor");
        let keys: Vec<&str> = match actor {
            XmlValue::Element(element) => element.keys().collect(),
            _ => panic!("actor should be an element"),
        };
        assert_eq!(keys, vec!["role", "name"]);
    }

    #[test]
    fn test_empty_element_is_empty_text() {
        let value = XmlValue::parse("<movie><title/><plot></plot></movie>").expect("Should parse");
        assert_eq!(value.get("title"), Some(&XmlValue::Text(String::new())));
        assert_eq!(value.get("plot"), Some(&XmlValue::Text(String::new())));
    }

    #[test]
    fn test_cdata_and_entities() {
        let value = XmlValue::parse("<movie><title>Tom &amp; Jerry</title><plot><![CDATA[<b>bold</b>]]></plot></movie>")
            .expect("Should parse");
        assert_eq!(extract_text(value.get("title")), "Tom & Jerry");
        assert_eq!(extract_text(value.get("plot")), "<b>bold</b>");
    }

    #[test]
    fn test_text_whitespace_is_kept() {
        let value = XmlValue::parse("<movie><title> Heat </title><plot>Tom <![CDATA[&]]> Jerry</plot></movie>")
            .expect("Should parse");
        assert_eq!(extract_text(value.get("title")), " Heat ");
        assert_eq!(extract_text(value.get("plot")), "Tom & Jerry");
    }

    #[test]
    fn test_layout_whitespace_is_dropped() {
        let value = XmlValue::parse("<movie>\n  <actor>\n    <name>Al Pacino</name>\n  </actor>\n</movie>")
            .expect("Should parse");
        let actor = value.get("actor").expect("Should have actor");
        match actor {
            XmlValue::Element(element) => assert_eq!(element.text, None),
            _ => panic!("actor should be an element"),
        }
        assert_eq!(extract_text(actor.get("name")), "Al Pacino");
    }

    #[test]
    fn test_extract_text_variants() {
        assert_eq!(extract_text(None), "");
        assert_eq!(extract_text(Some(&XmlValue::Text("x".to_string()))), "x");

        let mut element = XmlElement::new();
        element.insert("lang".to_string(), XmlValue::Text("en".to_string()));
        assert_eq!(extract_text(Some(&XmlValue::Element(element.clone()))), "");

        element.text = Some("Heat".to_string());
        assert_eq!(extract_text(Some(&XmlValue::Element(element))), "Heat");

        let list = XmlValue::List(vec![
            XmlValue::Text("first".to_string()),
            XmlValue::Text("second".to_string()),
        ]);
        assert_eq!(extract_text(Some(&list)), "first");
        assert_eq!(extract_text(Some(&XmlValue::List(Vec::new()))), "");
    }

    #[test]
    fn test_insert_promotes_to_list() {
        let mut element = XmlElement::new();
        element.insert("actor".to_string(), XmlValue::Text("A".to_string()));
        element.insert("actor".to_string(), XmlValue::Text("B".to_string()));
        element.insert("actor".to_string(), XmlValue::Text("C".to_string()));
        let actors = element.get("actor").expect("Should have actor");
        assert_eq!(actors.as_slice().len(), 3);
    }

    #[test]
    fn test_not_xml_is_an_error() {
        assert!(XmlValue::parse("not xml at all").is_err());
    }

    #[test]
    fn test_empty_document_is_an_error() {
        assert!(XmlValue::parse("").is_err());
        assert!(XmlValue::parse(r#"<?xml version="1.0"?>"#).is_err());
    }

    #[test]
    fn test_unclosed_element_is_an_error() {
        assert!(XmlValue::parse("<movie><title>Heat</title>").is_err());
    }

    #[test]
    fn test_mismatched_end_tag_is_an_error() {
        assert!(XmlValue::parse("<movie><title>Heat</studio></movie>").is_err());
    }

    #[test]
    fn test_multiple_roots_is_an_error() {
        assert!(XmlValue::parse("<movie/><movie/>").is_err());
    }
}
