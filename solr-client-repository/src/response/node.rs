//! Format-independent node tree for Solr payloads.
//!
//! Both wire formats are decoded into the same small tree so the section
//! extractors only need to be written once:
//!
//! - XML `<lst>`, `<doc>` and `<response>` → [`Node::Map`]
//! - XML `<arr>` → [`Node::List`]
//! - XML `<result numFound start>` → a map with `numFound`, `start`, `docs`
//! - XML typed scalars (`<str>`, `<int>`, ...) → [`Node::Scalar`]
//! - JSON objects, arrays and primitives map onto the obvious variants

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde_json::Value;

use crate::errors::SolrError;

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Null,
    Scalar(String),
    List(Vec<Node>),
    /// Named entries in wire order. Names may repeat.
    Map(Vec<(String, Node)>),
}

impl Node {
    /// First child with the given name, if this is a map.
    pub fn get(&self, name: &str) -> Option<&Node> {
        match self {
            Self::Map(entries) => entries.iter().find(|(k, _)| k == name).map(|(_, v)| v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Scalar(text) => Some(text),
            _ => None,
        }
    }

    pub fn entries(&self) -> &[(String, Node)] {
        match self {
            Self::Map(entries) => entries,
            _ => &[],
        }
    }

    pub fn items(&self) -> &[Node] {
        match self {
            Self::List(items) => items,
            _ => &[],
        }
    }

    /// Decode a Solr JSON payload.
    pub fn from_json(payload: &str) -> Result<Node, SolrError> {
        let value: Value = serde_json::from_str(payload)?;
        Ok(Self::from_value(value))
    }

    fn from_value(value: Value) -> Node {
        match value {
            Value::Null => Node::Null,
            Value::Bool(b) => Node::Scalar(b.to_string()),
            Value::Number(n) => Node::Scalar(n.to_string()),
            Value::String(s) => Node::Scalar(s),
            Value::Array(items) => Node::List(items.into_iter().map(Self::from_value).collect()),
            Value::Object(map) => Node::Map(
                map.into_iter()
                    .map(|(k, v)| (k, Self::from_value(v)))
                    .collect(),
            ),
        }
    }

    /// Decode a Solr XML payload.
    pub fn from_xml(payload: &str) -> Result<Node, SolrError> {
        let mut reader = Reader::from_str(payload);
        let mut stack: Vec<(Option<String>, Frame)> = Vec::new();
        let mut root: Option<Node> = None;

        loop {
            let event = reader
                .read_event()
                .map_err(|e| SolrError::protocol_decode(format!("Malformed XML: {}", e)))?;
            match event {
                Event::Start(ref e) => {
                    let name = attribute(e, b"name");
                    stack.push((name, Frame::open(e)));
                }
                Event::Empty(ref e) => {
                    let name = attribute(e, b"name");
                    let node = Frame::open(e).close();
                    attach(&mut stack, &mut root, name, node)?;
                }
                Event::Text(ref t) => {
                    if let Some((_, Frame::Scalar(text))) = stack.last_mut() {
                        let unescaped = t.unescape()?;
                        text.push_str(&unescaped);
                    }
                }
                Event::CData(ref t) => {
                    if let Some((_, Frame::Scalar(text))) = stack.last_mut() {
                        text.push_str(&String::from_utf8_lossy(t));
                    }
                }
                Event::End(_) => {
                    let (name, frame) = stack.pop().ok_or_else(|| {
                        SolrError::protocol_decode("Unbalanced XML end tag")
                    })?;
                    attach(&mut stack, &mut root, name, frame.close())?;
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if !stack.is_empty() {
            return Err(SolrError::protocol_decode("Truncated XML payload"));
        }
        root.ok_or_else(|| SolrError::protocol_decode("Empty XML payload"))
    }
}

const RESULT_ATTRIBUTES: [&str; 4] = ["numFound", "start", "maxScore", "numFoundExact"];

/// An element that is still open while reading XML.
enum Frame {
    Map(Vec<(String, Node)>),
    List(Vec<Node>),
    Result {
        header: Vec<(String, Node)>,
        docs: Vec<Node>,
    },
    Scalar(String),
    Null,
}

impl Frame {
    fn open(e: &BytesStart<'_>) -> Frame {
        match e.local_name().as_ref() {
            b"arr" => Frame::List(Vec::new()),
            b"result" => {
                let header = RESULT_ATTRIBUTES
                    .iter()
                    .filter_map(|key| {
                        attribute(e, key.as_bytes())
                            .map(|value| (key.to_string(), Node::Scalar(value)))
                    })
                    .collect();
                Frame::Result {
                    header,
                    docs: Vec::new(),
                }
            }
            b"str" | b"int" | b"long" | b"float" | b"double" | b"bool" | b"date" | b"bytes" => {
                Frame::Scalar(String::new())
            }
            b"null" => Frame::Null,
            _ => Frame::Map(Vec::new()),
        }
    }

    fn close(self) -> Node {
        match self {
            Frame::Map(entries) => Node::Map(entries),
            Frame::List(items) => Node::List(items),
            Frame::Result { mut header, docs } => {
                header.push(("docs".to_string(), Node::List(docs)));
                Node::Map(header)
            }
            Frame::Scalar(text) => Node::Scalar(text),
            Frame::Null => Node::Null,
        }
    }
}

fn attach(
    stack: &mut [(Option<String>, Frame)],
    root: &mut Option<Node>,
    name: Option<String>,
    node: Node,
) -> Result<(), SolrError> {
    match stack.last_mut() {
        Some((_, Frame::Map(entries))) => entries.push((name.unwrap_or_default(), node)),
        Some((_, Frame::List(items))) => items.push(node),
        Some((_, Frame::Result { docs, .. })) => docs.push(node),
        Some((_, Frame::Scalar(_))) | Some((_, Frame::Null)) => {
            return Err(SolrError::protocol_decode(
                "Unexpected element inside a scalar value",
            ))
        }
        None => {
            if root.is_some() {
                return Err(SolrError::protocol_decode("Multiple XML root elements"));
            }
            *root = Some(node);
        }
    }
    Ok(())
}

fn attribute(e: &BytesStart<'_>, key: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.local_name().as_ref() == key)
        .map(|attr| {
            attr.unescape_value()
                .map(|v| v.into_owned())
                .unwrap_or_else(|_| String::from_utf8_lossy(&attr.value).into_owned())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_xml_named_lists_and_scalars() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<response>
<lst name="responseHeader"><int name="status">0</int><int name="QTime">3</int></lst>
<arr name="tags"><str>a &amp; b</str><str>日本人</str></arr>
<null name="nothing"/>
</response>"#;

        let root = Node::from_xml(xml).unwrap();
        let header = root.get("responseHeader").unwrap();
        assert_eq!(header.get("status").and_then(Node::as_text), Some("0"));
        assert_eq!(header.get("QTime").and_then(Node::as_text), Some("3"));

        let tags: Vec<&str> = root
            .get("tags")
            .unwrap()
            .items()
            .iter()
            .filter_map(Node::as_text)
            .collect();
        assert_eq!(tags, vec!["a & b", "日本人"]);
        assert_eq!(root.get("nothing"), Some(&Node::Null));
    }

    #[test]
    fn test_xml_result_becomes_map() {
        let xml = r#"<response><result name="response" numFound="2" start="0">
<doc><str name="id">1</str></doc><doc><str name="id">2</str></doc>
</result></response>"#;

        let root = Node::from_xml(xml).unwrap();
        let result = root.get("response").unwrap();
        assert_eq!(result.get("numFound").and_then(Node::as_text), Some("2"));
        assert_eq!(result.get("start").and_then(Node::as_text), Some("0"));
        assert_eq!(result.get("docs").unwrap().items().len(), 2);
    }

    #[test]
    fn test_xml_empty_result_element() {
        let root = Node::from_xml(r#"<response><result name="response" numFound="0" start="0"/></response>"#)
            .unwrap();
        let result = root.get("response").unwrap();
        assert_eq!(result.get("numFound").and_then(Node::as_text), Some("0"));
        assert!(result.get("docs").unwrap().items().is_empty());
    }

    #[test]
    fn test_malformed_xml() {
        assert!(matches!(
            Node::from_xml("<response><lst name=\"responseHeader\">"),
            Err(SolrError::ProtocolDecode(_))
        ));
        assert!(matches!(
            Node::from_xml(""),
            Err(SolrError::ProtocolDecode(_))
        ));
    }

    #[test]
    fn test_json_preserves_key_order() {
        let root = Node::from_json(r#"{"zeta": 1, "alpha": [true, null, 2.5]}"#).unwrap();
        let keys: Vec<&str> = root.entries().iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["zeta", "alpha"]);

        let items = root.get("alpha").unwrap().items();
        assert_eq!(items[0], Node::Scalar("true".to_string()));
        assert_eq!(items[1], Node::Null);
        assert_eq!(items[2], Node::Scalar("2.5".to_string()));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            Node::from_json("{\"responseHeader\":"),
            Err(SolrError::ProtocolDecode(_))
        ));
    }
}
