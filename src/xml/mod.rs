//! Owned XML element tree
//!
//! E-utilities payloads are small enough to materialize in full, and the
//! document model looks children up by tag name rather than by position, so
//! the parser builds a plain tree with `quick_xml::Reader` and hands out
//! borrowed [`XmlNode`]s. Each node remembers its tag path from the root for
//! error messages.

mod accessors;

pub use accessors::{
    FromXml, attribute_or_default, child_list, child_texts, optional_attribute_flag,
    optional_child, optional_child_int, optional_child_text, required_attribute, required_child,
    required_child_text,
};

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use tracing::instrument;

use crate::error::{PubMedError, Result};

/// A parsed XML document: optional DOCTYPE text plus the root element
#[derive(Debug, Clone, PartialEq)]
pub struct XmlDocument {
    pub doctype: Option<String>,
    pub root: XmlNode,
}

/// One element with its attributes and mixed content
#[derive(Debug, Clone, PartialEq)]
pub struct XmlNode {
    name: String,
    path: String,
    attributes: Vec<(String, String)>,
    content: Vec<XmlContent>,
}

#[derive(Debug, Clone, PartialEq)]
enum XmlContent {
    Element(XmlNode),
    Text(String),
}

impl XmlDocument {
    /// Parse a complete document
    ///
    /// Fails with [`PubMedError::XmlError`] when the input is not well-formed
    /// or has no root element. Content after the root element is ignored.
    #[instrument(skip(xml), fields(xml_size = xml.len()))]
    pub fn parse(xml: &str) -> Result<Self> {
        let mut reader = make_reader(xml);
        let mut doctype = None;
        let mut stack: Vec<XmlNode> = Vec::new();

        loop {
            match reader.read_event()? {
                Event::Start(e) => {
                    let parent = stack.last().map(|n| n.path.as_str());
                    stack.push(XmlNode::open(&e, parent)?);
                }
                Event::End(_) => {
                    let node = stack
                        .pop()
                        .ok_or_else(|| PubMedError::XmlError("unbalanced end tag".to_string()))?;
                    match stack.last_mut() {
                        Some(parent) => parent.content.push(XmlContent::Element(node)),
                        None => return Ok(XmlDocument { doctype, root: node }),
                    }
                }
                Event::Text(e) => {
                    if let Some(node) = stack.last_mut() {
                        let text = e.unescape()?;
                        if !text.is_empty() {
                            node.content.push(XmlContent::Text(text.into_owned()));
                        }
                    }
                }
                Event::CData(e) => {
                    if let Some(node) = stack.last_mut() {
                        let text = String::from_utf8_lossy(&e).into_owned();
                        node.content.push(XmlContent::Text(text));
                    }
                }
                Event::DocType(e) => {
                    doctype = Some(String::from_utf8_lossy(&e).trim().to_string());
                }
                Event::Eof => {
                    let message = if stack.is_empty() {
                        "document has no root element"
                    } else {
                        "unexpected end of document"
                    };
                    return Err(PubMedError::XmlError(message.to_string()));
                }
                _ => {}
            }
        }
    }
}

fn make_reader(content: &str) -> Reader<&[u8]> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().expand_empty_elements = true;
    reader
}

impl XmlNode {
    fn open(start: &BytesStart, parent_path: Option<&str>) -> Result<Self> {
        let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
        let path = match parent_path {
            Some(parent) => format!("{}/{}", parent, name),
            None => name.clone(),
        };

        let mut attributes = Vec::new();
        for attr in start.attributes() {
            let attr = attr.map_err(|e| PubMedError::XmlError(format!("{}: {}", path, e)))?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr.unescape_value()?.into_owned();
            attributes.push((key, value));
        }

        Ok(Self {
            name,
            path,
            attributes,
            content: Vec::new(),
        })
    }

    /// Tag name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Slash-separated tag path from the document root
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Direct child elements in document order
    pub fn children(&self) -> impl Iterator<Item = &XmlNode> {
        self.content.iter().filter_map(|c| match c {
            XmlContent::Element(node) => Some(node),
            XmlContent::Text(_) => None,
        })
    }

    /// Direct child elements with the given tag; never descends further
    pub fn children_named<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a XmlNode> {
        self.children().filter(move |node| node.name == tag)
    }

    /// First direct child with the given tag
    pub fn child(&self, tag: &str) -> Option<&XmlNode> {
        self.children().find(|node| node.name == tag)
    }

    /// Concatenated text of this element and all descendants, trimmed
    ///
    /// Inline markup such as `<i>` or `<sup>` is flattened into its text.
    pub fn text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out.trim().to_string()
    }

    fn collect_text(&self, out: &mut String) {
        for item in &self.content {
            match item {
                XmlContent::Text(text) => out.push_str(text),
                XmlContent::Element(node) => node.collect_text(out),
            }
        }
    }
}
