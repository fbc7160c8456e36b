//! Field extraction helpers over [`XmlNode`]
//!
//! All lookups inspect direct children only. Tags such as `ReferenceList`
//! recur at several depths and a recursive search would flatten them.

use super::XmlNode;
use crate::error::{PubMedError, Result};

/// Types constructed from the subtree rooted at one element
pub trait FromXml: Sized {
    fn from_xml(node: &XmlNode) -> Result<Self>;
}

/// Text of the first direct child named `tag`, or `None` when there is none
pub fn optional_child_text(node: &XmlNode, tag: &str) -> Option<String> {
    node.child(tag).map(XmlNode::text)
}

/// First direct child named `tag`, which the grammar requires to exist
pub fn required_child<'a>(node: &'a XmlNode, tag: &str) -> Result<&'a XmlNode> {
    node.child(tag).ok_or_else(|| {
        PubMedError::schema(node.path(), format!("required element <{}> is missing", tag))
    })
}

pub fn required_child_text(node: &XmlNode, tag: &str) -> Result<String> {
    required_child(node, tag).map(XmlNode::text)
}

/// Child text parsed as an unsigned integer
///
/// Absence is `Ok(None)`; non-numeric text is [`PubMedError::MalformedField`].
pub fn optional_child_int(node: &XmlNode, tag: &str) -> Result<Option<u64>> {
    let Some(child) = node.child(tag) else {
        return Ok(None);
    };
    let text = child.text();
    text.parse::<u64>()
        .map(Some)
        .map_err(|_| PubMedError::MalformedField {
            path: child.path().to_string(),
            value: text,
            expected: "integer",
        })
}

/// Attribute value, or `default` when the attribute is not present
pub fn attribute_or_default<'a>(node: &'a XmlNode, attr: &str, default: &'a str) -> &'a str {
    node.attribute(attr).unwrap_or(default)
}

pub fn required_attribute<'a>(node: &'a XmlNode, attr: &str) -> Result<&'a str> {
    node.attribute(attr).ok_or_else(|| {
        PubMedError::schema(node.path(), format!("required attribute {} is missing", attr))
    })
}

/// `Y`/`N` flag attribute, `default` when absent
pub fn optional_attribute_flag(node: &XmlNode, attr: &str, default: bool) -> Result<bool> {
    match node.attribute(attr) {
        None => Ok(default),
        Some("Y") => Ok(true),
        Some("N") => Ok(false),
        Some(other) => Err(PubMedError::schema(
            node.path(),
            format!("attribute {} must be Y or N, found {:?}", attr, other),
        )),
    }
}

/// Every direct child of `parent` named `tag`, mapped through `constructor`
///
/// A missing parent or no matches yields an empty vector.
pub fn child_list<T, F>(parent: Option<&XmlNode>, tag: &str, constructor: F) -> Result<Vec<T>>
where
    F: Fn(&XmlNode) -> Result<T>,
{
    match parent {
        Some(node) => node.children_named(tag).map(constructor).collect(),
        None => Ok(Vec::new()),
    }
}

/// Text of every direct child of `parent` named `tag`
pub fn child_texts(parent: Option<&XmlNode>, tag: &str) -> Vec<String> {
    parent
        .map(|node| node.children_named(tag).map(XmlNode::text).collect())
        .unwrap_or_default()
}

/// `constructor` applied to the first direct child named `tag`, if any
pub fn optional_child<T, F>(node: &XmlNode, tag: &str, constructor: F) -> Result<Option<T>>
where
    F: FnOnce(&XmlNode) -> Result<T>,
{
    node.child(tag).map(constructor).transpose()
}
