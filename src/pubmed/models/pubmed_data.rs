use serde::{Deserialize, Serialize};

use super::dates::PubMedPubDate;
use super::identifiers::{ArticleId, ArticleIds};
use crate::error::Result;
use crate::xml::{
    FromXml, XmlNode, child_list, optional_child_text, required_attribute, required_child,
    required_child_text,
};

/// One cited work
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    pub citation: String,
    pub article_ids: Vec<ArticleId>,
}

impl FromXml for Reference {
    fn from_xml(node: &XmlNode) -> Result<Self> {
        Ok(Self {
            citation: required_child_text(node, "Citation")?,
            article_ids: child_list(node.child("ArticleIdList"), "ArticleId", ArticleId::from_xml)?,
        })
    }
}

/// Bibliography, possibly split into titled sub-lists
///
/// Nested lists are owned by their parent; only direct children are read at
/// each level so the section structure is preserved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceList {
    pub title: Option<String>,
    pub references: Vec<Reference>,
    pub nested: Vec<ReferenceList>,
}

impl ReferenceList {
    /// Number of references in this list and all nested lists
    pub fn total_references(&self) -> usize {
        self.references.len()
            + self
                .nested
                .iter()
                .map(ReferenceList::total_references)
                .sum::<usize>()
    }
}

impl FromXml for ReferenceList {
    fn from_xml(node: &XmlNode) -> Result<Self> {
        Ok(Self {
            title: optional_child_text(node, "Title"),
            references: child_list(Some(node), "Reference", Reference::from_xml)?,
            nested: child_list(Some(node), "ReferenceList", ReferenceList::from_xml)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectParam {
    pub name: String,
    pub value: String,
}

/// Entry of an `ObjectList`, e.g. a link to an associated dataset or image
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleObject {
    pub object_type: String,
    pub params: Vec<ObjectParam>,
}

impl FromXml for ArticleObject {
    fn from_xml(node: &XmlNode) -> Result<Self> {
        Ok(Self {
            object_type: required_attribute(node, "Type")?.to_string(),
            params: child_list(Some(node), "Param", |param| {
                Ok(ObjectParam {
                    name: required_attribute(param, "Name")?.to_string(),
                    value: param.text(),
                })
            })?,
        })
    }
}

/// Processing metadata NLM attaches once the record is indexed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PubmedData {
    pub history: Vec<PubMedPubDate>,
    pub publication_status: String,
    pub article_ids: ArticleIds,
    pub objects: Vec<ArticleObject>,
    pub reference_lists: Vec<ReferenceList>,
}

impl PubmedData {
    /// First history event with the given status (`"received"`, `"pubmed"`, ...)
    pub fn history_date(&self, status: &str) -> Option<&PubMedPubDate> {
        self.history.iter().find(|date| date.pub_status == status)
    }
}

impl FromXml for PubmedData {
    fn from_xml(node: &XmlNode) -> Result<Self> {
        Ok(Self {
            history: child_list(node.child("History"), "PubMedPubDate", PubMedPubDate::from_xml)?,
            publication_status: required_child_text(node, "PublicationStatus")?,
            article_ids: ArticleIds::from_xml(required_child(node, "ArticleIdList")?)?,
            objects: child_list(node.child("ObjectList"), "Object", ArticleObject::from_xml)?,
            reference_lists: child_list(Some(node), "ReferenceList", ReferenceList::from_xml)?,
        })
    }
}
