use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{PubMedError, Result};
use crate::xml::{
    FromXml, XmlNode, attribute_or_default, child_list, optional_attribute_flag, required_attribute,
    required_child_text,
};

/// Source-tagged identifier attached to an author or affiliation (ORCID, ISNI, ...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identifier {
    pub source: String,
    pub value: String,
}

impl FromXml for Identifier {
    fn from_xml(node: &XmlNode) -> Result<Self> {
        Ok(Self {
            source: required_attribute(node, "Source")?.to_string(),
            value: node.text(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AffiliationInfo {
    pub affiliation: String,
    pub identifiers: Vec<Identifier>,
}

impl FromXml for AffiliationInfo {
    fn from_xml(node: &XmlNode) -> Result<Self> {
        Ok(Self {
            affiliation: required_child_text(node, "Affiliation")?,
            identifiers: child_list(Some(node), "Identifier", Identifier::from_xml)?,
        })
    }
}

/// Identifier assigned by another organization (`OtherID`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtherId {
    pub source: String,
    pub value: String,
}

impl FromXml for OtherId {
    fn from_xml(node: &XmlNode) -> Result<Self> {
        Ok(Self {
            source: required_attribute(node, "Source")?.to_string(),
            value: node.text(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ELocationIdType {
    Doi,
    Pii,
}

/// Electronic location of the article (`ELocationID`)
///
/// Identifiers flagged `ValidYN="N"` are kept here but never promoted to
/// [`Article::doi`](super::Article::doi) or [`Article::pii`](super::Article::pii).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ELocationId {
    pub id_type: ELocationIdType,
    pub valid: bool,
    pub value: String,
}

impl FromXml for ELocationId {
    fn from_xml(node: &XmlNode) -> Result<Self> {
        let id_type = match required_attribute(node, "EIdType")? {
            "doi" => ELocationIdType::Doi,
            "pii" => ELocationIdType::Pii,
            other => {
                return Err(PubMedError::schema(
                    node.path(),
                    format!("unknown EIdType {:?}", other),
                ));
            }
        };

        Ok(Self {
            id_type,
            valid: optional_attribute_flag(node, "ValidYN", true)?,
            value: node.text(),
        })
    }
}

/// Kinds of identifier allowed in an `ArticleIdList`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArticleIdType {
    Doi,
    Pii,
    Pmcpid,
    Pmpid,
    Pmc,
    Mid,
    Sici,
    Pubmed,
    Medline,
    Pmcid,
    Pmcbook,
    Bookaccession,
}

impl ArticleIdType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArticleIdType::Doi => "doi",
            ArticleIdType::Pii => "pii",
            ArticleIdType::Pmcpid => "pmcpid",
            ArticleIdType::Pmpid => "pmpid",
            ArticleIdType::Pmc => "pmc",
            ArticleIdType::Mid => "mid",
            ArticleIdType::Sici => "sici",
            ArticleIdType::Pubmed => "pubmed",
            ArticleIdType::Medline => "medline",
            ArticleIdType::Pmcid => "pmcid",
            ArticleIdType::Pmcbook => "pmcbook",
            ArticleIdType::Bookaccession => "bookaccession",
        }
    }
}

impl fmt::Display for ArticleIdType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArticleIdType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s {
            "doi" => ArticleIdType::Doi,
            "pii" => ArticleIdType::Pii,
            "pmcpid" => ArticleIdType::Pmcpid,
            "pmpid" => ArticleIdType::Pmpid,
            "pmc" => ArticleIdType::Pmc,
            "mid" => ArticleIdType::Mid,
            "sici" => ArticleIdType::Sici,
            "pubmed" => ArticleIdType::Pubmed,
            "medline" => ArticleIdType::Medline,
            "pmcid" => ArticleIdType::Pmcid,
            "pmcbook" => ArticleIdType::Pmcbook,
            "bookaccession" => ArticleIdType::Bookaccession,
            other => return Err(format!("unknown IdType {:?}", other)),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleId {
    pub id_type: ArticleIdType,
    pub value: String,
}

impl FromXml for ArticleId {
    fn from_xml(node: &XmlNode) -> Result<Self> {
        let id_type = attribute_or_default(node, "IdType", "pubmed")
            .parse::<ArticleIdType>()
            .map_err(|message| PubMedError::schema(node.path(), message))?;
        Ok(Self {
            id_type,
            value: node.text(),
        })
    }
}

/// Named view over an `ArticleIdList`
///
/// Each typed slot holds the first identifier of that type; `all` keeps the
/// full list in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleIds {
    pub doi: Option<String>,
    pub pii: Option<String>,
    pub pmcpid: Option<String>,
    pub pmpid: Option<String>,
    pub pmc: Option<String>,
    pub mid: Option<String>,
    pub sici: Option<String>,
    pub pubmed: Option<String>,
    pub medline: Option<String>,
    pub pmcid: Option<String>,
    pub pmcbook: Option<String>,
    pub bookaccession: Option<String>,
    pub all: Vec<ArticleId>,
}

impl ArticleIds {
    fn slot(&mut self, id_type: ArticleIdType) -> &mut Option<String> {
        match id_type {
            ArticleIdType::Doi => &mut self.doi,
            ArticleIdType::Pii => &mut self.pii,
            ArticleIdType::Pmcpid => &mut self.pmcpid,
            ArticleIdType::Pmpid => &mut self.pmpid,
            ArticleIdType::Pmc => &mut self.pmc,
            ArticleIdType::Mid => &mut self.mid,
            ArticleIdType::Sici => &mut self.sici,
            ArticleIdType::Pubmed => &mut self.pubmed,
            ArticleIdType::Medline => &mut self.medline,
            ArticleIdType::Pmcid => &mut self.pmcid,
            ArticleIdType::Pmcbook => &mut self.pmcbook,
            ArticleIdType::Bookaccession => &mut self.bookaccession,
        }
    }

    /// First identifier of the given type
    pub fn get(&self, id_type: ArticleIdType) -> Option<&str> {
        self.all
            .iter()
            .find(|id| id.id_type == id_type)
            .map(|id| id.value.as_str())
    }
}

impl FromIterator<ArticleId> for ArticleIds {
    fn from_iter<I: IntoIterator<Item = ArticleId>>(iter: I) -> Self {
        let mut ids = ArticleIds::default();
        for id in iter {
            let slot = ids.slot(id.id_type);
            if slot.is_none() {
                *slot = Some(id.value.clone());
            }
            ids.all.push(id);
        }
        ids
    }
}

impl FromXml for ArticleIds {
    fn from_xml(node: &XmlNode) -> Result<Self> {
        Ok(child_list(Some(node), "ArticleId", ArticleId::from_xml)?
            .into_iter()
            .collect())
    }
}
