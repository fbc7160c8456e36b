use serde::{Deserialize, Serialize};

use super::identifiers::{AffiliationInfo, Identifier};
use crate::error::{PubMedError, Result};
use crate::xml::{
    FromXml, XmlNode, child_list, optional_attribute_flag, optional_child_text, required_child_text,
};

/// Either a person or a collective (group) author, never both
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthorName {
    Personal {
        last_name: String,
        fore_name: Option<String>,
        initials: Option<String>,
        suffix: Option<String>,
    },
    Collective(String),
}

impl FromXml for AuthorName {
    /// Resolved by which of `LastName` / `CollectiveName` is present
    fn from_xml(node: &XmlNode) -> Result<Self> {
        match (
            optional_child_text(node, "LastName"),
            optional_child_text(node, "CollectiveName"),
        ) {
            (Some(last_name), None) => Ok(AuthorName::Personal {
                last_name,
                fore_name: optional_child_text(node, "ForeName"),
                initials: optional_child_text(node, "Initials"),
                suffix: optional_child_text(node, "Suffix"),
            }),
            (None, Some(collective)) => Ok(AuthorName::Collective(collective)),
            (Some(_), Some(_)) => Err(PubMedError::schema(
                node.path(),
                "author has both <LastName> and <CollectiveName>",
            )),
            (None, None) => Err(PubMedError::schema(
                node.path(),
                "author needs <LastName> or <CollectiveName>",
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub name: AuthorName,
    pub valid: bool,
    pub equal_contrib: bool,
    pub identifiers: Vec<Identifier>,
    pub affiliations: Vec<AffiliationInfo>,
}

impl Author {
    pub fn last_name(&self) -> Option<&str> {
        match &self.name {
            AuthorName::Personal { last_name, .. } => Some(last_name.as_str()),
            AuthorName::Collective(_) => None,
        }
    }

    pub fn collective_name(&self) -> Option<&str> {
        match &self.name {
            AuthorName::Collective(name) => Some(name.as_str()),
            AuthorName::Personal { .. } => None,
        }
    }

    /// "ForeName LastName" for people, the group name for collectives
    pub fn full_name(&self) -> String {
        match &self.name {
            AuthorName::Personal {
                last_name,
                fore_name: Some(fore_name),
                ..
            } => format!("{} {}", fore_name, last_name),
            AuthorName::Personal { last_name, .. } => last_name.clone(),
            AuthorName::Collective(name) => name.clone(),
        }
    }

    pub fn orcid(&self) -> Option<&str> {
        self.identifiers
            .iter()
            .find(|id| id.source == "ORCID")
            .map(|id| id.value.as_str())
    }
}

impl FromXml for Author {
    fn from_xml(node: &XmlNode) -> Result<Self> {
        Ok(Self {
            name: AuthorName::from_xml(node)?,
            valid: optional_attribute_flag(node, "ValidYN", true)?,
            equal_contrib: optional_attribute_flag(node, "EqualContrib", false)?,
            identifiers: child_list(Some(node), "Identifier", Identifier::from_xml)?,
            affiliations: child_list(Some(node), "AffiliationInfo", AffiliationInfo::from_xml)?,
        })
    }
}

/// Person credited with data collection rather than authorship
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Investigator {
    pub last_name: String,
    pub fore_name: Option<String>,
    pub initials: Option<String>,
    pub suffix: Option<String>,
    pub valid: bool,
    pub identifiers: Vec<Identifier>,
    pub affiliations: Vec<AffiliationInfo>,
}

impl FromXml for Investigator {
    fn from_xml(node: &XmlNode) -> Result<Self> {
        Ok(Self {
            last_name: required_child_text(node, "LastName")?,
            fore_name: optional_child_text(node, "ForeName"),
            initials: optional_child_text(node, "Initials"),
            suffix: optional_child_text(node, "Suffix"),
            valid: optional_attribute_flag(node, "ValidYN", true)?,
            identifiers: child_list(Some(node), "Identifier", Identifier::from_xml)?,
            affiliations: child_list(Some(node), "AffiliationInfo", AffiliationInfo::from_xml)?,
        })
    }
}

/// Person the article is about (biographies, obituaries)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalNameSubject {
    pub last_name: String,
    pub fore_name: Option<String>,
    pub initials: Option<String>,
    pub suffix: Option<String>,
}

impl FromXml for PersonalNameSubject {
    fn from_xml(node: &XmlNode) -> Result<Self> {
        Ok(Self {
            last_name: required_child_text(node, "LastName")?,
            fore_name: optional_child_text(node, "ForeName"),
            initials: optional_child_text(node, "Initials"),
            suffix: optional_child_text(node, "Suffix"),
        })
    }
}
