use serde::{Deserialize, Serialize};

use super::dates::PubDate;
use crate::error::{PubMedError, Result};
use crate::xml::{
    FromXml, XmlNode, optional_child_text, required_attribute, required_child, required_child_text,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalIssue {
    pub cited_medium: String,
    pub volume: Option<String>,
    pub issue: Option<String>,
    pub pub_date: PubDate,
}

impl FromXml for JournalIssue {
    fn from_xml(node: &XmlNode) -> Result<Self> {
        Ok(Self {
            cited_medium: required_attribute(node, "CitedMedium")?.to_string(),
            volume: optional_child_text(node, "Volume"),
            issue: optional_child_text(node, "Issue"),
            pub_date: PubDate::from_xml(required_child(node, "PubDate")?)?,
        })
    }
}

/// Journal the article appeared in
///
/// The record carries at most one `ISSN` element whose `IssnType` decides
/// which slot it fills. Any type other than `Electronic` or `Print` is a
/// schema violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Journal {
    pub issn_electronic: Option<String>,
    pub issn_print: Option<String>,
    pub journal_issue: JournalIssue,
    pub title: Option<String>,
    pub iso_abbreviation: Option<String>,
}

impl FromXml for Journal {
    fn from_xml(node: &XmlNode) -> Result<Self> {
        let mut issn_electronic = None;
        let mut issn_print = None;

        for issn in node.children_named("ISSN") {
            match required_attribute(issn, "IssnType")? {
                "Electronic" => issn_electronic = Some(issn.text()),
                "Print" => issn_print = Some(issn.text()),
                other => {
                    return Err(PubMedError::schema(
                        issn.path(),
                        format!("IssnType must be Electronic or Print, found {:?}", other),
                    ));
                }
            }
        }

        Ok(Self {
            issn_electronic,
            issn_print,
            journal_issue: JournalIssue::from_xml(required_child(node, "JournalIssue")?)?,
            title: optional_child_text(node, "Title"),
            iso_abbreviation: optional_child_text(node, "ISOAbbreviation"),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedlineJournalInfo {
    pub country: Option<String>,
    pub medline_ta: String,
    pub nlm_unique_id: Option<String>,
    pub issn_linking: Option<String>,
}

impl FromXml for MedlineJournalInfo {
    fn from_xml(node: &XmlNode) -> Result<Self> {
        Ok(Self {
            country: optional_child_text(node, "Country"),
            medline_ta: required_child_text(node, "MedlineTA")?,
            nlm_unique_id: optional_child_text(node, "NlmUniqueID"),
            issn_linking: optional_child_text(node, "ISSNLinking"),
        })
    }
}

/// Page range, either structured or as a Medline pagination string
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub start_page: Option<String>,
    pub end_page: Option<String>,
    pub medline_pgn: Option<String>,
}

impl FromXml for Pagination {
    fn from_xml(node: &XmlNode) -> Result<Self> {
        let pagination = Self {
            start_page: optional_child_text(node, "StartPage"),
            end_page: optional_child_text(node, "EndPage"),
            medline_pgn: optional_child_text(node, "MedlinePgn"),
        };
        if pagination.start_page.is_none() && pagination.medline_pgn.is_none() {
            return Err(PubMedError::schema(
                node.path(),
                "Pagination needs <StartPage> or <MedlinePgn>",
            ));
        }
        Ok(pagination)
    }
}
