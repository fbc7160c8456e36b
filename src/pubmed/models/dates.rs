use serde::{Deserialize, Serialize};

use crate::error::{PubMedError, Result};
use crate::xml::{
    FromXml, XmlNode, attribute_or_default, optional_child_text, required_attribute,
    required_child_text,
};

/// Fully specified calendar date (`DateCompleted`, `DateRevised`)
///
/// Components stay as the zero-padded strings found in the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Date {
    pub year: String,
    pub month: String,
    pub day: String,
}

impl FromXml for Date {
    fn from_xml(node: &XmlNode) -> Result<Self> {
        Ok(Self {
            year: required_child_text(node, "Year")?,
            month: required_child_text(node, "Month")?,
            day: required_child_text(node, "Day")?,
        })
    }
}

/// Publication date of the article itself, usually the electronic date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleDate {
    pub date_type: String,
    pub year: String,
    pub month: String,
    pub day: String,
}

impl FromXml for ArticleDate {
    fn from_xml(node: &XmlNode) -> Result<Self> {
        Ok(Self {
            date_type: attribute_or_default(node, "DateType", "Electronic").to_string(),
            year: required_child_text(node, "Year")?,
            month: required_child_text(node, "Month")?,
            day: required_child_text(node, "Day")?,
        })
    }
}

/// Issue publication date
///
/// Either a structured date (year with an optional month/day or season) or a
/// free-text `MedlineDate` such as `"1998 Dec-1999 Jan"` when the issue spans
/// irregular periods.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PubDate {
    Structured {
        year: String,
        month: Option<String>,
        day: Option<String>,
        season: Option<String>,
    },
    Medline(String),
}

impl PubDate {
    /// Year of a structured date; `None` for free-text dates
    pub fn year(&self) -> Option<&str> {
        match self {
            PubDate::Structured { year, .. } => Some(year.as_str()),
            PubDate::Medline(_) => None,
        }
    }

    /// Human readable rendering, e.g. `"2015 Jun 12"` or `"2015 Spring"`
    pub fn display(&self) -> String {
        match self {
            PubDate::Medline(text) => text.clone(),
            PubDate::Structured {
                year,
                month,
                day,
                season,
            } => [Some(year), month.as_ref(), day.as_ref(), season.as_ref()]
                .into_iter()
                .flatten()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(" "),
        }
    }
}

impl FromXml for PubDate {
    fn from_xml(node: &XmlNode) -> Result<Self> {
        if let Some(text) = optional_child_text(node, "MedlineDate") {
            return Ok(PubDate::Medline(text));
        }

        let year = optional_child_text(node, "Year").ok_or_else(|| {
            PubMedError::schema(node.path(), "PubDate needs either <Year> or <MedlineDate>")
        })?;
        let month = optional_child_text(node, "Month");
        let season = optional_child_text(node, "Season");
        if month.is_some() && season.is_some() {
            return Err(PubMedError::schema(
                node.path(),
                "PubDate cannot carry both <Month> and <Season>",
            ));
        }

        Ok(PubDate::Structured {
            year,
            month,
            day: optional_child_text(node, "Day"),
            season,
        })
    }
}

/// One dated event in the publication history (received, accepted, ...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PubMedPubDate {
    pub pub_status: String,
    pub year: String,
    pub month: String,
    pub day: String,
    pub hour: Option<String>,
    pub minute: Option<String>,
}

impl FromXml for PubMedPubDate {
    fn from_xml(node: &XmlNode) -> Result<Self> {
        Ok(Self {
            pub_status: required_attribute(node, "PubStatus")?.to_string(),
            year: required_child_text(node, "Year")?,
            month: required_child_text(node, "Month")?,
            day: required_child_text(node, "Day")?,
            hour: optional_child_text(node, "Hour"),
            minute: optional_child_text(node, "Minute"),
        })
    }
}
