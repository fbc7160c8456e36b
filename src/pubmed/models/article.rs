use serde::{Deserialize, Serialize};

use super::author::Author;
use super::dates::ArticleDate;
use super::identifiers::{ELocationId, ELocationIdType};
use super::journal::{Journal, Pagination};
use crate::error::{PubMedError, Result};
use crate::xml::{
    FromXml, XmlNode, attribute_or_default, child_list, child_texts, optional_attribute_flag,
    optional_child, optional_child_text, required_attribute, required_child, required_child_text,
};

/// One labelled (or unlabelled) paragraph of an abstract
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbstractText {
    pub label: Option<String>,
    pub nlm_category: Option<String>,
    pub text: String,
}

impl FromXml for AbstractText {
    fn from_xml(node: &XmlNode) -> Result<Self> {
        Ok(Self {
            label: node.attribute("Label").map(str::to_string),
            nlm_category: node.attribute("NlmCategory").map(str::to_string),
            text: node.text(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Abstract {
    pub texts: Vec<AbstractText>,
    pub copyright: Option<String>,
}

impl Abstract {
    /// Paragraphs joined with blank lines, labels prefixed as `LABEL: `
    pub fn full_text(&self) -> String {
        self.texts
            .iter()
            .map(|t| match &t.label {
                Some(label) => format!("{}: {}", label, t.text),
                None => t.text.clone(),
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

impl FromXml for Abstract {
    fn from_xml(node: &XmlNode) -> Result<Self> {
        Ok(Self {
            texts: child_list(Some(node), "AbstractText", AbstractText::from_xml)?,
            copyright: optional_child_text(node, "CopyrightInformation"),
        })
    }
}

/// Abstract supplied by a source other than the publisher (translations, plain-language summaries)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtherAbstract {
    pub abstract_type: String,
    pub language: String,
    pub texts: Vec<AbstractText>,
    pub copyright: Option<String>,
}

impl FromXml for OtherAbstract {
    fn from_xml(node: &XmlNode) -> Result<Self> {
        Ok(Self {
            abstract_type: required_attribute(node, "Type")?.to_string(),
            language: attribute_or_default(node, "Language", "eng").to_string(),
            texts: child_list(Some(node), "AbstractText", AbstractText::from_xml)?,
            copyright: optional_child_text(node, "CopyrightInformation"),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grant {
    pub grant_id: Option<String>,
    pub acronym: Option<String>,
    pub agency: String,
    pub country: Option<String>,
}

impl FromXml for Grant {
    fn from_xml(node: &XmlNode) -> Result<Self> {
        Ok(Self {
            grant_id: optional_child_text(node, "GrantID"),
            acronym: optional_child_text(node, "Acronym"),
            agency: required_child_text(node, "Agency")?,
            country: optional_child_text(node, "Country"),
        })
    }
}

/// Accession numbers deposited in one external data bank (GenBank, ClinicalTrials.gov, ...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataBank {
    pub name: String,
    pub accession_numbers: Vec<String>,
}

impl FromXml for DataBank {
    fn from_xml(node: &XmlNode) -> Result<Self> {
        Ok(Self {
            name: required_child_text(node, "DataBankName")?,
            accession_numbers: child_texts(node.child("AccessionNumberList"), "AccessionNumber"),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicationType {
    pub name: String,
    pub ui: String,
}

impl FromXml for PublicationType {
    fn from_xml(node: &XmlNode) -> Result<Self> {
        Ok(Self {
            name: node.text(),
            ui: required_attribute(node, "UI")?.to_string(),
        })
    }
}

/// Where the article can be found: print pages or electronic locations only
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArticleLocation {
    Paginated {
        pagination: Pagination,
        elocation_ids: Vec<ELocationId>,
    },
    Electronic(Vec<ELocationId>),
}

impl ArticleLocation {
    pub fn pagination(&self) -> Option<&Pagination> {
        match self {
            ArticleLocation::Paginated { pagination, .. } => Some(pagination),
            ArticleLocation::Electronic(_) => None,
        }
    }

    /// Every `ELocationID`, including ones flagged invalid
    pub fn elocation_ids(&self) -> &[ELocationId] {
        match self {
            ArticleLocation::Paginated { elocation_ids, .. } => elocation_ids,
            ArticleLocation::Electronic(ids) => ids,
        }
    }

    fn from_article(node: &XmlNode) -> Result<Self> {
        let elocation_ids = child_list(Some(node), "ELocationID", ELocationId::from_xml)?;
        match node.child("Pagination") {
            Some(pagination) => Ok(ArticleLocation::Paginated {
                pagination: Pagination::from_xml(pagination)?,
                elocation_ids,
            }),
            None if !elocation_ids.is_empty() => Ok(ArticleLocation::Electronic(elocation_ids)),
            None => Err(PubMedError::schema(
                node.path(),
                "article needs <Pagination> or at least one <ELocationID>",
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub pub_model: String,
    pub journal: Journal,
    pub title: String,
    pub location: ArticleLocation,
    pub abstract_section: Option<Abstract>,
    pub authors: Vec<Author>,
    pub author_list_complete: bool,
    pub languages: Vec<String>,
    pub databanks: Vec<DataBank>,
    pub grants: Vec<Grant>,
    pub grant_list_complete: bool,
    pub publication_types: Vec<PublicationType>,
    pub vernacular_title: Option<String>,
    pub article_dates: Vec<ArticleDate>,
}

impl Article {
    /// DOI from a valid `ELocationID`
    pub fn doi(&self) -> Option<&str> {
        self.valid_elocation(ELocationIdType::Doi)
    }

    /// Publisher item identifier from a valid `ELocationID`
    pub fn pii(&self) -> Option<&str> {
        self.valid_elocation(ELocationIdType::Pii)
    }

    fn valid_elocation(&self, id_type: ELocationIdType) -> Option<&str> {
        self.location
            .elocation_ids()
            .iter()
            .find(|id| id.valid && id.id_type == id_type)
            .map(|id| id.value.as_str())
    }

    pub fn abstract_text(&self) -> Option<String> {
        self.abstract_section.as_ref().map(Abstract::full_text)
    }
}

impl FromXml for Article {
    fn from_xml(node: &XmlNode) -> Result<Self> {
        let author_list = node.child("AuthorList");
        let grant_list = node.child("GrantList");
        let languages = child_texts(Some(node), "Language");
        let publication_types = child_list(
            node.child("PublicationTypeList"),
            "PublicationType",
            PublicationType::from_xml,
        )?;

        let article = Self {
            pub_model: required_attribute(node, "PubModel")?.to_string(),
            journal: Journal::from_xml(required_child(node, "Journal")?)?,
            title: required_child_text(node, "ArticleTitle")?,
            location: ArticleLocation::from_article(node)?,
            abstract_section: optional_child(node, "Abstract", Abstract::from_xml)?,
            authors: child_list(author_list, "Author", Author::from_xml)?,
            author_list_complete: match author_list {
                Some(list) => optional_attribute_flag(list, "CompleteYN", true)?,
                None => true,
            },
            languages,
            databanks: child_list(node.child("DataBankList"), "DataBank", DataBank::from_xml)?,
            grants: child_list(grant_list, "Grant", Grant::from_xml)?,
            grant_list_complete: match grant_list {
                Some(list) => optional_attribute_flag(list, "CompleteYN", true)?,
                None => true,
            },
            publication_types,
            vernacular_title: optional_child_text(node, "VernacularTitle"),
            article_dates: child_list(Some(node), "ArticleDate", ArticleDate::from_xml)?,
        };

        if article.languages.is_empty() {
            return Err(PubMedError::schema(node.path(), "article has no <Language>"));
        }
        if article.publication_types.is_empty() {
            return Err(PubMedError::schema(
                node.path(),
                "article has no <PublicationType>",
            ));
        }

        Ok(article)
    }
}
