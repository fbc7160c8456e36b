use serde::{Deserialize, Serialize};
use tracing::warn;

use super::citation::MedlineCitation;
use super::pubmed_data::PubmedData;
use crate::error::{PubMedError, Result};
use crate::xml::{FromXml, XmlDocument, XmlNode, optional_child, required_child};

/// One record of an efetch response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PubmedArticle {
    pub medline_citation: MedlineCitation,
    /// Present once NLM has finished processing the publication history
    pub pubmed_data: Option<PubmedData>,
}

impl PubmedArticle {
    pub fn pmid(&self) -> &str {
        &self.medline_citation.pmid
    }

    pub fn title(&self) -> &str {
        &self.medline_citation.article.title
    }

    /// DOI from the citation's valid `ELocationID`, else from `ArticleIdList`
    pub fn doi(&self) -> Option<&str> {
        self.medline_citation.article.doi().or_else(|| {
            self.pubmed_data
                .as_ref()
                .and_then(|data| data.article_ids.doi.as_deref())
        })
    }

    pub fn pmcid(&self) -> Option<&str> {
        self.pubmed_data
            .as_ref()
            .and_then(|data| data.article_ids.pmc.as_deref())
    }
}

impl FromXml for PubmedArticle {
    fn from_xml(node: &XmlNode) -> Result<Self> {
        Ok(Self {
            medline_citation: MedlineCitation::from_xml(required_child(node, "MedlineCitation")?)?,
            pubmed_data: optional_child(node, "PubmedData", PubmedData::from_xml)?,
        })
    }
}

/// Document type metadata read from the `<!DOCTYPE ...>` declaration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct XmlInfo {
    pub doc_type: Option<String>,
    pub dtd_name: Option<String>,
    pub dtd_url: Option<String>,
}

impl XmlInfo {
    /// Read a declaration body such as
    /// `PubmedArticleSet PUBLIC "-//NLM//DTD PubMedArticle, 1st January 2025//EN" "https://..."`
    pub fn from_doctype(doctype: &str) -> Self {
        let tokens = split_declaration(doctype);
        let token = |i: usize| tokens.get(i).cloned();

        match tokens.get(1).map(String::as_str) {
            Some("PUBLIC") => XmlInfo {
                doc_type: token(0),
                dtd_name: token(2),
                dtd_url: token(3),
            },
            Some("SYSTEM") => XmlInfo {
                doc_type: token(0),
                dtd_name: None,
                dtd_url: token(2),
            },
            _ => XmlInfo {
                doc_type: token(0),
                ..Default::default()
            },
        }
    }
}

/// Whitespace split that keeps quoted strings together and drops the quotes
fn split_declaration(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;

    for c in text.chars() {
        match quote {
            Some(q) if c == q => {
                tokens.push(std::mem::take(&mut current));
                quote = None;
            }
            Some(_) => current.push(c),
            None if c == '"' || c == '\'' => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
                quote = Some(c);
            }
            None if c.is_whitespace() => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            None => current.push(c),
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

/// Top-level container of an efetch response
///
/// An empty set is a valid result for a query that matched nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PubmedArticleSet {
    pub xml_info: XmlInfo,
    pub articles: Vec<PubmedArticle>,
    /// PMIDs listed under `DeleteCitation`
    pub deleted_pmids: Vec<String>,
}

impl PubmedArticleSet {
    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    /// Find an article by PMID
    pub fn get(&self, pmid: &str) -> Option<&PubmedArticle> {
        self.articles.iter().find(|article| article.pmid() == pmid)
    }

    /// Parse EFetch XML, failing on the first bad record
    ///
    /// Same as [`parse_article_set`](crate::pubmed::parse_article_set).
    pub fn from_xml(xml: &str) -> Result<Self> {
        crate::pubmed::parser::parse_article_set(xml)
    }

    /// Build the set from a parsed document, failing on the first bad record
    pub fn from_document(doc: &XmlDocument) -> Result<Self> {
        let root = set_root(doc)?;
        let articles = article_nodes(root)
            .enumerate()
            .map(|(index, node)| parse_indexed(index, node))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            xml_info: doc
                .doctype
                .as_deref()
                .map(XmlInfo::from_doctype)
                .unwrap_or_default(),
            articles,
            deleted_pmids: deleted_pmids(root),
        })
    }
}

pub(crate) fn set_root(doc: &XmlDocument) -> Result<&XmlNode> {
    if doc.root.name() != "PubmedArticleSet" {
        return Err(PubMedError::schema(
            doc.root.path(),
            "expected <PubmedArticleSet> root element",
        ));
    }
    Ok(&doc.root)
}

/// `PubmedArticle` children; book records are skipped
pub(crate) fn article_nodes(root: &XmlNode) -> impl Iterator<Item = &XmlNode> {
    root.children().filter(|node| match node.name() {
        "PubmedArticle" => true,
        "PubmedBookArticle" => {
            let pmid = node
                .child("BookDocument")
                .and_then(|doc| doc.child("PMID"))
                .map(XmlNode::text);
            warn!(pmid = ?pmid, "Skipping PubmedBookArticle record");
            false
        }
        _ => false,
    })
}

/// Parse one record, attaching its position and PMID on failure
pub(crate) fn parse_indexed(index: usize, node: &XmlNode) -> Result<PubmedArticle> {
    PubmedArticle::from_xml(node).map_err(|source| PubMedError::Document {
        index,
        pmid: node
            .child("MedlineCitation")
            .and_then(|citation| citation.child("PMID"))
            .map(XmlNode::text),
        source: Box::new(source),
    })
}

fn deleted_pmids(root: &XmlNode) -> Vec<String> {
    root.children_named("DeleteCitation")
        .flat_map(|delete| delete.children_named("PMID"))
        .map(XmlNode::text)
        .collect()
}
