//! Entry points for EFetch XML
//!
//! [`parse_article_set`] is all-or-nothing. [`parse_article_results`] gives
//! one result per record so bulk consumers can skip the bad ones; each
//! failure names the record's position and PMID.

use tracing::{debug, instrument, warn};

use crate::error::Result;
use crate::pubmed::models::{
    PubmedArticle, PubmedArticleSet, article_nodes, parse_indexed, set_root,
};
use crate::xml::XmlDocument;

/// Parse a `PubmedArticleSet` document
///
/// Fails on the first record that does not parse, with
/// [`PubMedError::Document`](crate::error::PubMedError::Document) carrying its
/// index and PMID.
///
/// # Example
///
/// ```
/// use pubmed_entrez::pubmed::parse_article_set;
///
/// let set = parse_article_set("<PubmedArticleSet></PubmedArticleSet>")?;
/// assert!(set.is_empty());
/// # Ok::<(), pubmed_entrez::PubMedError>(())
/// ```
#[instrument(skip(xml), fields(xml_size = xml.len()))]
pub fn parse_article_set(xml: &str) -> Result<PubmedArticleSet> {
    let doc = XmlDocument::parse(xml)?;
    let set = PubmedArticleSet::from_document(&doc)?;
    debug!(
        articles = set.len(),
        deleted = set.deleted_pmids.len(),
        "Parsed PubmedArticleSet"
    );
    Ok(set)
}

/// Parse every `PubmedArticle` independently
///
/// Only a document that is not well-formed, or whose root is not
/// `PubmedArticleSet`, fails as a whole.
#[instrument(skip(xml), fields(xml_size = xml.len()))]
pub fn parse_article_results(xml: &str) -> Result<Vec<Result<PubmedArticle>>> {
    let doc = XmlDocument::parse(xml)?;
    let root = set_root(&doc)?;

    let results: Vec<Result<PubmedArticle>> = article_nodes(root)
        .enumerate()
        .map(|(index, node)| {
            let result = parse_indexed(index, node);
            if let Err(e) = &result {
                warn!(index, error = %e, "Failed to parse article");
            }
            result
        })
        .collect();

    debug!(
        total = results.len(),
        failed = results.iter().filter(|r| r.is_err()).count(),
        "Parsed article records"
    );
    Ok(results)
}
