//! EFetch of full PubMed records

use tracing::{debug, info, instrument};

use super::{PubMedClient, RequestSpec, validate_ids};
use crate::error::{PubMedError, Result};
use crate::pubmed::models::{PubmedArticle, PubmedArticleSet};
use crate::pubmed::parser::parse_article_set;

impl PubMedClient {
    /// Fetch full records for a list of PMIDs
    ///
    /// The IDs go in a POST body, so long lists do not hit URL limits. The
    /// whole set fails if any record is malformed; the error names the
    /// record's index and PMID.
    ///
    /// # Errors
    ///
    /// * [`PubMedError::InvalidId`] for an empty or blank PMID
    /// * [`PubMedError::Document`] for a record that does not parse
    /// * [`PubMedError::Transport`] for network failures and non-2xx responses
    ///
    /// # Example
    ///
    /// ```no_run
    /// use pubmed_entrez::PubMedClient;
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = PubMedClient::new();
    ///     let set = client.fetch_articles(&["25186301", "31978945"]).await?;
    ///     for article in &set.articles {
    ///         println!("{}: {}", article.pmid(), article.title());
    ///     }
    ///     Ok(())
    /// }
    /// ```
    #[instrument(skip(self), fields(pmids_count = pmids.len()))]
    pub async fn fetch_articles(&self, pmids: &[&str]) -> Result<PubmedArticleSet> {
        let pmids = validate_ids(pmids)?;
        if pmids.is_empty() {
            return Ok(PubmedArticleSet::default());
        }

        let spec = RequestSpec::post(self.endpoint("efetch.fcgi"))
            .param("db", "pubmed")
            .param("id", pmids.join(","))
            .param("retmode", "xml");

        let set = self
            .dispatch(
                spec,
                |response, ()| {
                    if response.body.trim().is_empty() {
                        debug!("Empty EFetch response");
                        return Ok(PubmedArticleSet::default());
                    }
                    parse_article_set(&response.body)
                },
                (),
            )
            .await?;

        info!(
            requested = pmids.len(),
            parsed = set.len(),
            "Fetch completed"
        );
        Ok(set)
    }

    /// Fetch one record by PMID
    ///
    /// Fails with [`PubMedError::ArticleNotFound`] when PubMed returns no
    /// record for the ID.
    #[instrument(skip(self), fields(pmid = %pmid))]
    pub async fn fetch_article(&self, pmid: &str) -> Result<PubmedArticle> {
        let set = self.fetch_articles(&[pmid]).await?;
        let wanted = pmid.trim();

        let mut articles = set.articles;
        if articles.is_empty() {
            return Err(PubMedError::ArticleNotFound {
                pmid: wanted.to_string(),
            });
        }
        // a merged record may come back under its surviving PMID
        let index = articles
            .iter()
            .position(|article| article.pmid() == wanted)
            .unwrap_or(0);
        Ok(articles.swap_remove(index))
    }
}
