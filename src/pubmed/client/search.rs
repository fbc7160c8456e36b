//! ESearch

use tracing::{info, instrument};

use super::{PubMedClient, RequestSpec};
use crate::error::Result;
use crate::pubmed::responses::{SearchResult, parse_search_response};

impl PubMedClient {
    /// Search a database and return one page of matching UIDs
    ///
    /// `start` and `max` map to `retstart` and `retmax`; the total hit count
    /// is in [`SearchResult::count`].
    ///
    /// # Example
    ///
    /// ```no_run
    /// use pubmed_entrez::PubMedClient;
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = PubMedClient::new();
    ///     let result = client.search("pubmed", "asthma[mh] AND 2020[dp]", 0, 20).await?;
    ///     println!("{} hits, first page: {:?}", result.count, result.ids);
    ///     Ok(())
    /// }
    /// ```
    #[instrument(skip(self), fields(db = %db, query = %query))]
    pub async fn search(
        &self,
        db: &str,
        query: &str,
        start: usize,
        max: usize,
    ) -> Result<SearchResult> {
        let spec = RequestSpec::get(self.endpoint("esearch.fcgi"))
            .param("db", db)
            .param("term", query)
            .param("retstart", start.to_string())
            .param("retmax", max.to_string())
            .param("retmode", "json");

        let result = self
            .dispatch(spec, |response, ()| parse_search_response(&response.body), ())
            .await?;

        info!(
            total = result.count,
            returned = result.ids.len(),
            "Search completed"
        );
        Ok(result)
    }

    /// PMIDs of one page of a PubMed search
    pub async fn search_ids(&self, query: &str, max: usize) -> Result<Vec<String>> {
        Ok(self.search("pubmed", query, 0, max).await?.ids)
    }
}
