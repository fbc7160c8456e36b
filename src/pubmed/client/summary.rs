//! ESummary

use tracing::{info, instrument};

use super::{PubMedClient, RequestSpec, validate_ids};
use crate::error::Result;
use crate::pubmed::responses::{ResponseHeader, SummaryResult, parse_summary_response};

impl PubMedClient {
    /// Fetch document summaries for a list of UIDs
    ///
    /// UIDs the service cannot summarize are listed in
    /// [`SummaryResult::failed_uids`] instead of failing the call.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use pubmed_entrez::PubMedClient;
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = PubMedClient::new();
    ///     let summaries = client.summary("pubmed", &["25186301"]).await?;
    ///     for doc in &summaries.docs {
    ///         println!("{} ({}): {}", doc.uid, doc.pub_date, doc.title);
    ///     }
    ///     Ok(())
    /// }
    /// ```
    #[instrument(skip(self), fields(db = %db, ids_count = ids.len()))]
    pub async fn summary(&self, db: &str, ids: &[&str]) -> Result<SummaryResult> {
        let ids = validate_ids(ids)?;
        if ids.is_empty() {
            return Ok(SummaryResult {
                header: ResponseHeader::default(),
                uids: Vec::new(),
                docs: Vec::new(),
                failed_uids: Vec::new(),
            });
        }

        let spec = RequestSpec::post(self.endpoint("esummary.fcgi"))
            .param("db", db)
            .param("id", ids.join(","))
            .param("retmode", "json");

        let result = self
            .dispatch(spec, |response, ()| parse_summary_response(&response.body), ())
            .await?;

        info!(
            requested = ids.len(),
            returned = result.docs.len(),
            failed = result.failed_uids.len(),
            "Summary completed"
        );
        Ok(result)
    }
}
