//! ECitMatch API operations for matching citations to PMIDs

use std::slice;

use tracing::{info, instrument};

use super::{PubMedClient, RequestSpec};
use crate::error::{PubMedError, Result};
use crate::pubmed::citmatch::{
    CitationMatchResult, CitationMatcherEntry, build_bdata, parse_citation_matches,
};

impl PubMedClient {
    /// Match citations to PMIDs using the ECitMatch API
    ///
    /// Results come back in submission order, one per entry. A response with
    /// a different number of lines than entries fails with
    /// [`PubMedError::SchemaViolation`] instead of pairing results with the
    /// wrong citations.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use pubmed_entrez::PubMedClient;
    /// use pubmed_entrez::pubmed::CitationMatcherEntry;
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = PubMedClient::new();
    ///     let entries = vec![
    ///         CitationMatcherEntry::new()
    ///             .with_journal("proc natl acad sci u s a")
    ///             .with_year("1991")
    ///             .with_volume("88")
    ///             .with_first_page("3248")
    ///             .with_author("mann bj")
    ///             .with_key("Art1"),
    ///         CitationMatcherEntry::new()
    ///             .with_journal("Bioinformatics")
    ///             .with_year("2015")
    ///             .with_volume("31"),
    ///     ];
    ///     for result in client.match_citations(&entries).await? {
    ///         println!("{:?}: {:?}", result.entry.key, result.outcome);
    ///     }
    ///     Ok(())
    /// }
    /// ```
    #[instrument(skip(self, entries), fields(citations_count = entries.len()))]
    pub async fn match_citations(
        &self,
        entries: &[CitationMatcherEntry],
    ) -> Result<Vec<CitationMatchResult>> {
        if entries.is_empty() {
            return Ok(Vec::new());
        }

        let spec = RequestSpec::post(self.endpoint("ecitmatch.cgi"))
            .param("db", "pubmed")
            .param("retmode", "xml")
            .param("bdata", build_bdata(entries));

        let results = self
            .dispatch(
                spec,
                |response, entries: &[CitationMatcherEntry]| {
                    parse_citation_matches(&response.body, entries)
                },
                entries,
            )
            .await?;

        info!(
            citations_count = entries.len(),
            matched_count = results.iter().filter(|r| r.is_found()).count(),
            "ECitMatch completed"
        );
        Ok(results)
    }

    /// Match a single citation
    pub async fn match_citation(
        &self,
        entry: &CitationMatcherEntry,
    ) -> Result<CitationMatchResult> {
        self.match_citations(slice::from_ref(entry))
            .await?
            .pop()
            .ok_or_else(|| PubMedError::schema("eCitMatchResult", "no result line returned"))
    }
}
