//! ELink API operations for cross-database linking

use tracing::{info, instrument};

use super::{PubMedClient, RequestSpec, validate_ids};
use crate::error::Result;
use crate::pubmed::idmap::{IdLookup, parse_pmc_links};

const PUBMED_PMC: &str = "pubmed_pmc";

impl PubMedClient {
    /// Find the PMC record for each PMID
    ///
    /// Each PMID is sent as its own `id` parameter so ELink answers with one
    /// linkset per PMID, and the results are aligned to input order.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use pubmed_entrez::PubMedClient;
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = PubMedClient::new();
    ///     let links = client.pmc_links(&["20363814", "25186301"]).await?;
    ///     for (pmid, link) in ["20363814", "25186301"].iter().zip(&links) {
    ///         println!("{} -> {:?}", pmid, link.as_deref());
    ///     }
    ///     Ok(())
    /// }
    /// ```
    #[instrument(skip(self), fields(pmids_count = pmids.len()))]
    pub async fn pmc_links(&self, pmids: &[&str]) -> Result<Vec<IdLookup>> {
        let pmids = validate_ids(pmids)?;
        if pmids.is_empty() {
            return Ok(Vec::new());
        }

        let spec = pmids.iter().fold(
            RequestSpec::post(self.endpoint("elink.fcgi"))
                .param("dbfrom", "pubmed")
                .param("db", "pmc")
                .param("linkname", PUBMED_PMC)
                .param("retmode", "json"),
            |spec, pmid| spec.param("id", pmid.as_str()),
        );

        let links = self
            .dispatch(
                spec,
                |response, requested: &[String]| {
                    parse_pmc_links(&response.body, requested, PUBMED_PMC)
                },
                pmids.as_slice(),
            )
            .await?;

        info!(
            requested = pmids.len(),
            linked = links.iter().filter(|l| l.is_found()).count(),
            "ELink to PMC completed"
        );
        Ok(links)
    }
}
