//! PMC ID converter

use tracing::{info, instrument};

use super::{PubMedClient, RequestSpec, validate_ids};
use crate::error::Result;
use crate::pubmed::idmap::{IdLookup, IdType, parse_id_conversion};

impl PubMedClient {
    /// Convert identifiers between PMID, PMCID, Manuscript ID and DOI
    ///
    /// The output has one entry per input ID in input order, whatever order
    /// the service answers in. The converter does not accept the API key, so
    /// requests carry email and tool identification.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use pubmed_entrez::PubMedClient;
    /// use pubmed_entrez::pubmed::{IdLookup, IdType};
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = PubMedClient::new();
    ///     let pmcids = client
    ///         .convert_ids(&["23193287", "1"], IdType::Pmid, IdType::Pmcid)
    ///         .await?;
    ///     for lookup in pmcids {
    ///         match lookup {
    ///             IdLookup::Found(pmcid) => println!("{}", pmcid),
    ///             IdLookup::NotLinked => println!("no PMC record"),
    ///             IdLookup::Missing => println!("unknown ID"),
    ///         }
    ///     }
    ///     Ok(())
    /// }
    /// ```
    #[instrument(skip(self), fields(ids_count = ids.len(), from = %from, to = %to))]
    pub async fn convert_ids(
        &self,
        ids: &[&str],
        from: IdType,
        to: IdType,
    ) -> Result<Vec<IdLookup>> {
        let ids = validate_ids(ids)?;
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let spec = RequestSpec::post(self.config().effective_id_converter_url())
            .param("idtype", from.as_str())
            .param("ids", ids.join(","))
            .param("versions", "no")
            .param("format", "json")
            .without_api_key();

        let lookups = self
            .dispatch(
                spec,
                |response, requested: &[String]| {
                    parse_id_conversion(&response.body, requested, from, to)
                },
                ids.as_slice(),
            )
            .await?;

        info!(
            requested = ids.len(),
            found = lookups.iter().filter(|l| l.is_found()).count(),
            "ID conversion completed"
        );
        Ok(lookups)
    }

    pub async fn pmids_to_pmcids(&self, pmids: &[&str]) -> Result<Vec<IdLookup>> {
        self.convert_ids(pmids, IdType::Pmid, IdType::Pmcid).await
    }

    pub async fn pmcids_to_pmids(&self, pmcids: &[&str]) -> Result<Vec<IdLookup>> {
        self.convert_ids(pmcids, IdType::Pmcid, IdType::Pmid).await
    }

    pub async fn dois_to_pmids(&self, dois: &[&str]) -> Result<Vec<IdLookup>> {
        self.convert_ids(dois, IdType::Doi, IdType::Pmid).await
    }
}
