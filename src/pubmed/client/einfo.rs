//! EInfo API operations for database information

use tracing::{debug, info, instrument};

use super::{PubMedClient, RequestSpec};
use crate::error::Result;
use crate::pubmed::models::DatabaseInfo;
use crate::pubmed::responses::parse_database_list;
use crate::xml::XmlDocument;

impl PubMedClient {
    /// Get the names of all Entrez databases
    ///
    /// # Example
    ///
    /// ```no_run
    /// use pubmed_entrez::PubMedClient;
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = PubMedClient::new();
    ///     let databases = client.database_list().await?;
    ///     println!("Available databases: {:?}", databases);
    ///     Ok(())
    /// }
    /// ```
    #[instrument(skip(self))]
    pub async fn database_list(&self) -> Result<Vec<String>> {
        let spec = RequestSpec::get(self.endpoint("einfo.fcgi")).param("retmode", "json");

        let databases = self
            .dispatch(spec, |response, ()| parse_database_list(&response.body), ())
            .await?;

        info!(databases_count = databases.len(), "Database list retrieved");
        Ok(databases)
    }

    /// Describe one database: record count, searchable fields and links
    ///
    /// Fails with [`PubMedError::UnknownDatabase`](crate::PubMedError::UnknownDatabase)
    /// when the service does not know `db`.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use pubmed_entrez::PubMedClient;
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = PubMedClient::new();
    ///     let info = client.database_info("pubmed").await?;
    ///     for field in info.fields.iter().take(5) {
    ///         println!("{}: {}", field.name, field.full_name);
    ///     }
    ///     Ok(())
    /// }
    /// ```
    #[instrument(skip(self), fields(db = %db))]
    pub async fn database_info(&self, db: &str) -> Result<DatabaseInfo> {
        let spec = RequestSpec::get(self.endpoint("einfo.fcgi"))
            .param("db", db)
            .param("version", "2.0")
            .param("retmode", "xml");

        let info = self
            .dispatch(
                spec,
                |response, db: &str| {
                    let doc = XmlDocument::parse(&response.body)?;
                    DatabaseInfo::from_result(&doc.root, db)
                },
                db,
            )
            .await?;

        debug!(
            fields_count = info.fields.len(),
            links_count = info.links.len(),
            "Database info retrieved"
        );
        Ok(info)
    }
}
