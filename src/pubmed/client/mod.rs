mod citmatch;
mod dispatch;
mod einfo;
mod elink;
mod fetch;
mod idconv;
mod search;
mod summary;

pub use dispatch::{HttpMethod, QUERY_LOG_CAPACITY, QueryRecord, RawResponse, RequestSpec};

use reqwest::Client;

use crate::config::ClientConfig;
use crate::error::{PubMedError, Result};
use crate::rate_limit::RateLimiter;
use dispatch::QueryLog;

/// Client for the NCBI E-utilities and the PMC ID converter
///
/// Clones share the HTTP connection pool, the rate limiter and the query
/// log, so the configured request rate holds across every clone and task.
///
/// The endpoint operations are split across focused modules:
/// - `search` - ESearch
/// - `fetch` - EFetch of full PubMed records
/// - `summary` - ESummary
/// - `einfo` - database list and database descriptions
/// - `citmatch` - ECitMatch citation matching
/// - `idconv` - PMC ID converter
/// - `elink` - PubMed to PMC links
#[derive(Clone, Debug)]
pub struct PubMedClient {
    client: Client,
    pub(crate) base_url: String,
    rate_limiter: RateLimiter,
    config: ClientConfig,
    queries: QueryLog,
}

impl PubMedClient {
    /// Create a new PubMed client with default configuration
    ///
    /// Uses default NCBI rate limiting (3 requests/second) and no API key.
    /// For production use, consider using `with_config()` to set an API key.
    ///
    /// # Example
    ///
    /// ```
    /// use pubmed_entrez::PubMedClient;
    ///
    /// let client = PubMedClient::new();
    /// ```
    pub fn new() -> Self {
        Self::with_config(ClientConfig::new())
    }

    /// Create a new PubMed client with custom configuration
    ///
    /// # Arguments
    ///
    /// * `config` - Client configuration including rate limits, API key, etc.
    ///
    /// # Example
    ///
    /// ```
    /// use pubmed_entrez::{PubMedClient, ClientConfig};
    ///
    /// let config = ClientConfig::new()
    ///     .with_api_key("your_api_key_here")
    ///     .with_email("researcher@university.edu");
    ///
    /// let client = PubMedClient::with_config(config);
    /// ```
    pub fn with_config(config: ClientConfig) -> Self {
        let client = Client::builder()
            .user_agent(config.effective_user_agent())
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self::from_parts(client, config)
    }

    /// Create a client around a preconfigured HTTP client
    ///
    /// The configuration's timeout and user agent are not applied; those
    /// belong to `client`.
    ///
    /// # Example
    ///
    /// ```
    /// use pubmed_entrez::{ClientConfig, PubMedClient};
    /// use reqwest::Client;
    /// use std::time::Duration;
    ///
    /// let http_client = Client::builder()
    ///     .timeout(Duration::from_secs(30))
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = PubMedClient::with_client(http_client, ClientConfig::new());
    /// ```
    pub fn with_client(client: Client, config: ClientConfig) -> Self {
        Self::from_parts(client, config)
    }

    fn from_parts(client: Client, config: ClientConfig) -> Self {
        Self {
            client,
            base_url: config.effective_base_url().to_string(),
            rate_limiter: config.create_rate_limiter(),
            config,
            queries: QueryLog::default(),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn rate_limiter(&self) -> &RateLimiter {
        &self.rate_limiter
    }

    /// Full URL of an E-utility, e.g. `endpoint("esearch.fcgi")`
    pub fn endpoint(&self, name: &str) -> String {
        format!("{}/{}", self.base_url, name)
    }
}

impl Default for PubMedClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Trimmed identifiers, failing on the first empty one
pub(crate) fn validate_ids(ids: &[&str]) -> Result<Vec<String>> {
    ids.iter()
        .map(|id| {
            let trimmed = id.trim();
            if trimmed.is_empty() {
                Err(PubMedError::InvalidId { id: id.to_string() })
            } else {
                Ok(trimmed.to_string())
            }
        })
        .collect()
}
