use std::sync::Arc;
use std::time::Duration;

use crate::rate_limit::RateLimiter;
use crate::time::{Clock, SystemClock};

/// Default E-utilities base URL
pub const DEFAULT_BASE_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils";

/// Default PMC ID converter endpoint
pub const DEFAULT_ID_CONVERTER_URL: &str = "https://www.ncbi.nlm.nih.gov/pmc/utils/idconv/v1.0/";

const DEFAULT_TOOL: &str = "pubmed-entrez";

/// Configuration for [`PubMedClient`](crate::PubMedClient)
///
/// NCBI asks every client to identify itself either with an API key or with a
/// contact email plus tool name. The API key also raises the allowed request
/// rate from 3 to 10 per second.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use pubmed_entrez::ClientConfig;
///
/// let config = ClientConfig::new()
///     .with_api_key("your_api_key_here")
///     .with_email("researcher@university.edu")
///     .with_timeout(Duration::from_secs(10));
///
/// assert_eq!(config.effective_rate_limit(), 10.0);
/// ```
#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub api_key: Option<String>,
    pub email: Option<String>,
    pub tool: Option<String>,
    pub rate_limit: Option<f64>,
    pub timeout: Duration,
    pub base_url: Option<String>,
    pub id_converter_url: Option<String>,
    pub user_agent: Option<String>,
    pub clock: Option<Arc<dyn Clock>>,
}

impl ClientConfig {
    /// Configuration with no credentials and NCBI default limits
    pub fn new() -> Self {
        Self {
            api_key: None,
            email: None,
            tool: None,
            rate_limit: None,
            timeout: Duration::from_secs(30),
            base_url: None,
            id_converter_url: None,
            user_agent: None,
            clock: None,
        }
    }

    /// Set the NCBI API key
    pub fn with_api_key<S: Into<String>>(mut self, api_key: S) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the contact email sent when no API key is used
    pub fn with_email<S: Into<String>>(mut self, email: S) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Set the tool name sent alongside the contact email
    pub fn with_tool<S: Into<String>>(mut self, tool: S) -> Self {
        self.tool = Some(tool.into());
        self
    }

    /// Override the requests-per-second ceiling
    pub fn with_rate_limit(mut self, rate_limit: f64) -> Self {
        self.rate_limit = Some(rate_limit);
        self
    }

    /// Per-request timeout covering connect, send and body read
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Point the client at a different E-utilities host (used by tests)
    pub fn with_base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Point ID conversion at a different endpoint
    pub fn with_id_converter_url<S: Into<String>>(mut self, url: S) -> Self {
        self.id_converter_url = Some(url.into());
        self
    }

    pub fn with_user_agent<S: Into<String>>(mut self, user_agent: S) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Drive rate limiting and request timing from the given clock
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Requests per second actually enforced
    pub fn effective_rate_limit(&self) -> f64 {
        match (self.rate_limit, &self.api_key) {
            (Some(rate), _) => rate,
            (None, Some(_)) => 10.0,
            (None, None) => 3.0,
        }
    }

    pub fn effective_base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or(DEFAULT_BASE_URL)
            .trim_end_matches('/')
    }

    pub fn effective_id_converter_url(&self) -> &str {
        self.id_converter_url
            .as_deref()
            .unwrap_or(DEFAULT_ID_CONVERTER_URL)
    }

    pub fn effective_user_agent(&self) -> String {
        self.user_agent
            .clone()
            .unwrap_or_else(|| format!("{}/{}", DEFAULT_TOOL, env!("CARGO_PKG_VERSION")))
    }

    pub fn effective_tool(&self) -> &str {
        self.tool.as_deref().unwrap_or(DEFAULT_TOOL)
    }

    /// Identification parameters for one request
    ///
    /// With `key_ok` and a configured key only `api_key` is sent. Otherwise
    /// `email` (when configured) and `tool` are sent. The two forms never mix.
    pub fn auth_params(&self, key_ok: bool) -> Vec<(String, String)> {
        if key_ok {
            if let Some(api_key) = &self.api_key {
                return vec![("api_key".to_string(), api_key.clone())];
            }
        }

        let mut params = Vec::new();
        if let Some(email) = &self.email {
            params.push(("email".to_string(), email.clone()));
        }
        params.push(("tool".to_string(), self.effective_tool().to_string()));
        params
    }

    pub fn effective_clock(&self) -> Arc<dyn Clock> {
        self.clock
            .clone()
            .unwrap_or_else(|| Arc::new(SystemClock::new()))
    }

    pub fn create_rate_limiter(&self) -> RateLimiter {
        RateLimiter::with_clock(self.effective_rate_limit(), self.effective_clock())
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new()
    }
}
