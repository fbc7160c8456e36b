//! Request dispatch: authentication, rate limiting, timing and parser routing

use std::collections::VecDeque;
use std::fmt;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde::Serialize;
use tracing::{debug, instrument, warn};

use super::PubMedClient;
use crate::error::{Result, TransportError};

/// Number of requests remembered by [`PubMedClient::recent_queries`]
pub const QUERY_LOG_CAPACITY: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HttpMethod {
    Get,
    Post,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpMethod::Get => f.write_str("GET"),
            HttpMethod::Post => f.write_str("POST"),
        }
    }
}

/// One outbound call
///
/// GET sends `params` as the query string, POST as a form body. `key_ok`
/// says whether the endpoint accepts the API key; endpoints that do not get
/// email and tool identification instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestSpec {
    pub method: HttpMethod,
    pub url: String,
    pub params: Vec<(String, String)>,
    pub key_ok: bool,
}

impl RequestSpec {
    pub fn get<S: Into<String>>(url: S) -> Self {
        Self {
            method: HttpMethod::Get,
            url: url.into(),
            params: Vec::new(),
            key_ok: true,
        }
    }

    pub fn post<S: Into<String>>(url: S) -> Self {
        Self {
            method: HttpMethod::Post,
            ..Self::get(url)
        }
    }

    pub fn param<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    pub fn without_api_key(mut self) -> Self {
        self.key_ok = false;
        self
    }
}

/// Successful response handed to a parser
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    /// Final URL after redirects
    pub url: String,
    pub body: String,
}

/// Diagnostics for one dispatched request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryRecord {
    pub method: HttpMethod,
    pub url: String,
    /// Parameters as sent, with the API key value redacted
    pub params: Vec<(String, String)>,
    pub status: u16,
    pub request_time: Duration,
    /// `None` when the response was rejected before parsing
    pub parse_time: Option<Duration>,
}

/// Bounded history of recent requests, shared by clones of a client
#[derive(Debug, Clone, Default)]
pub(crate) struct QueryLog {
    records: Arc<Mutex<VecDeque<QueryRecord>>>,
}

impl QueryLog {
    fn push(&self, record: QueryRecord) {
        let mut records = self
            .records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if records.len() == QUERY_LOG_CAPACITY {
            records.pop_front();
        }
        records.push_back(record);
    }

    /// Oldest first
    pub(crate) fn snapshot(&self) -> Vec<QueryRecord> {
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .iter()
            .cloned()
            .collect()
    }
}

fn redact(params: &[(String, String)]) -> Vec<(String, String)> {
    params
        .iter()
        .map(|(key, value)| {
            let value = if key == "api_key" {
                "REDACTED".to_string()
            } else {
                value.clone()
            };
            (key.clone(), value)
        })
        .collect()
}

impl PubMedClient {
    /// Send one request and hand the response to `parser`
    ///
    /// Adds identification parameters, waits for the rate limiter, rejects
    /// non-2xx responses with [`TransportError::Status`] and passes `extra`
    /// through to the parser untouched. The dispatcher never looks at the
    /// payload itself.
    ///
    /// A parser returning `response.body` as-is gives the raw text of any
    /// endpoint, e.g. ESearch in `retmode=xml` instead of the typed
    /// [`SearchResult`](crate::pubmed::SearchResult).
    ///
    /// # Example
    ///
    /// ```no_run
    /// use pubmed_entrez::PubMedClient;
    /// use pubmed_entrez::pubmed::RequestSpec;
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = PubMedClient::new();
    ///     let spec = RequestSpec::get(client.endpoint("espell.fcgi"))
    ///         .param("db", "pubmed")
    ///         .param("term", "asthmaa");
    ///     let body = client
    ///         .dispatch(spec, |response, ()| Ok(response.body), ())
    ///         .await?;
    ///     println!("{}", body);
    ///     Ok(())
    /// }
    /// ```
    #[instrument(skip_all, fields(method = %spec.method, url = %spec.url))]
    pub async fn dispatch<T, C, F>(&self, spec: RequestSpec, parser: F, extra: C) -> Result<T>
    where
        F: FnOnce(RawResponse, C) -> Result<T>,
    {
        let RequestSpec {
            method,
            url,
            mut params,
            key_ok,
        } = spec;
        params.extend(self.config.auth_params(key_ok));

        self.rate_limiter.acquire().await;
        let clock = self.rate_limiter.clock();

        let started = clock.now();
        debug!(params = params.len(), "Making API request");
        let request = match method {
            HttpMethod::Get => self.client.get(&url).query(&params),
            HttpMethod::Post => self.client.post(&url).form(&params),
        };
        let response = request.send().await?;
        let status = response.status();
        let final_url = response.url().to_string();
        let body = response.text().await?;
        let request_time = clock.now().duration_since(started);
        debug!(
            status = status.as_u16(),
            request_ms = request_time.as_millis() as u64,
            bytes = body.len(),
            "Received response"
        );

        let mut record = QueryRecord {
            method,
            url,
            params: redact(&params),
            status: status.as_u16(),
            request_time,
            parse_time: None,
        };

        if !status.is_success() {
            warn!(status = status.as_u16(), "API request failed");
            self.queries.push(record);
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            }
            .into());
        }

        let parse_started = clock.now();
        let result = parser(
            RawResponse {
                status: status.as_u16(),
                url: final_url,
                body,
            },
            extra,
        );
        let parse_time = clock.now().duration_since(parse_started);
        debug!(parse_ms = parse_time.as_millis() as u64, ok = result.is_ok(), "Parsed response");

        record.parse_time = Some(parse_time);
        self.queries.push(record);
        result
    }

    /// Requests dispatched by this client (and its clones), oldest first
    pub fn recent_queries(&self) -> Vec<QueryRecord> {
        self.queries.snapshot()
    }
}
