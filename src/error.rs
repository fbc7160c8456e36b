use thiserror::Error;

/// Error types for PubMed client operations
#[derive(Error, Debug)]
pub enum PubMedError {
    /// A required element is missing or a constrained attribute holds an unknown value
    #[error("schema violation at {path}: {message}")]
    SchemaViolation { path: String, message: String },

    /// A field that must be numeric (or otherwise shaped) is not
    #[error("malformed field at {path}: expected {expected}, found {value:?}")]
    MalformedField {
        path: String,
        value: String,
        expected: &'static str,
    },

    /// Citation match token that fits none of the known encodings
    #[error("unrecognized citation match result: {line:?}")]
    UnrecognizedMatchFormat { line: String },

    /// Network failure, timeout or non-success HTTP status
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The info endpoint does not know the requested database
    #[error("unknown database: {name}")]
    UnknownDatabase { name: String },

    /// Parse failure of one document inside a larger set
    #[error("document {index} (PMID {}) failed to parse: {source}", .pmid.as_deref().unwrap_or("unknown"))]
    Document {
        index: usize,
        pmid: Option<String>,
        #[source]
        source: Box<PubMedError>,
    },

    /// JSON parsing failed
    #[error("JSON parsing failed: {0}")]
    JsonError(#[from] serde_json::Error),

    /// XML is not well-formed
    #[error("XML parsing failed: {0}")]
    XmlError(String),

    /// Article not found
    #[error("Article not found: PMID {pmid}")]
    ArticleNotFound { pmid: String },

    /// Empty or blank identifier passed to an id-taking operation
    #[error("Invalid identifier: {id:?}")]
    InvalidId { id: String },
}

/// Failures below the parsing layer
#[derive(Error, Debug)]
pub enum TransportError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[source] reqwest::Error),

    /// The configured per-request timeout elapsed
    #[error("HTTP request timed out: {0}")]
    Timeout(#[source] reqwest::Error),

    /// Server answered with a non-success status
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout(err)
        } else {
            TransportError::Request(err)
        }
    }
}

impl From<reqwest::Error> for PubMedError {
    fn from(err: reqwest::Error) -> Self {
        PubMedError::Transport(TransportError::from(err))
    }
}

impl From<quick_xml::Error> for PubMedError {
    fn from(err: quick_xml::Error) -> Self {
        PubMedError::XmlError(err.to_string())
    }
}

impl PubMedError {
    pub(crate) fn schema(path: impl Into<String>, message: impl Into<String>) -> Self {
        PubMedError::SchemaViolation {
            path: path.into(),
            message: message.into(),
        }
    }

    /// HTTP status code when the error came from a non-success response
    pub fn status(&self) -> Option<u16> {
        match self {
            PubMedError::Transport(TransportError::Status { status, .. }) => Some(*status),
            _ => None,
        }
    }

    /// Whether this error is the per-request timeout
    pub fn is_timeout(&self) -> bool {
        matches!(self, PubMedError::Transport(TransportError::Timeout(_)))
    }
}

pub type Result<T> = std::result::Result<T, PubMedError>;
