//! Error types for the scholar-stats fetcher.
//!
//! Uses `thiserror` for structured error handling with automatic `From` implementations.

use std::path::PathBuf;
use std::time::Duration;

/// Errors from the HTTP client layer.
#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    /// HTTP transport error (connection, DNS, TLS, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Middleware error
    #[error("Middleware error: {0}")]
    Middleware(#[from] reqwest_middleware::Error),

    /// Invalid request URL
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Rate limited by Semantic Scholar API (429 response)
    #[error("Rate limited, retry after {retry_after:?}")]
    RateLimited {
        /// Suggested wait time before retry
        retry_after: Duration,
    },

    /// Resource not found (404 response)
    #[error("Resource not found: {resource}")]
    NotFound {
        /// Description of the missing resource
        resource: String,
    },

    /// Invalid request parameters (400 response)
    #[error("Bad request: {message}")]
    BadRequest {
        /// Error message from API
        message: String,
    },

    /// JSON parsing error
    #[error("Failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),

    /// Server error (5xx response)
    #[error("Server error ({status}): {message}")]
    Server {
        /// HTTP status code
        status: u16,
        /// Error message
        message: String,
    },

    /// Unexpected HTTP status
    #[error("Unexpected status {status}: {message}")]
    UnexpectedStatus {
        /// HTTP status code
        status: u16,
        /// Response body or message
        message: String,
    },
}

impl ClientError {
    /// Create a rate limited error with retry-after duration.
    #[must_use]
    pub fn rate_limited(seconds: u64) -> Self {
        Self::RateLimited { retry_after: Duration::from_secs(seconds) }
    }

    /// Create a not found error.
    #[must_use]
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound { resource: resource.into() }
    }

    /// Create a bad request error.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest { message: message.into() }
    }

    /// Create a server error.
    #[must_use]
    pub fn server(status: u16, message: impl Into<String>) -> Self {
        Self::Server { status, message: message.into() }
    }

    /// Returns true if the service reported the resource as missing.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Failure processing one publication. Never fatal to a run.
#[derive(thiserror::Error, Debug)]
pub enum PublicationError {
    /// The raw record does not fit the publication model.
    #[error("publication {position}: malformed record: {source}")]
    Decode {
        /// 1-based position in the bounded set
        position: usize,
        /// Underlying decode error
        #[source]
        source: serde_json::Error,
    },

    /// The per-publication detail request failed.
    #[error("publication {position} ({publication_id}): detail request failed: {source}")]
    Enrich {
        /// 1-based position in the bounded set
        position: usize,
        /// Identifier the request was made for
        publication_id: String,
        /// Underlying client error
        #[source]
        source: ClientError,
    },
}

impl PublicationError {
    /// 1-based position of the failed publication.
    #[must_use]
    pub const fn position(&self) -> usize {
        match self {
            Self::Decode { position, .. } | Self::Enrich { position, .. } => *position,
        }
    }
}

/// Run-level errors. Each one aborts the run with failure status.
#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    /// The author identifier is missing or blank.
    #[error("Configuration error: {message}")]
    Configuration {
        /// What is wrong with the configuration
        message: String,
    },

    /// The service has no author with this identifier.
    #[error("No author found with ID: {scholar_id}")]
    AuthorNotFound {
        /// Identifier that was looked up
        scholar_id: String,
    },

    /// Resolving the author handle failed.
    #[error("author lookup failed: {0}")]
    Lookup(#[source] ClientError),

    /// Filling the author detail failed.
    #[error("author fill failed: {0}")]
    Fill(#[source] ClientError),

    /// Serializing or parsing the snapshot document failed.
    #[error("snapshot serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Filesystem operation on the snapshot failed.
    #[error("{operation} {}: {source}", .path.display())]
    Io {
        /// Operation being performed
        operation: &'static str,
        /// File or directory involved
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl FetchError {
    /// Create a configuration error.
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration { message: message.into() }
    }

    /// Create an author-not-found error.
    #[must_use]
    pub fn author_not_found(scholar_id: impl Into<String>) -> Self {
        Self::AuthorNotFound { scholar_id: scholar_id.into() }
    }

    /// Create an I/O error for the given operation and path.
    #[must_use]
    pub fn io(operation: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { operation, path: path.into(), source }
    }

    /// Short name of the failed operation, for structured logs.
    #[must_use]
    pub const fn operation(&self) -> &'static str {
        match self {
            Self::Configuration { .. } => "configure",
            Self::AuthorNotFound { .. } | Self::Lookup(_) => "lookup_author",
            Self::Fill(_) => "fill_author",
            Self::Serialize(_) => "serialize",
            Self::Io { operation, .. } => *operation,
        }
    }
}

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Result type alias for fetch operations.
pub type FetchResult<T> = Result<T, FetchError>;
