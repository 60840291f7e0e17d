//! Configuration for the scholar-stats fetcher.

use std::fmt;
use std::time::Duration;

use crate::error::FetchError;

/// API configuration constants.
pub mod api {
    use std::time::Duration;

    /// Graph API endpoint.
    pub const GRAPH_API: &str = "https://api.semanticscholar.org/graph/v1";

    /// Request timeout handed to the HTTP client.
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

    /// Connection timeout.
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Retries for transient failures (5xx, 429, timeouts).
    pub const MAX_RETRIES: u32 = 3;

    /// Lower bound of the exponential retry backoff.
    pub const RETRY_MIN_BACKOFF: Duration = Duration::from_secs(1);

    /// Upper bound of the exponential retry backoff.
    pub const RETRY_MAX_BACKOFF: Duration = Duration::from_secs(30);

    /// Pause after each per-publication detail request.
    pub const PUBLICATION_DELAY: Duration = Duration::from_secs(1);
}

/// Snapshot shape constants.
pub mod snapshot {
    /// Maximum number of publications kept in a snapshot, in source order.
    pub const PUBLICATION_CAP: usize = 20;

    /// Default location of the snapshot document.
    pub const DEFAULT_OUTPUT_PATH: &str = "data/scholar_stats.json";

    /// `strftime` format of `metadata.last_updated`.
    pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    /// Citation threshold for the i10-index.
    pub const I10_THRESHOLD: u64 = 10;
}

/// Field sets for API requests.
pub mod fields {
    /// Fields requested when resolving an author handle.
    pub const AUTHOR_LOOKUP: &[&str] = &["authorId", "name"];

    /// Fields requested when filling an author.
    pub const AUTHOR_DETAIL: &[&str] = &[
        "name",
        "affiliations",
        "citationCount",
        "hIndex",
        "paperCount",
        "papers.paperId",
        "papers.corpusId",
        "papers.title",
        "papers.year",
        "papers.venue",
        "papers.citationCount",
        "papers.authors",
    ];

    /// Fields requested when filling a single publication.
    pub const PUBLICATION_DETAIL: &[&str] = &["paperId", "citationCount"];
}

/// Environment variable names.
pub mod env {
    /// Author identifier to snapshot.
    pub const SCHOLAR_ID: &str = "SCHOLAR_ID";

    /// Optional Semantic Scholar API key.
    pub const API_KEY: &str = "SEMANTIC_SCHOLAR_API_KEY";
}

/// Client configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Semantic Scholar API key (optional).
    pub api_key: Option<String>,

    /// Base URL for Graph API (for testing with mock servers).
    pub graph_api_url: String,

    /// Request timeout.
    pub request_timeout: Duration,

    /// Connection timeout.
    pub connect_timeout: Duration,

    /// Retries for transient failures.
    pub max_retries: u32,

    /// Pause after each publication detail request.
    pub publication_delay: Duration,
}

impl Config {
    /// Create a new configuration with optional API key.
    #[must_use]
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            graph_api_url: api::GRAPH_API.to_string(),
            request_timeout: api::REQUEST_TIMEOUT,
            connect_timeout: api::CONNECT_TIMEOUT,
            max_retries: api::MAX_RETRIES,
            publication_delay: api::PUBLICATION_DELAY,
        }
    }

    /// Create a test configuration pointing at a mock server.
    #[must_use]
    pub fn for_testing(base_url: &str) -> Self {
        Self {
            api_key: None,
            graph_api_url: format!("{}/graph/v1", base_url),
            request_timeout: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(2),
            max_retries: 0,
            publication_delay: Duration::ZERO,
        }
    }

    /// Create configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(std::env::var(env::API_KEY).ok())
    }

    /// Check if an API key is configured.
    #[must_use]
    pub const fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(None)
    }
}

/// A validated, non-empty author identifier.
///
/// This is the single validation point for the identifier: everything past
/// construction treats it as opaque.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScholarId(String);

impl ScholarId {
    /// Validate a raw identifier.
    ///
    /// Surrounding whitespace is trimmed; an absent or blank value is a
    /// configuration error.
    pub fn new(raw: Option<&str>) -> Result<Self, FetchError> {
        match raw.map(str::trim) {
            Some(id) if !id.is_empty() => Ok(Self(id.to_string())),
            Some(_) => Err(FetchError::configuration(format!("{} is empty", env::SCHOLAR_ID))),
            None => Err(FetchError::configuration(format!("{} is not set", env::SCHOLAR_ID))),
        }
    }

    /// The identifier text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First five characters, for log lines that should not echo the full id.
    #[must_use]
    pub fn masked(&self) -> String {
        let prefix: String = self.0.chars().take(5).collect();
        format!("{prefix}...")
    }
}

impl fmt::Display for ScholarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.api_key.is_none());
        assert!(!config.has_api_key());
        assert_eq!(config.max_retries, api::MAX_RETRIES);
        assert_eq!(config.request_timeout, api::REQUEST_TIMEOUT);
    }

    #[test]
    fn test_config_blank_api_key_is_ignored() {
        let config = Config::new(Some("  ".to_string()));
        assert!(!config.has_api_key());
    }

    #[test]
    fn test_config_for_testing_has_no_delay() {
        let config = Config::for_testing("http://127.0.0.1:9999");
        assert_eq!(config.graph_api_url, "http://127.0.0.1:9999/graph/v1");
        assert_eq!(config.publication_delay, Duration::ZERO);
        assert_eq!(config.max_retries, 0);
    }

    #[test]
    fn test_scholar_id_trims() {
        let id = ScholarId::new(Some("  abc123 ")).unwrap();
        assert_eq!(id.as_str(), "abc123");
    }

    #[test]
    fn test_scholar_id_rejects_missing_and_blank() {
        assert!(matches!(ScholarId::new(None), Err(FetchError::Configuration { .. })));
        assert!(matches!(ScholarId::new(Some("")), Err(FetchError::Configuration { .. })));
        assert!(matches!(ScholarId::new(Some(" \t")), Err(FetchError::Configuration { .. })));
    }

    #[test]
    fn test_scholar_id_masked() {
        let id = ScholarId::new(Some("1741101")).unwrap();
        assert_eq!(id.masked(), "17411...");
        let short = ScholarId::new(Some("42")).unwrap();
        assert_eq!(short.masked(), "42...");
    }

    #[test]
    fn test_author_detail_fields_cover_snapshot() {
        assert!(fields::AUTHOR_DETAIL.contains(&"hIndex"));
        assert!(fields::AUTHOR_DETAIL.contains(&"papers.citationCount"));
        assert!(fields::PUBLICATION_DETAIL.contains(&"citationCount"));
    }
}
