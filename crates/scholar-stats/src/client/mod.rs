//! Semantic Scholar API client.
//!
//! Provides async HTTP client with:
//! - Retry middleware with exponential backoff
//! - Fixed request and connect timeouts
//! - Status-code mapping into [`ClientError`]

mod middleware;
mod source;

pub use source::ScholarSource;

use async_trait::async_trait;
use reqwest_middleware::ClientWithMiddleware;
use url::Url;

use crate::config::{Config, ScholarId, fields};
use crate::error::{ClientError, ClientResult};
use crate::models::{Author, AuthorHandle, Publication};

/// Semantic Scholar API client.
#[derive(Clone)]
pub struct ScholarClient {
    /// HTTP client with middleware.
    client: ClientWithMiddleware,

    /// API key (optional).
    api_key: Option<String>,

    /// Graph API base URL.
    graph_api_url: String,
}

impl ScholarClient {
    /// Create a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let client = middleware::build(&config)?;

        Ok(Self { client, api_key: config.api_key, graph_api_url: config.graph_api_url })
    }

    /// Check if an API key is configured.
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Get an author by ID with the given fields.
    ///
    /// # Errors
    ///
    /// Returns error on API failure.
    pub async fn get_author<T>(&self, author_id: &str, fields: &[&str]) -> ClientResult<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let url = self.endpoint(&["author", author_id])?;
        self.get(url, fields).await
    }

    /// Get a single paper by ID.
    ///
    /// # Errors
    ///
    /// Returns error on API failure.
    pub async fn get_paper(&self, paper_id: &str, fields: &[&str]) -> ClientResult<Publication> {
        let url = self.endpoint(&["paper", paper_id])?;
        self.get(url, fields).await
    }

    /// Graph API URL with percent-encoded path segments appended.
    fn endpoint(&self, segments: &[&str]) -> ClientResult<Url> {
        let mut url = Url::parse(&self.graph_api_url)?;
        url.path_segments_mut()
            .map_err(|()| ClientError::bad_request(format!("not a base URL: {}", self.graph_api_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Make a GET request.
    async fn get<T>(&self, url: Url, fields: &[&str]) -> ClientResult<T>
    where
        T: serde::de::DeserializeOwned,
    {
        tracing::debug!(url = %url, "GET");

        let params = [("fields", fields.join(","))];
        let response = self.client.get(url).query(&params).send().await?;

        let response = Self::handle_response(response).await?;
        let value: serde_json::Value = response.json().await?;

        serde_json::from_value(value).map_err(ClientError::from)
    }

    /// Handle API response status codes.
    async fn handle_response(response: reqwest::Response) -> ClientResult<reqwest::Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        match status.as_u16() {
            429 => {
                let retry_after = response
                    .headers()
                    .get("Retry-After")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(60);

                Err(ClientError::rate_limited(retry_after))
            }
            404 => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::not_found(text))
            }
            400 => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::bad_request(text))
            }
            500..=599 => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::server(status.as_u16(), text))
            }
            _ => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::UnexpectedStatus { status: status.as_u16(), message: text })
            }
        }
    }
}

#[async_trait]
impl ScholarSource for ScholarClient {
    async fn lookup_author(&self, scholar_id: &ScholarId) -> ClientResult<Option<AuthorHandle>> {
        match self.get_author(scholar_id.as_str(), fields::AUTHOR_LOOKUP).await {
            Ok(handle) => Ok(Some(handle)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn fill_author(&self, handle: &AuthorHandle) -> ClientResult<Author> {
        self.get_author(&handle.author_id, fields::AUTHOR_DETAIL).await
    }

    async fn fill_publication(&self, publication_id: &str) -> ClientResult<Publication> {
        self.get_paper(publication_id, fields::PUBLICATION_DETAIL).await
    }
}

impl std::fmt::Debug for ScholarClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScholarClient").field("has_api_key", &self.has_api_key()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_encodes_segments() {
        let client = ScholarClient::new(Config::for_testing("http://localhost:1234")).unwrap();
        let url = client.endpoint(&["author", "a b/c"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:1234/graph/v1/author/a%20b%2Fc");
    }

    #[test]
    fn test_endpoint_keeps_corpus_prefix() {
        let client = ScholarClient::new(Config::for_testing("http://localhost:1234")).unwrap();
        let url = client.endpoint(&["paper", "CorpusId:42"]).unwrap();
        assert_eq!(url.path(), "/graph/v1/paper/CorpusId:42");
    }

    #[test]
    fn test_debug_hides_api_key() {
        let config = Config::new(Some("super-secret-key".to_string()));
        let client = ScholarClient::new(config).unwrap();
        let debug = format!("{client:?}");
        assert!(!debug.contains("super-secret-key"));
        assert!(debug.contains("has_api_key"));
    }
}
