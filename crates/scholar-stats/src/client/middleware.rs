//! HTTP stack: reqwest client wrapped in transient-retry middleware.

use reqwest::Client;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};

use crate::config::{Config, api};

/// Build the middleware-wrapped client for `config`.
///
/// # Errors
///
/// Returns error if the API key is not a valid header value or the TLS
/// backend fails to initialize.
pub fn build(config: &Config) -> anyhow::Result<ClientWithMiddleware> {
    let mut headers = reqwest::header::HeaderMap::new();
    headers.insert(reqwest::header::ACCEPT, reqwest::header::HeaderValue::from_static("application/json"));

    if let Some(ref key) = config.api_key {
        headers.insert("x-api-key", key.parse()?);
    }

    let client = Client::builder()
        .default_headers(headers)
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .timeout(config.request_timeout)
        .connect_timeout(config.connect_timeout)
        .gzip(true)
        .build()?;

    let retry_policy = ExponentialBackoff::builder()
        .retry_bounds(api::RETRY_MIN_BACKOFF, api::RETRY_MAX_BACKOFF)
        .build_with_max_retries(config.max_retries);

    Ok(ClientBuilder::new(client)
        .with(RetryTransientMiddleware::new_with_policy(retry_policy))
        .build())
}
