//! The external-service boundary consumed by the fetcher.

use async_trait::async_trait;

use crate::config::ScholarId;
use crate::error::ClientResult;
use crate::models::{Author, AuthorHandle, Publication};

/// A scholarly-indexing service that can resolve and fill authors.
///
/// Timeouts and retries belong to the implementation; callers only see the
/// final result of each call.
#[async_trait]
pub trait ScholarSource: Send + Sync {
    /// Resolve an author by identifier. `Ok(None)` means the service has no such author.
    async fn lookup_author(&self, scholar_id: &ScholarId) -> ClientResult<Option<AuthorHandle>>;

    /// Request full detail, including the publication list, for a resolved author.
    async fn fill_author(&self, handle: &AuthorHandle) -> ClientResult<Author>;

    /// Request detail for one publication by a service-addressable identifier.
    async fn fill_publication(&self, publication_id: &str) -> ClientResult<Publication>;
}
