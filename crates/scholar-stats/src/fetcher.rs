//! The metrics fetcher: resolve, fill, bound, enrich, assemble, persist.

use std::path::Path;
use std::process::ExitCode;
use std::time::Duration;

use serde::Deserialize;

use crate::client::{ScholarClient, ScholarSource};
use crate::config::{Config, ScholarId, snapshot};
use crate::error::{FetchError, FetchResult, PublicationError};
use crate::models::{Author, AuthorProfile, Papers, Publication, PublicationRecord, Snapshot};
use crate::store::{SnapshotStore, WriteOutcome};

/// Process-level result of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// Snapshot produced (written or unchanged), or check passed.
    Success,
    /// Configuration, not-found or unhandled error.
    Failure,
}

impl RunStatus {
    /// Numeric process exit code.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Success => 0,
            Self::Failure => 1,
        }
    }
}

impl From<RunStatus> for ExitCode {
    fn from(status: RunStatus) -> Self {
        Self::from(status.code())
    }
}

/// Local wall-clock time in the snapshot's timestamp format.
#[must_use]
pub fn local_timestamp() -> String {
    chrono::Local::now().format(snapshot::TIMESTAMP_FORMAT).to_string()
}

/// Fetches one author's metrics from a [`ScholarSource`].
#[derive(Debug)]
pub struct MetricsFetcher<S> {
    source: S,
    publication_delay: Duration,
    clock: fn() -> String,
}

impl<S: ScholarSource> MetricsFetcher<S> {
    /// Create a fetcher that pauses `publication_delay` after each publication detail request.
    #[must_use]
    pub fn new(source: S, publication_delay: Duration) -> Self {
        Self { source, publication_delay, clock: local_timestamp }
    }

    /// Replace the clock used for `last_updated`.
    #[must_use]
    pub fn with_clock(mut self, clock: fn() -> String) -> Self {
        self.clock = clock;
        self
    }

    /// Resolve and fill the author.
    pub async fn fetch_author(&self, scholar_id: &ScholarId) -> FetchResult<Author> {
        tracing::info!(scholar_id = %scholar_id, "Looking up author");

        let handle = self
            .source
            .lookup_author(scholar_id)
            .await
            .map_err(FetchError::Lookup)?
            .ok_or_else(|| FetchError::author_not_found(scholar_id.as_str()))?;

        self.source.fill_author(&handle).await.map_err(FetchError::Fill)
    }

    /// Build the full snapshot in memory. Nothing is written.
    pub async fn build_snapshot(&self, scholar_id: &ScholarId) -> FetchResult<Snapshot> {
        let author = self.fetch_author(scholar_id).await?;

        tracing::info!(
            name = %author.name_or_default(),
            affiliation = %author.affiliation(),
            citations = author.citations(),
            h_index = author.h_index_value(),
            publications = author.publication_count(),
            "Author found"
        );

        let (papers, enriched) = self.collect_papers(author.publications()).await;

        let metadata = AuthorProfile {
            scholar_id: scholar_id.as_str().to_string(),
            name: author.name_or_default().to_string(),
            affiliation: author.affiliation(),
            last_updated: (self.clock)(),
            total_citations: author.citations(),
            h_index: author.h_index_value(),
            i10_index: author.i10_index_with(&enriched),
            publication_count: author.publication_count(),
        };
        tracing::debug!(i10_index = metadata.i10_index, "Author metrics assembled");

        Ok(Snapshot { metadata, papers })
    }

    /// Process the first [`snapshot::PUBLICATION_CAP`] publications in source order.
    ///
    /// A failing publication is logged and left out; it never fails the run.
    /// Alongside the records, returns the stored citation count per listed
    /// position (`None` for skipped ones) so the i10-index agrees with them.
    async fn collect_papers(&self, publications: &[serde_json::Value]) -> (Papers, Vec<Option<u64>>) {
        let bounded = &publications[..publications.len().min(snapshot::PUBLICATION_CAP)];
        tracing::info!(total = publications.len(), processing = bounded.len(), "Processing publications");

        let mut papers = Papers::new();
        let mut enriched = vec![None; bounded.len()];
        for (index, raw) in bounded.iter().enumerate() {
            match self.process_publication(index, raw).await {
                Ok((id, record)) => {
                    tracing::info!(
                        position = index + 1,
                        id = %id,
                        citations = record.citations,
                        "{}",
                        truncate(&record.title, 50)
                    );
                    enriched[index] = Some(record.citations);
                    papers.insert(id, record);
                }
                Err(e) => {
                    tracing::warn!(position = e.position(), error = %e, "Skipping publication");
                }
            }
        }

        (papers, enriched)
    }

    async fn process_publication(
        &self,
        index: usize,
        raw: &serde_json::Value,
    ) -> Result<(String, PublicationRecord), PublicationError> {
        let position = index + 1;
        let publication = Publication::deserialize(raw)
            .map_err(|source| PublicationError::Decode { position, source })?;

        let id = publication.identifier(index);
        let mut citations = publication.citations();

        if let Some(service_id) = id.service_id() {
            let detail = self.source.fill_publication(&service_id).await;
            if !self.publication_delay.is_zero() {
                tokio::time::sleep(self.publication_delay).await;
            }
            let detail = detail.map_err(|source| PublicationError::Enrich {
                position,
                publication_id: service_id.clone(),
                source,
            })?;
            citations = detail.citation_count.unwrap_or(citations);
        }

        let record = PublicationRecord {
            title: publication.title_or_default().to_string(),
            citations,
            year: publication.year_text(),
            venue: publication.venue_or_default().to_string(),
            authors: publication.author_names(),
        };

        Ok((id.to_string(), record))
    }

    /// Build the snapshot and persist it through `store` if its content changed.
    pub async fn run(&self, scholar_id: &ScholarId, store: &SnapshotStore) -> FetchResult<WriteOutcome> {
        let snapshot = self.build_snapshot(scholar_id).await?;
        store.write_if_changed(&snapshot)
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

fn report(err: &FetchError) -> RunStatus {
    match err {
        FetchError::Configuration { .. } | FetchError::AuthorNotFound { .. } => {
            tracing::error!(operation = err.operation(), "{err}");
        }
        _ => {
            let cause = std::error::Error::source(err).map(ToString::to_string);
            tracing::error!(operation = err.operation(), error = %err, cause = ?cause, "Run failed");
        }
    }
    RunStatus::Failure
}

/// Fetch the author's snapshot and write it to `output` if it changed.
///
/// The identifier is validated before any client is built, so a missing or
/// blank identifier makes no network or filesystem calls.
pub async fn run(config: Config, scholar_id: Option<&str>, output: &Path) -> RunStatus {
    let scholar_id = match ScholarId::new(scholar_id) {
        Ok(id) => id,
        Err(e) => return report(&e),
    };

    let publication_delay = config.publication_delay;
    let client = match ScholarClient::new(config) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!(operation = "build_client", error = %e, "Run failed");
            return RunStatus::Failure;
        }
    };

    let fetcher = MetricsFetcher::new(client, publication_delay);
    let store = SnapshotStore::new(output);

    match fetcher.run(&scholar_id, &store).await {
        Ok(WriteOutcome::Written { bytes }) => {
            tracing::info!(path = %output.display(), bytes, "Done");
            RunStatus::Success
        }
        Ok(WriteOutcome::Unchanged) => {
            tracing::info!(path = %output.display(), "Done, no changes");
            RunStatus::Success
        }
        Err(e) => report(&e),
    }
}

/// Connectivity check: validate the identifier, resolve and fill the author once.
///
/// Writes nothing.
pub async fn check(config: Config, scholar_id: Option<&str>) -> RunStatus {
    let scholar_id = match ScholarId::new(scholar_id) {
        Ok(id) => id,
        Err(e) => return report(&e),
    };
    tracing::info!(scholar_id = %scholar_id.masked(), api_key = config.has_api_key(), "Identifier configured");

    let client = match ScholarClient::new(config) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!(operation = "build_client", error = %e, "Check failed");
            return RunStatus::Failure;
        }
    };

    let fetcher = MetricsFetcher::new(client, Duration::ZERO);
    match fetcher.fetch_author(&scholar_id).await {
        Ok(author) => {
            tracing::info!(name = %author.name_or_default(), citations = author.citations(), "Connection OK");
            RunStatus::Success
        }
        Err(e) => report(&e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_status_codes() {
        assert_eq!(RunStatus::Success.code(), 0);
        assert_eq!(RunStatus::Failure.code(), 1);
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate("short", 50), "short");
        assert_eq!(truncate("ñññññ", 3), "ñññ...");
        assert_eq!(truncate("exactly", 7), "exactly");
    }

    #[test]
    fn test_local_timestamp_format() {
        let ts = local_timestamp();
        assert_eq!(ts.len(), 19);
        assert!(chrono::NaiveDateTime::parse_from_str(&ts, snapshot::TIMESTAMP_FORMAT).is_ok());
    }
}
