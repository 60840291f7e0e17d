//! Scholar Stats
//!
//! Snapshots one author's citation metrics from the Semantic Scholar Graph API
//! into a JSON document, rewriting the document only when its content changes.
//!
//! # Features
//!
//! - **Author metrics**: name, affiliation, total citations, h-index, i10-index, publication count
//! - **Bounded publications**: the first 20 publications with title, citations, year, venue and authors
//! - **Idempotent output**: SHA-256 comparison against the existing file's bytes, atomic replace on change
//! - **Resilient**: per-publication failures are logged and skipped, never fatal
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//!
//! use scholar_stats::{Config, MetricsFetcher, ScholarClient, ScholarId, SnapshotStore};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let scholar_id = ScholarId::new(std::env::var("SCHOLAR_ID").ok().as_deref())?;
//!     let client = ScholarClient::new(config)?;
//!
//!     let fetcher = MetricsFetcher::new(client, Duration::from_secs(1));
//!     let store = SnapshotStore::new("data/scholar_stats.json");
//!     let outcome = fetcher.run(&scholar_id, &store).await?;
//!     println!("{outcome:?}");
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod models;
pub mod store;

pub use client::{ScholarClient, ScholarSource};
pub use config::{Config, ScholarId};
pub use error::{ClientError, FetchError, PublicationError};
pub use fetcher::{MetricsFetcher, RunStatus};
pub use store::{SnapshotStore, WriteOutcome};
