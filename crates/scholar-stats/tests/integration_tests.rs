//! Integration tests for scholar-stats.
//!
//! These tests hit the real Semantic Scholar API.
//! Run with: `cargo test --features integration -- --nocapture`

#![cfg(feature = "integration")]

use std::time::Duration;

use scholar_stats::client::{ScholarClient, ScholarSource};
use scholar_stats::config::{Config, ScholarId};
use scholar_stats::fetcher::MetricsFetcher;
use scholar_stats::models::Snapshot;
use scholar_stats::store::{SnapshotStore, WriteOutcome};

/// Geoffrey Hinton - prolific AI researcher
const HINTON: &str = "1741101";

fn create_client() -> ScholarClient {
    ScholarClient::new(Config::from_env()).expect("Failed to create client")
}

#[tokio::test]
async fn test_lookup_and_fill_known_author() {
    let client = create_client();
    let id = ScholarId::new(Some(HINTON)).unwrap();

    let handle = client.lookup_author(&id).await.expect("lookup should succeed").expect("author exists");
    let author = client.fill_author(&handle).await.expect("fill should succeed");

    assert!(!author.name_or_default().is_empty());
    assert!(author.citations() > 0);
    assert!(author.h_index_value() > 0);
    assert!(!author.publications().is_empty());
}

#[tokio::test]
async fn test_unknown_author_is_none() {
    let client = create_client();
    let id = ScholarId::new(Some("999999999999")).unwrap();

    assert!(client.lookup_author(&id).await.expect("lookup should succeed").is_none());
}

#[tokio::test]
async fn test_full_run_writes_then_skips() {
    let fetcher = MetricsFetcher::new(create_client(), Duration::from_secs(1));
    let id = ScholarId::new(Some(HINTON)).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let store = SnapshotStore::new(dir.path().join("scholar_stats.json"));

    let first = fetcher.run(&id, &store).await.expect("first run should succeed");
    assert!(matches!(first, WriteOutcome::Written { .. }));

    let text = std::fs::read_to_string(store.path()).expect("snapshot on disk");
    let snapshot = Snapshot::from_json(&text).expect("snapshot parses");
    assert!(snapshot.papers.len() <= 20);
}
