//! The persisted snapshot document.
//!
//! Field order in these structs is the key order in the output file, and
//! `papers` keeps source order, so equal snapshots serialize to equal bytes.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Author-level metrics (`metadata`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorProfile {
    /// Identifier the snapshot was taken for.
    pub scholar_id: String,
    /// Author name.
    pub name: String,
    /// Affiliations as one line.
    pub affiliation: String,
    /// Local generation time.
    pub last_updated: String,
    /// Total citation count.
    pub total_citations: u64,
    /// h-index.
    pub h_index: u64,
    /// i10-index.
    pub i10_index: u64,
    /// Total number of publications.
    pub publication_count: u64,
}

/// Per-publication metrics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicationRecord {
    /// Title.
    pub title: String,
    /// Citation count.
    pub citations: u64,
    /// Publication year, or empty.
    pub year: String,
    /// Venue, or empty.
    pub venue: String,
    /// Author names as free text.
    pub authors: String,
}

/// Publication records keyed by identifier, in insertion order.
///
/// Re-inserting an existing key keeps its position and replaces the record.
pub type Papers = IndexMap<String, PublicationRecord>;

/// One run's result: the unit of persistence and of change comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Author-level metrics.
    pub metadata: AuthorProfile,
    /// Bounded publication records.
    pub papers: Papers,
}

impl Snapshot {
    /// Serialize as pretty JSON (two-space indent, non-ASCII kept as-is).
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Parse a previously written snapshot.
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }
}
