//! Author data model matching Semantic Scholar API schema.

use serde::{Deserialize, Serialize};

use crate::config::snapshot::I10_THRESHOLD;

/// Result of resolving an author by identifier, before filling.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorHandle {
    /// Semantic Scholar author ID.
    pub author_id: String,

    /// Author name, if the lookup returned it.
    #[serde(default)]
    pub name: Option<String>,
}

/// A filled author from Semantic Scholar.
///
/// Every field is optional on the wire; the accessors below substitute the
/// snapshot's defaults (empty text, zero counts, no publications).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    /// Semantic Scholar author ID.
    #[serde(default)]
    pub author_id: Option<String>,

    /// Author name.
    #[serde(default)]
    pub name: Option<String>,

    /// Institutional affiliations.
    #[serde(default)]
    pub affiliations: Option<Vec<String>>,

    /// Total citation count across all papers.
    #[serde(default)]
    pub citation_count: Option<u64>,

    /// h-index metric.
    #[serde(default)]
    pub h_index: Option<u64>,

    /// Total number of papers by this author.
    #[serde(default)]
    pub paper_count: Option<u64>,

    /// Raw publication records, decoded one at a time so a malformed entry
    /// only costs that entry.
    #[serde(default)]
    pub papers: Option<Vec<serde_json::Value>>,
}

impl Author {
    /// Author name, or empty.
    #[must_use]
    pub fn name_or_default(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    /// Affiliations joined with ", ", or empty.
    #[must_use]
    pub fn affiliation(&self) -> String {
        self.affiliations
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(|a| a.trim())
            .filter(|a| !a.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Get citation count or 0 if not available.
    #[must_use]
    pub fn citations(&self) -> u64 {
        self.citation_count.unwrap_or(0)
    }

    /// Get the h-index or 0 if not available.
    #[must_use]
    pub fn h_index_value(&self) -> u64 {
        self.h_index.unwrap_or(0)
    }

    /// Raw publication records in source order.
    #[must_use]
    pub fn publications(&self) -> &[serde_json::Value] {
        self.papers.as_deref().unwrap_or_default()
    }

    /// Reported paper count, falling back to the number of listed publications.
    #[must_use]
    pub fn publication_count(&self) -> u64 {
        self.paper_count.unwrap_or(self.publications().len() as u64)
    }

    /// Number of listed publications with at least ten citations.
    ///
    /// The API has no i10 field, so this is computed over every listed
    /// publication, not just the bounded set.
    #[must_use]
    pub fn i10_index(&self) -> u64 {
        self.i10_index_with(&[])
    }

    /// i10-index where `enriched[i]`, when present, replaces the listed
    /// citation count of the i-th listed publication.
    ///
    /// Publications past the end of `enriched`, or with `None`, keep their
    /// listed count.
    #[must_use]
    pub fn i10_index_with(&self, enriched: &[Option<u64>]) -> u64 {
        self.publications()
            .iter()
            .enumerate()
            .filter_map(|(i, p)| {
                enriched
                    .get(i)
                    .copied()
                    .flatten()
                    .or_else(|| p.get("citationCount").and_then(serde_json::Value::as_u64))
            })
            .filter(|&c| c >= I10_THRESHOLD)
            .count() as u64
    }
}

/// Minimal author reference (used in publication author lists).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorRef {
    /// Author ID.
    #[serde(default)]
    pub author_id: Option<String>,

    /// Author name.
    #[serde(default)]
    pub name: Option<String>,
}
