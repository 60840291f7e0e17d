//! Publication data model matching Semantic Scholar API schema.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::AuthorRef;

/// A publication from an author's paper list, or from a paper detail request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Publication {
    /// Semantic Scholar paper ID.
    #[serde(default)]
    pub paper_id: Option<String>,

    /// S2 corpus ID.
    #[serde(default)]
    pub corpus_id: Option<u64>,

    /// Paper title.
    #[serde(default)]
    pub title: Option<String>,

    /// Publication year.
    #[serde(default)]
    pub year: Option<i32>,

    /// Publication venue (journal or conference).
    #[serde(default)]
    pub venue: Option<String>,

    /// Number of citations this paper has received.
    #[serde(default)]
    pub citation_count: Option<u64>,

    /// List of authors.
    #[serde(default)]
    pub authors: Option<Vec<AuthorRef>>,
}

/// How a publication is keyed in the snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublicationId {
    /// The paper's Semantic Scholar ID.
    Paper(String),
    /// `CorpusId:<n>`, accepted by the paper endpoint.
    Corpus(u64),
    /// `pub_<n>` from the publication's position; not addressable.
    Synthetic(usize),
}

impl PublicationId {
    /// Identifier usable with the paper detail endpoint, if any.
    #[must_use]
    pub fn service_id(&self) -> Option<String> {
        match self {
            Self::Synthetic(_) => None,
            _ => Some(self.to_string()),
        }
    }
}

impl fmt::Display for PublicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Paper(id) => f.write_str(id),
            Self::Corpus(id) => write!(f, "CorpusId:{id}"),
            Self::Synthetic(index) => write!(f, "pub_{index}"),
        }
    }
}

impl Publication {
    /// Identifier for the snapshot: paper ID, then corpus ID, then `pub_<index>`.
    ///
    /// `index` is the 0-based position in the bounded set.
    #[must_use]
    pub fn identifier(&self, index: usize) -> PublicationId {
        if let Some(id) = self.paper_id.as_deref().map(str::trim).filter(|id| !id.is_empty()) {
            return PublicationId::Paper(id.to_string());
        }
        match self.corpus_id {
            Some(corpus) => PublicationId::Corpus(corpus),
            None => PublicationId::Synthetic(index),
        }
    }

    /// Get the paper title, falling back to "Unknown" if not available.
    #[must_use]
    pub fn title_or_default(&self) -> &str {
        self.title.as_deref().unwrap_or("Unknown")
    }

    /// Year as text, or empty.
    #[must_use]
    pub fn year_text(&self) -> String {
        self.year.map(|y| y.to_string()).unwrap_or_default()
    }

    /// Venue, or empty.
    #[must_use]
    pub fn venue_or_default(&self) -> &str {
        self.venue.as_deref().unwrap_or("")
    }

    /// Get citation count or 0 if not available.
    #[must_use]
    pub fn citations(&self) -> u64 {
        self.citation_count.unwrap_or(0)
    }

    /// Author names joined with " and ", or empty.
    #[must_use]
    pub fn author_names(&self) -> String {
        self.authors
            .as_deref()
            .unwrap_or_default()
            .iter()
            .filter_map(|a| a.name.as_deref())
            .collect::<Vec<_>>()
            .join(" and ")
    }
}
