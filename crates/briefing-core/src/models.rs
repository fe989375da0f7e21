use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::ExtractionAnomaly;

/// A stored front-page article.
///
/// `link` is the canonical absolute URL and is unique across the store.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Article {
    pub id: Uuid,
    pub title: String,
    pub link: String,
    pub created_at: DateTime<Utc>,
    /// Reserved for downstream consumers; always false on creation.
    pub is_processed: bool,
}

/// A (title, link) pair extracted from a story row, not yet persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub title: String,
    pub link: String,
}

impl Candidate {
    pub fn new(title: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            link: link.into(),
        }
    }
}

/// Result of extracting a single story row.
#[derive(Debug, Clone, PartialEq)]
pub enum RowOutcome {
    Candidate(Candidate),
    /// The row was dropped. `rank` is its 1-based position on the page.
    Skipped {
        rank: usize,
        anomaly: ExtractionAnomaly,
    },
}

impl RowOutcome {
    pub fn candidate(&self) -> Option<&Candidate> {
        match self {
            RowOutcome::Candidate(c) => Some(c),
            RowOutcome::Skipped { .. } => None,
        }
    }

    pub fn into_candidate(self) -> Option<Candidate> {
        match self {
            RowOutcome::Candidate(c) => Some(c),
            RowOutcome::Skipped { .. } => None,
        }
    }
}
