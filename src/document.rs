//! Document value types shared across the index and search paths.

use serde::{Deserialize, Serialize};

/// Identifier of a document stored in the index.
///
/// Ids are non-negative; negativity is rejected at insertion. A removed
/// id may be reinserted later.
pub type DocumentId = i64;

/// Moderation status attached to every document at insertion.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentStatus {
    /// Live content, returned by default queries.
    #[default]
    Actual,
    /// Content kept in the index but excluded from default queries.
    Irrelevant,
    /// Content hidden by moderation.
    Banned,
    /// Content scheduled for removal.
    Removed,
}

/// A single ranked search result.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    /// Id of the matched document.
    pub doc_id: DocumentId,
    /// TF-IDF relevance of the document for the query.
    pub relevance: f64,
    /// Average user rating of the document.
    pub rating: i32,
}

impl SearchHit {
    /// Create a new search hit.
    pub fn new(doc_id: DocumentId, relevance: f64, rating: i32) -> Self {
        SearchHit {
            doc_id,
            relevance,
            rating,
        }
    }
}

/// Truncated integer mean of the supplied ratings.
///
/// The empty list is defined to average to 0.
pub fn average_rating(ratings: &[i32]) -> i32 {
    if ratings.is_empty() {
        return 0;
    }

    let sum: i64 = ratings.iter().map(|&r| i64::from(r)).sum();

    (sum / ratings.len() as i64) as i32
}
