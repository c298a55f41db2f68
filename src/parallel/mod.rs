//! Parallel batch query execution.
//!
//! [`process_queries`] fans a batch of queries out across the rayon
//! pool against a shared immutable [`SearchIndex`]; output slot `i`
//! always holds the result of query `i`. [`process_queries_joined`]
//! flattens the per-query lists in query order.
//!
//! The index carries no internal locking: the caller must ensure no
//! writer runs while a batch is in flight.

pub mod engine;
pub mod metrics;

pub use engine::{BatchSearchConfig, BatchSearchEngine};
pub use metrics::{BatchMetrics, BatchMetricsCollector};

use rayon::prelude::*;

use crate::document::SearchHit;
use crate::error::Result;
use crate::index::SearchIndex;

/// Evaluate each query independently, preserving batch order.
///
/// Every query is ranked with the default status filter
/// ([`SearchIndex::find_top_documents`]). The first invalid query fails
/// the whole batch.
///
/// # Examples
///
/// ```
/// use pilum::document::DocumentStatus;
/// use pilum::index::SearchIndex;
/// use pilum::parallel::process_queries;
///
/// let mut index = SearchIndex::new();
/// index.add_document(1, "fluffy cat", DocumentStatus::Actual, &[1]).unwrap();
///
/// let queries = vec!["cat".to_string(), "dog".to_string()];
/// let results = process_queries(&index, &queries).unwrap();
///
/// assert_eq!(results.len(), 2);
/// assert_eq!(results[0][0].doc_id, 1);
/// assert!(results[1].is_empty());
/// ```
pub fn process_queries(index: &SearchIndex, queries: &[String]) -> Result<Vec<Vec<SearchHit>>> {
    queries
        .par_iter()
        .map(|query| index.find_top_documents(query))
        .collect()
}

/// Evaluate a batch and concatenate the per-query results in order.
///
/// Equal to the left-fold concatenation of [`process_queries`] output.
pub fn process_queries_joined(index: &SearchIndex, queries: &[String]) -> Result<Vec<SearchHit>> {
    Ok(process_queries(index, queries)?
        .into_iter()
        .flatten()
        .collect())
}
