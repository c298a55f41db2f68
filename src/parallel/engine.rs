//! Batch search engine with a dedicated thread pool.

use std::sync::Arc;
use std::time::Instant;

use parking_lot::RwLock;
use rayon::{ThreadPool, ThreadPoolBuilder};
use serde::{Deserialize, Serialize};

use crate::document::SearchHit;
use crate::error::{PilumError, Result};
use crate::index::SearchIndex;
use crate::parallel::metrics::{BatchMetrics, BatchMetricsCollector};
use crate::parallel::{process_queries, process_queries_joined};

/// Configuration for [`BatchSearchEngine`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchSearchConfig {
    /// Thread pool size for batch execution.
    /// If `None`, uses the number of CPU cores.
    pub thread_pool_size: Option<usize>,

    /// Whether to collect execution metrics.
    pub enable_metrics: bool,
}

impl Default for BatchSearchConfig {
    fn default() -> Self {
        Self {
            thread_pool_size: None,
            enable_metrics: true,
        }
    }
}

/// Executes query batches on its own named rayon pool.
///
/// The free functions [`process_queries`] and [`process_queries_joined`]
/// run on the global pool; the engine isolates batch work from other
/// rayon users and records per-batch metrics.
///
/// # Examples
///
/// ```
/// use pilum::document::DocumentStatus;
/// use pilum::index::SearchIndex;
/// use pilum::parallel::{BatchSearchConfig, BatchSearchEngine};
///
/// let mut index = SearchIndex::new();
/// index.add_document(1, "fluffy cat", DocumentStatus::Actual, &[1]).unwrap();
///
/// let engine = BatchSearchEngine::new(BatchSearchConfig::default()).unwrap();
/// let results = engine.process(&index, &["cat".to_string()]).unwrap();
///
/// assert_eq!(results[0][0].doc_id, 1);
/// assert_eq!(engine.metrics().total_batches, 1);
/// ```
pub struct BatchSearchEngine {
    config: BatchSearchConfig,
    thread_pool: Arc<ThreadPool>,
    metrics: Arc<BatchMetricsCollector>,
    last_batch: RwLock<Option<BatchMetrics>>,
}

impl BatchSearchEngine {
    /// Create a new engine, building its thread pool.
    pub fn new(config: BatchSearchConfig) -> Result<Self> {
        let thread_pool_size = config.thread_pool_size.unwrap_or_else(num_cpus::get);

        let thread_pool = ThreadPoolBuilder::new()
            .num_threads(thread_pool_size)
            .thread_name(|i| format!("batch-search-{i}"))
            .build()
            .map_err(|e| PilumError::internal(format!("failed to create thread pool: {e}")))?;

        Ok(Self {
            config,
            thread_pool: Arc::new(thread_pool),
            metrics: Arc::new(BatchMetricsCollector::new()),
            last_batch: RwLock::new(None),
        })
    }

    /// Evaluate a batch, one result list per query, batch order preserved.
    pub fn process(&self, index: &SearchIndex, queries: &[String]) -> Result<Vec<Vec<SearchHit>>> {
        let start = Instant::now();
        let results = self.thread_pool.install(|| process_queries(index, queries));
        self.record(queries.len(), &results, start);
        results
    }

    /// Evaluate a batch and flatten the results in query order.
    pub fn process_joined(&self, index: &SearchIndex, queries: &[String]) -> Result<Vec<SearchHit>> {
        let start = Instant::now();
        let results = self
            .thread_pool
            .install(|| process_queries_joined(index, queries));

        if self.config.enable_metrics {
            match &results {
                Ok(hits) => {
                    self.metrics
                        .record_batch(queries.len() as u64, hits.len() as u64, start.elapsed());
                }
                Err(_) => self.metrics.record_failure(queries.len() as u64, start.elapsed()),
            }
            *self.last_batch.write() = Some(self.metrics.snapshot());
        }

        results
    }

    /// Snapshot of cumulative metrics.
    pub fn metrics(&self) -> BatchMetrics {
        self.metrics.snapshot()
    }

    /// Metrics as they stood after the most recent batch, if any.
    pub fn last_batch_metrics(&self) -> Option<BatchMetrics> {
        self.last_batch.read().clone()
    }

    /// Number of threads in the engine's pool.
    pub fn thread_count(&self) -> usize {
        self.thread_pool.current_num_threads()
    }

    fn record(&self, queries: usize, results: &Result<Vec<Vec<SearchHit>>>, start: Instant) {
        if !self.config.enable_metrics {
            return;
        }

        match results {
            Ok(lists) => {
                let hits = lists.iter().map(|list| list.len() as u64).sum();
                self.metrics.record_batch(queries as u64, hits, start.elapsed());
            }
            Err(_) => self.metrics.record_failure(queries as u64, start.elapsed()),
        }
        *self.last_batch.write() = Some(self.metrics.snapshot());
    }
}
