//! Metrics collection for batch query execution.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// A point-in-time snapshot of batch execution metrics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchMetrics {
    /// Number of batches executed.
    pub total_batches: u64,
    /// Number of individual queries evaluated across all batches.
    pub total_queries: u64,
    /// Number of hits returned across all batches.
    pub total_hits: u64,
    /// Number of batches that failed.
    pub failed_batches: u64,
    /// Total wall-clock time spent executing batches.
    pub total_execution_time: Duration,
    /// Average wall-clock time per batch.
    pub avg_execution_time: Duration,
    /// Longest observed batch.
    pub max_execution_time: Duration,
    /// Shortest observed batch, zero before the first batch.
    pub min_execution_time: Duration,
}

/// Thread-safe collector backing [`BatchMetrics`].
///
/// All counters are atomics, so recording from concurrently running
/// batches needs no lock.
#[derive(Debug, Default)]
pub struct BatchMetricsCollector {
    total_batches: AtomicU64,
    total_queries: AtomicU64,
    total_hits: AtomicU64,
    failed_batches: AtomicU64,
    total_execution_nanos: AtomicU64,
    max_execution_nanos: AtomicU64,
    min_execution_nanos: AtomicU64,
}

impl BatchMetricsCollector {
    /// Create a new collector with all counters at zero.
    pub fn new() -> Self {
        BatchMetricsCollector {
            min_execution_nanos: AtomicU64::new(u64::MAX),
            ..BatchMetricsCollector::default()
        }
    }

    /// Record a completed batch.
    pub fn record_batch(&self, queries: u64, hits: u64, elapsed: Duration) {
        let nanos = elapsed.as_nanos() as u64;

        self.total_batches.fetch_add(1, Ordering::Relaxed);
        self.total_queries.fetch_add(queries, Ordering::Relaxed);
        self.total_hits.fetch_add(hits, Ordering::Relaxed);
        self.total_execution_nanos.fetch_add(nanos, Ordering::Relaxed);
        self.max_execution_nanos.fetch_max(nanos, Ordering::Relaxed);
        self.min_execution_nanos.fetch_min(nanos, Ordering::Relaxed);
    }

    /// Record a failed batch.
    pub fn record_failure(&self, queries: u64, elapsed: Duration) {
        self.failed_batches.fetch_add(1, Ordering::Relaxed);
        self.total_batches.fetch_add(1, Ordering::Relaxed);
        self.total_queries.fetch_add(queries, Ordering::Relaxed);
        self.total_execution_nanos
            .fetch_add(elapsed.as_nanos() as u64, Ordering::Relaxed);
    }

    /// Snapshot the current counters.
    pub fn snapshot(&self) -> BatchMetrics {
        let total_batches = self.total_batches.load(Ordering::Relaxed);
        let total_nanos = self.total_execution_nanos.load(Ordering::Relaxed);
        let min_nanos = self.min_execution_nanos.load(Ordering::Relaxed);

        BatchMetrics {
            total_batches,
            total_queries: self.total_queries.load(Ordering::Relaxed),
            total_hits: self.total_hits.load(Ordering::Relaxed),
            failed_batches: self.failed_batches.load(Ordering::Relaxed),
            total_execution_time: Duration::from_nanos(total_nanos),
            avg_execution_time: if total_batches == 0 {
                Duration::ZERO
            } else {
                Duration::from_nanos(total_nanos / total_batches)
            },
            max_execution_time: Duration::from_nanos(
                self.max_execution_nanos.load(Ordering::Relaxed),
            ),
            min_execution_time: if min_nanos == u64::MAX {
                Duration::ZERO
            } else {
                Duration::from_nanos(min_nanos)
            },
        }
    }
}
