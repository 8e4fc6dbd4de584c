//! Resolution metrics.
//!
//! Counts how resolutions were answered (memo, exact index, fuzzy search)
//! and how many failed. Each resolver owns its own counters.

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Counters for one resolver.
#[derive(Debug, Default)]
pub struct ResolutionMetrics {
    /// Resolutions answered from the memo
    memo_hits: AtomicUsize,

    /// Resolutions that had to consult the registry
    memo_misses: AtomicUsize,

    /// Registry lookups answered by the exact-match index
    exact_hits: AtomicUsize,

    /// Registry lookups answered by fuzzy search above the threshold
    fuzzy_hits: AtomicUsize,

    /// Resolutions that failed
    failures: AtomicUsize,
}

impl ResolutionMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_memo_hit(&self) {
        self.memo_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_memo_miss(&self) {
        self.memo_misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_exact_hit(&self) {
        self.exact_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_fuzzy_hit(&self) {
        self.fuzzy_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_failure(&self) {
        self.failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn memo_hits(&self) -> usize {
        self.memo_hits.load(Ordering::Relaxed)
    }

    pub fn memo_misses(&self) -> usize {
        self.memo_misses.load(Ordering::Relaxed)
    }

    pub fn exact_hits(&self) -> usize {
        self.exact_hits.load(Ordering::Relaxed)
    }

    pub fn fuzzy_hits(&self) -> usize {
        self.fuzzy_hits.load(Ordering::Relaxed)
    }

    pub fn failures(&self) -> usize {
        self.failures.load(Ordering::Relaxed)
    }

    /// Generate a metrics report.
    pub fn report(&self) -> MetricsReport {
        let hits = self.memo_hits();
        let misses = self.memo_misses();
        let total = hits + misses;
        let memo_hit_rate = if total > 0 {
            (hits as f64 / total as f64) * 100.0
        } else {
            0.0
        };

        MetricsReport {
            memo_hits: hits,
            memo_misses: misses,
            memo_hit_rate,
            exact_hits: self.exact_hits(),
            fuzzy_hits: self.fuzzy_hits(),
            failures: self.failures(),
        }
    }

    /// Reset all counters to zero.
    pub fn reset(&self) {
        self.memo_hits.store(0, Ordering::Relaxed);
        self.memo_misses.store(0, Ordering::Relaxed);
        self.exact_hits.store(0, Ordering::Relaxed);
        self.fuzzy_hits.store(0, Ordering::Relaxed);
        self.failures.store(0, Ordering::Relaxed);
    }
}

/// Snapshot of a resolver's counters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsReport {
    pub memo_hits: usize,
    pub memo_misses: usize,

    /// Memo hit rate as a percentage (0-100)
    pub memo_hit_rate: f64,

    pub exact_hits: usize,
    pub fuzzy_hits: usize,
    pub failures: usize,
}
