//! Observability metrics for the burst filter.
//!
//! Counts how many events were admitted, denied, or admitted without
//! consulting the bucket because they were above the severity threshold.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Metrics tracking burst filter decisions.
///
/// All metrics use atomic operations for thread-safe updates and reads.
/// Clones share the same counters.
#[derive(Debug, Clone)]
pub struct Metrics {
    inner: Arc<MetricsInner>,
}

#[derive(Debug)]
struct MetricsInner {
    /// Total number of events admitted, bypassed events included
    events_admitted: AtomicU64,
    /// Total number of events denied
    events_denied: AtomicU64,
    /// Events admitted because they were above the threshold
    events_bypassed: AtomicU64,
}

impl Metrics {
    /// Create a new metrics tracker.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(MetricsInner {
                events_admitted: AtomicU64::new(0),
                events_denied: AtomicU64::new(0),
                events_bypassed: AtomicU64::new(0),
            }),
        }
    }

    /// Record an event admitted by the bucket.
    pub(crate) fn record_admitted(&self) {
        self.inner.events_admitted.fetch_add(1, Ordering::Relaxed);
    }

    /// Record an event denied by the bucket.
    pub(crate) fn record_denied(&self) {
        self.inner.events_denied.fetch_add(1, Ordering::Relaxed);
    }

    /// Record an event admitted above the threshold.
    pub(crate) fn record_bypassed(&self) {
        self.inner.events_bypassed.fetch_add(1, Ordering::Relaxed);
        self.inner.events_admitted.fetch_add(1, Ordering::Relaxed);
    }

    /// Get the total number of events admitted.
    pub fn events_admitted(&self) -> u64 {
        self.inner.events_admitted.load(Ordering::Relaxed)
    }

    /// Get the total number of events denied.
    pub fn events_denied(&self) -> u64 {
        self.inner.events_denied.load(Ordering::Relaxed)
    }

    /// Get the number of events admitted without consulting the bucket.
    pub fn events_bypassed(&self) -> u64 {
        self.inner.events_bypassed.load(Ordering::Relaxed)
    }

    /// Get a snapshot of all metrics.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            events_admitted: self.events_admitted(),
            events_denied: self.events_denied(),
            events_bypassed: self.events_bypassed(),
        }
    }

    /// Reset all metrics to zero.
    ///
    /// Does not touch the bucket.
    pub fn reset(&self) {
        self.inner.events_admitted.store(0, Ordering::Relaxed);
        self.inner.events_denied.store(0, Ordering::Relaxed);
        self.inner.events_bypassed.store(0, Ordering::Relaxed);
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

/// A point-in-time snapshot of metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricsSnapshot {
    /// Total number of events admitted, bypassed events included
    pub events_admitted: u64,
    /// Total number of events denied
    pub events_denied: u64,
    /// Events admitted because they were above the threshold
    pub events_bypassed: u64,
}

impl MetricsSnapshot {
    /// Calculate the denial rate (0.0 to 1.0).
    ///
    /// Returns 0.0 if no events have been processed.
    pub fn denial_rate(&self) -> f64 {
        let total = self.total_events();
        if total == 0 {
            0.0
        } else {
            self.events_denied as f64 / total as f64
        }
    }

    /// Get the total number of events processed (admitted + denied).
    pub fn total_events(&self) -> u64 {
        self.events_admitted.saturating_add(self.events_denied)
    }

    /// Events that went through the bucket (admitted or denied by it).
    pub fn throttled_events(&self) -> u64 {
        self.total_events().saturating_sub(self.events_bypassed)
    }
}
