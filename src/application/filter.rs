//! Severity-gated burst filter.
//!
//! The filter admits every event above its threshold and asks a token bucket
//! about everything else. The bucket is created on the first decision that
//! needs it and shared by all callers afterwards.

use crate::application::metrics::Metrics;
use crate::application::ports::Clock;
use crate::domain::{bucket::TokenBucket, config::BurstConfig, severity::Severity};

use std::sync::{Arc, Mutex, OnceLock, PoisonError};
use std::time::Duration;

/// Decision about how to handle an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Let the event through
    Admit,
    /// Drop the event
    Deny,
}

impl Decision {
    /// Check if this decision is Admit.
    pub fn is_admit(&self) -> bool {
        matches!(self, Decision::Admit)
    }

    /// Check if this decision is Deny.
    pub fn is_deny(&self) -> bool {
        matches!(self, Decision::Deny)
    }
}

/// Lifecycle of a filter's bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterState {
    /// No throttled decision has been made yet; the bucket does not exist
    Uninitialized,
    /// The bucket exists and is being drawn from
    Active,
}

/// Burst filter: a severity threshold in front of a token bucket.
///
/// `decide` is safe to call from many threads at once. Bucket creation
/// happens at most once, and each throttled decision reads the clock,
/// refills, checks and takes a token under a single lock, so concurrent
/// callers can never be granted the same token.
///
/// # Example
/// ```
/// use tracing_burst::{BurstConfig, RateFilter, Severity, SystemClock};
/// use std::sync::Arc;
/// use std::time::Duration;
///
/// let config = BurstConfig::new(Severity::Info, 1, Duration::from_secs(60), 2).unwrap();
/// let filter = RateFilter::new(config, Arc::new(SystemClock::new()));
///
/// assert!(filter.decide(Severity::Info).is_admit());
/// assert!(filter.decide(Severity::Debug).is_admit());
/// assert!(filter.decide(Severity::Info).is_deny());
///
/// // Above the threshold nothing is throttled
/// assert!(filter.decide(Severity::Error).is_admit());
/// ```
#[derive(Debug)]
pub struct RateFilter {
    config: BurstConfig,
    clock: Arc<dyn Clock>,
    bucket: OnceLock<Mutex<TokenBucket>>,
    metrics: Metrics,
}

impl RateFilter {
    /// Create a filter with fresh metrics.
    pub fn new(config: BurstConfig, clock: Arc<dyn Clock>) -> Self {
        Self::with_metrics(config, clock, Metrics::new())
    }

    /// Create a filter that records into the given metrics.
    pub fn with_metrics(config: BurstConfig, clock: Arc<dyn Clock>, metrics: Metrics) -> Self {
        Self {
            config,
            clock,
            bucket: OnceLock::new(),
            metrics,
        }
    }

    /// Decide whether an event of the given severity may pass.
    ///
    /// Events strictly more severe than the threshold are always admitted
    /// and never touch the bucket. Everything else takes a token or is
    /// denied. This never fails.
    pub fn decide(&self, severity: Severity) -> Decision {
        if severity > self.config.threshold() {
            self.metrics.record_bypassed();
            return Decision::Admit;
        }

        let granted = {
            let mut bucket = self
                .bucket()
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            bucket.request_token(self.clock.now())
        };

        if granted {
            self.metrics.record_admitted();
            Decision::Admit
        } else {
            self.metrics.record_denied();
            Decision::Deny
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> FilterState {
        if self.bucket.get().is_some() {
            FilterState::Active
        } else {
            FilterState::Uninitialized
        }
    }

    /// Tokens left in the bucket, or `None` before the bucket exists.
    ///
    /// The value is not refilled for elapsed time; it reflects the bucket as
    /// of the last throttled decision.
    pub fn available_tokens(&self) -> Option<u64> {
        self.bucket.get().map(|bucket| {
            bucket
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .available_tokens()
        })
    }

    /// Severity threshold.
    pub fn threshold(&self) -> Severity {
        self.config.threshold()
    }

    /// Tokens restored per recovery interval.
    pub fn recovery_amount(&self) -> u64 {
        self.config.recovery_amount()
    }

    /// Recovery interval.
    pub fn recovery_interval(&self) -> Duration {
        self.config.recovery_interval()
    }

    /// Maximum burst.
    pub fn max_burst(&self) -> u64 {
        self.config.max_burst()
    }

    /// The configuration this filter was built from.
    pub fn config(&self) -> &BurstConfig {
        &self.config
    }

    /// Get a reference to the metrics.
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    fn bucket(&self) -> &Mutex<TokenBucket> {
        self.bucket.get_or_init(|| {
            Mutex::new(TokenBucket::new(
                self.config.recovery_amount(),
                self.config.recovery_interval_secs(),
                self.config.max_burst(),
                self.clock.now(),
            ))
        })
    }
}
