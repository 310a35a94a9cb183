//! Tracing integration layer.
//!
//! Provides a `tracing_subscriber` per-layer filter that applies the burst
//! filter to log events.

use crate::application::{
    filter::{Decision, FilterState, RateFilter},
    metrics::Metrics,
    ports::Clock,
};
use crate::domain::{
    config::{BurstConfig, ConfigError},
    severity::Severity,
};
use crate::infrastructure::clock::SystemClock;

use std::sync::Arc;
use std::time::Duration;
use tracing::{Level, Metadata, Subscriber};
use tracing_subscriber::layer::{Context, Filter};

/// Error returned when building a BurstFilterLayer fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// Filter configuration validation failed
    Config(ConfigError),
}

impl std::fmt::Display for BuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuildError::Config(e) => write!(f, "burst filter configuration error: {}", e),
        }
    }
}

impl std::error::Error for BuildError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BuildError::Config(e) => Some(e),
        }
    }
}

impl From<ConfigError> for BuildError {
    fn from(e: ConfigError) -> Self {
        BuildError::Config(e)
    }
}

/// Builder for constructing a `BurstFilterLayer`.
///
/// Defaults:
/// - Threshold: `WARN` (so `ERROR` events are never throttled)
/// - Recovery amount: 0
/// - Recovery interval: unset (0), which fails validation
/// - Max burst: 0
/// - Clock: `SystemClock`
#[derive(Debug, Clone)]
pub struct BurstFilterLayerBuilder {
    threshold: Severity,
    recovery_amount: u64,
    recovery_interval: Duration,
    max_burst: u64,
    clock: Option<Arc<dyn Clock>>,
}

impl BurstFilterLayerBuilder {
    /// Set the severity threshold.
    ///
    /// Events at or below this severity are throttled; anything more severe
    /// always passes.
    pub fn with_threshold(mut self, threshold: Severity) -> Self {
        self.threshold = threshold;
        self
    }

    /// Set how many events are allowed back per recovery interval.
    pub fn with_recovery_amount(mut self, amount: u64) -> Self {
        self.recovery_amount = amount;
        self
    }

    /// Set the recovery interval.
    ///
    /// Must be a whole, non-zero number of seconds; validated when `build()`
    /// is called.
    pub fn with_recovery_interval(mut self, interval: Duration) -> Self {
        self.recovery_interval = interval;
        self
    }

    /// Set the maximum burst of throttled events.
    pub fn with_max_burst(mut self, max_burst: u64) -> Self {
        self.max_burst = max_burst;
        self
    }

    /// Take all settings from an already validated configuration.
    pub fn with_config(mut self, config: BurstConfig) -> Self {
        self.threshold = config.threshold();
        self.recovery_amount = config.recovery_amount();
        self.recovery_interval = config.recovery_interval();
        self.max_burst = config.max_burst();
        self
    }

    /// Set a custom clock (mainly for testing).
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Build the layer.
    ///
    /// # Errors
    /// Returns `BuildError` if the configuration is invalid.
    pub fn build(self) -> Result<BurstFilterLayer, BuildError> {
        let config = BurstConfig::new(
            self.threshold,
            self.recovery_amount,
            self.recovery_interval,
            self.max_burst,
        )?;

        tracing::debug!(
            threshold = %config.threshold(),
            recovery_amount = config.recovery_amount(),
            recovery_interval_secs = config.recovery_interval().as_secs(),
            max_burst = config.max_burst(),
            "burst filter configured"
        );

        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock::new()));
        Ok(BurstFilterLayer {
            filter: Arc::new(RateFilter::new(config, clock)),
        })
    }
}

/// A `tracing_subscriber` filter that limits bursts of low-severity events.
///
/// Install it on a layer with `Layer::with_filter`. Clones share the same
/// bucket and metrics, so keep a clone around to observe the installed
/// filter.
///
/// # Example
/// ```no_run
/// use tracing_burst::{BurstFilterLayer, Severity};
/// use tracing_subscriber::prelude::*;
/// use std::time::Duration;
///
/// // Burst of 100 INFO-and-below events, then 10 more every 6 seconds
/// let burst = BurstFilterLayer::builder()
///     .with_threshold(Severity::Info)
///     .with_recovery_amount(10)
///     .with_recovery_interval(Duration::from_secs(6))
///     .with_max_burst(100)
///     .build()
///     .unwrap();
///
/// tracing_subscriber::registry()
///     .with(tracing_subscriber::fmt::layer().with_filter(burst))
///     .init();
/// ```
#[derive(Debug, Clone)]
pub struct BurstFilterLayer {
    filter: Arc<RateFilter>,
}

impl BurstFilterLayer {
    /// Create a builder for configuring the layer.
    pub fn builder() -> BurstFilterLayerBuilder {
        BurstFilterLayerBuilder {
            threshold: Severity::default(),
            recovery_amount: 0,
            recovery_interval: Duration::ZERO,
            max_burst: 0,
            clock: None,
        }
    }

    /// Create a layer from a validated configuration, using the system clock.
    pub fn from_config(config: BurstConfig) -> Self {
        Self {
            filter: Arc::new(RateFilter::new(config, Arc::new(SystemClock::new()))),
        }
    }

    /// Decide whether an event of the given severity may pass.
    pub fn decide(&self, severity: Severity) -> Decision {
        self.filter.decide(severity)
    }

    /// Check if an event at this tracing level should be allowed through.
    pub fn should_allow(&self, level: &Level) -> bool {
        self.decide(Severity::from(level)).is_admit()
    }

    /// Get a reference to the underlying filter.
    pub fn filter(&self) -> &RateFilter {
        &self.filter
    }

    /// Get a reference to the metrics.
    pub fn metrics(&self) -> &Metrics {
        self.filter.metrics()
    }

    /// Whether the bucket has been created yet.
    pub fn state(&self) -> FilterState {
        self.filter.state()
    }

    /// Tokens left in the bucket, or `None` before the bucket exists.
    pub fn available_tokens(&self) -> Option<u64> {
        self.filter.available_tokens()
    }
}

impl<S> Filter<S> for BurstFilterLayer
where
    S: Subscriber,
{
    fn enabled(&self, _meta: &Metadata<'_>, _cx: &Context<'_, S>) -> bool {
        // Spans always pass; events are decided in event_enabled so that each
        // event takes at most one token
        true
    }

    fn event_enabled(&self, event: &tracing::Event<'_>, _cx: &Context<'_, S>) -> bool {
        self.should_allow(event.metadata().level())
    }
}
