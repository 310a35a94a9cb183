//! # tracing-burst
//!
//! Token-bucket burst filtering for the `tracing` ecosystem.
//!
//! This crate provides a `tracing_subscriber` filter that caps how many
//! low-severity log events pass in a burst, then lets throughput recover step
//! by step over time. Events more severe than a configured threshold are never
//! throttled.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tracing_burst::{BurstFilterLayer, Severity};
//! use tracing_subscriber::prelude::*;
//! use std::time::Duration;
//!
//! // INFO and below: a burst of 100, then 10 more every 6 seconds.
//! // WARN and ERROR always pass.
//! let burst = BurstFilterLayer::builder()
//!     .with_threshold(Severity::Info)
//!     .with_recovery_amount(10)
//!     .with_recovery_interval(Duration::from_secs(6))
//!     .with_max_burst(100)
//!     .build()
//!     .unwrap();
//!
//! tracing_subscriber::registry()
//!     .with(tracing_subscriber::fmt::layer().with_filter(burst))
//!     .init();
//! ```
//!
//! ## How the Bucket Works
//!
//! The bucket starts full with `max_burst` tokens. Every throttled event takes
//! one token; when none are left the event is denied. Every whole
//! `recovery_interval` that has passed since the last *admitted* event adds
//! `recovery_amount` tokens, never more than `max_burst` in total.
//!
//! Time is measured in whole seconds and refill is a step function: with a
//! 6 second interval, 11 seconds earn one refill and 12 seconds earn two.
//! Denied events do not move the refill baseline, so a steady trickle of
//! denied events does not delay recovery.
//!
//! ```text
//! threshold = INFO, recovery_amount = 10, recovery_interval = 6s, max_burst = 100
//!
//! t = 0s    110 × INFO   →  100 admitted, 10 denied     (bucket empty)
//! t = 12s   110 × INFO   →   20 admitted, 90 denied     (2 intervals × 10)
//! t = 12s   110 × DEBUG  →    0 admitted, 110 denied    (still empty)
//! t = 12s    10 × ERROR  →   10 admitted                (above threshold)
//! ```
//!
//! ## Severity Threshold
//!
//! [`Severity`] orders levels from least to most severe:
//! `TRACE < DEBUG < INFO < WARN < ERROR`. Events at or below the threshold go
//! through the bucket; events strictly above it are admitted without touching
//! the bucket. The default threshold is `WARN`.
//!
//! ## Configuration
//!
//! Use the typed builder, or assemble a [`BurstConfig`] from textual
//! parameters supplied by the host:
//!
//! ```rust
//! use tracing_burst::{BurstConfig, BurstFilterLayer};
//!
//! let config = BurstConfig::from_params([
//!     ("level", "INFO"),
//!     ("recovery_amount", "10"),
//!     ("recovery_interval", "6"),
//!     ("max_burst", "100"),
//! ])
//! .expect("valid config");
//!
//! let burst = BurstFilterLayer::from_config(config);
//! ```
//!
//! Invalid configuration (a zero or fractional recovery interval, negative or
//! malformed numbers, unknown levels) is rejected up front with a
//! [`ConfigError`]; the filter itself never fails at runtime.
//!
//! ## Using the Filter Directly
//!
//! [`RateFilter`] is independent of `tracing` and can gate any stream of
//! events that carry a severity:
//!
//! ```rust
//! use tracing_burst::{BurstConfig, RateFilter, Severity, SystemClock};
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! let config = BurstConfig::new(Severity::Info, 1, Duration::from_secs(1), 3).unwrap();
//! let filter = RateFilter::new(config, Arc::new(SystemClock::new()));
//!
//! let admitted = (0..10).filter(|_| filter.decide(Severity::Info).is_admit()).count();
//! assert_eq!(admitted, 3);
//! ```
//!
//! ## Observability
//!
//! ```rust,no_run
//! # use tracing_burst::{BurstFilterLayer, Severity};
//! # use std::time::Duration;
//! # let burst = BurstFilterLayer::builder()
//! #     .with_recovery_interval(Duration::from_secs(1))
//! #     .build()
//! #     .unwrap();
//! let metrics = burst.metrics();
//! println!("Events admitted: {}", metrics.events_admitted());
//! println!("Events denied: {}", metrics.events_denied());
//! println!("Above threshold: {}", metrics.events_bypassed());
//!
//! let snapshot = metrics.snapshot();
//! println!("Denial rate: {:.2}%", snapshot.denial_rate() * 100.0);
//! ```
//!
//! ## Concurrency
//!
//! The bucket is created lazily on the first throttled event, exactly once
//! even when many threads race for it. Each throttled decision reads the
//! clock, refills, checks and takes a token under one mutex, so the filter
//! never admits more events than its accounting allows.
//!
//! ## Testing
//!
//! Inject a clock with `with_clock` to simulate elapsed time. The
//! `test-helpers` feature exposes `MockClock` and `MockCaptureLayer` under
//! `infrastructure::mocks`.

// Domain layer - pure logic
pub mod domain;

// Application layer - orchestration
pub mod application;

// Infrastructure layer - external adapters
pub mod infrastructure;

// Re-export commonly used types for convenience
pub use domain::{
    bucket::TokenBucket,
    config::{BurstConfig, ConfigError},
    severity::Severity,
};

pub use application::{
    filter::{Decision, FilterState, RateFilter},
    metrics::{Metrics, MetricsSnapshot},
    ports::Clock,
};

pub use infrastructure::{
    clock::SystemClock,
    layer::{BuildError, BurstFilterLayer, BurstFilterLayerBuilder},
};
