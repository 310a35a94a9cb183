//! Application layer - orchestration of domain logic.
//!
//! - Rate filter (severity gate, lazy bucket, decisions)
//! - Metrics (admitted / denied / bypassed counters)
//!
//! ## Ports
//!
//! The application layer defines ports (traits) that infrastructure
//! adapters must implement. Here that is only the clock.

pub mod filter;
pub mod metrics;
pub mod ports;
