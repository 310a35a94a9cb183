//! Domain layer - pure logic with no runtime dependencies.
//!
//! - Event severities and their ordering
//! - The token bucket
//! - Validated filter configuration
//!
//! Nothing here reads a clock or takes a lock; callers pass time in.

pub mod bucket;
pub mod config;
pub mod severity;
