//! Mock clock for testing.

use crate::application::ports::Clock;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

/// Manually driven clock.
///
/// Reports a fixed start instant plus however much time the test has
/// advanced it by, so recovery intervals can be crossed without sleeping.
/// Clones share the same time, which lets a test keep one handle while the
/// filter holds another.
///
/// # Examples
///
/// ```
/// use tracing_burst::infrastructure::mocks::MockClock;
/// use tracing_burst::{BurstConfig, RateFilter, Severity};
/// use std::sync::Arc;
/// use std::time::{Duration, Instant};
///
/// let clock = MockClock::new(Instant::now());
/// let config = BurstConfig::new(Severity::Info, 1, Duration::from_secs(6), 1).unwrap();
/// let filter = RateFilter::new(config, Arc::new(clock.clone()));
///
/// assert!(filter.decide(Severity::Info).is_admit());
/// assert!(filter.decide(Severity::Info).is_deny());
///
/// clock.advance_secs(6);
/// assert!(filter.decide(Severity::Info).is_admit());
/// assert_eq!(clock.elapsed(), Duration::from_secs(6));
/// ```
#[derive(Debug, Clone)]
pub struct MockClock {
    start: Instant,
    offset: Arc<Mutex<Duration>>,
}

impl MockClock {
    /// Create a mock clock starting at a specific instant.
    pub fn new(start: Instant) -> Self {
        Self {
            start,
            offset: Arc::new(Mutex::new(Duration::ZERO)),
        }
    }

    /// Advance the clock by a duration.
    pub fn advance(&self, duration: Duration) {
        *self.offset() += duration;
    }

    /// Advance the clock by whole seconds.
    pub fn advance_secs(&self, secs: u64) {
        self.advance(Duration::from_secs(secs));
    }

    /// Set the clock to a specific instant.
    ///
    /// Instants before the start instant clamp to the start.
    pub fn set(&self, instant: Instant) {
        *self.offset() = instant.saturating_duration_since(self.start);
    }

    /// Time advanced since the start instant.
    pub fn elapsed(&self) -> Duration {
        *self.offset()
    }

    fn offset(&self) -> MutexGuard<'_, Duration> {
        self.offset
            .lock()
            .expect("MockClock mutex poisoned - a test thread panicked while holding the lock")
    }
}

impl Clock for MockClock {
    fn now(&self) -> Instant {
        self.start + self.elapsed()
    }
}
