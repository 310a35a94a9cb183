//! Token bucket used to bound event bursts.
//!
//! The bucket starts full and refills in whole steps: every `fill_interval`
//! seconds that have elapsed since the last granted token add `fill_amount`
//! tokens, capped at `max_tokens`. There are no fractional tokens.

use std::num::NonZeroU64;
use std::time::Instant;

/// Bounded token counter with step-wise, time-based refill.
///
/// `TokenBucket` is a plain state machine; callers that share it between
/// threads must serialize calls to [`request_token`](Self::request_token).
///
/// Time is tracked at one-second resolution on a timeline that starts at the
/// instant the bucket was created.
///
/// # Example
/// ```
/// use tracing_burst::TokenBucket;
/// use std::num::NonZeroU64;
/// use std::time::{Duration, Instant};
///
/// let start = Instant::now();
/// let mut bucket = TokenBucket::new(1, NonZeroU64::new(5).unwrap(), 2, start);
///
/// assert!(bucket.request_token(start));
/// assert!(bucket.request_token(start));
/// assert!(!bucket.request_token(start));
///
/// // One full interval later a single token is back
/// let later = start + Duration::from_secs(5);
/// assert!(bucket.request_token(later));
/// assert!(!bucket.request_token(later));
/// ```
#[derive(Debug, Clone)]
pub struct TokenBucket {
    fill_amount: u64,
    fill_interval: NonZeroU64,
    max_tokens: u64,
    current_tokens: u64,
    epoch: Instant,
    /// Whole seconds since `epoch` of the last granted token (or creation).
    last_refill_secs: u64,
}

impl TokenBucket {
    /// Create a full bucket.
    ///
    /// # Arguments
    /// * `fill_amount` - Tokens added per elapsed interval
    /// * `fill_interval` - Interval length in whole seconds
    /// * `max_tokens` - Capacity, and the initial token count
    /// * `now` - Creation instant, the start of the bucket's timeline
    pub fn new(fill_amount: u64, fill_interval: NonZeroU64, max_tokens: u64, now: Instant) -> Self {
        Self {
            fill_amount,
            fill_interval,
            max_tokens,
            current_tokens: max_tokens,
            epoch: now,
            last_refill_secs: 0,
        }
    }

    /// Try to take one token.
    ///
    /// Refills first, then takes a token if one is available. Only a granted
    /// token moves the refill baseline to `now`; a denied request leaves it
    /// where it was.
    pub fn request_token(&mut self, now: Instant) -> bool {
        let now_secs = self.seconds_at(now);
        self.refill(now_secs);

        if self.current_tokens == 0 {
            return false;
        }

        self.current_tokens -= 1;
        self.last_refill_secs = now_secs;
        true
    }

    /// Tokens currently stored, without refilling.
    pub fn available_tokens(&self) -> u64 {
        self.current_tokens
    }

    /// Capacity of the bucket.
    pub fn max_tokens(&self) -> u64 {
        self.max_tokens
    }

    /// Tokens added per elapsed interval.
    pub fn fill_amount(&self) -> u64 {
        self.fill_amount
    }

    /// Refill interval in whole seconds.
    pub fn fill_interval(&self) -> NonZeroU64 {
        self.fill_interval
    }

    fn refill(&mut self, now_secs: u64) {
        let elapsed = now_secs.saturating_sub(self.last_refill_secs);
        let interval = self.fill_interval.get();
        if elapsed < interval {
            return;
        }

        let cycles = elapsed / interval;
        let added = cycles.saturating_mul(self.fill_amount);
        self.current_tokens = self
            .current_tokens
            .saturating_add(added)
            .min(self.max_tokens);
    }

    fn seconds_at(&self, now: Instant) -> u64 {
        now.saturating_duration_since(self.epoch).as_secs()
    }
}
