//! Bounded retry on HTTP 429 with a randomised backoff.

use std::time::Duration;

use super::delay::DelayRange;

/// Per-lookup rate-limit retry policy.
#[derive(Debug, Clone)]
pub struct RateLimitPolicy {
    /// Total attempts per lookup, the first one included.
    pub max_attempts: u32,
    /// Wait before the next attempt after a 429.
    pub backoff: DelayRange,
}

impl Default for RateLimitPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff: DelayRange::secs(10, 20),
        }
    }
}

impl RateLimitPolicy {
    pub fn new(max_attempts: u32, backoff: DelayRange) -> Self {
        Self { max_attempts, backoff }
    }

    /// Returns `true` if another attempt is allowed after `attempt` (1-based) failed.
    pub fn should_retry(&self, attempt: u32) -> bool {
        attempt < self.max_attempts
    }

    /// Delay before the attempt following `attempt`, or `None` if the budget is spent.
    pub fn next_delay(&self, attempt: u32) -> Option<Duration> {
        self.should_retry(attempt).then(|| self.backoff.sample())
    }
}
