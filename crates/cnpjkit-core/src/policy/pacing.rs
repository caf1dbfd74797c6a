//! Batch-level pacing and the single retry pass.

use std::time::Duration;

use super::delay::DelayRange;

/// How the batch processor spaces queries and retries failures.
#[derive(Debug, Clone)]
pub struct BatchRetryPolicy {
    /// Wait after every query, whatever its outcome.
    pub pacing: DelayRange,
    /// Wait before the retry pass starts.
    pub cooldown: Duration,
    /// Run one retry pass over the first-pass failures.
    pub retry_pass: bool,
}

impl Default for BatchRetryPolicy {
    fn default() -> Self {
        Self {
            pacing: DelayRange::secs(3, 7),
            cooldown: Duration::from_secs(30),
            retry_pass: true,
        }
    }
}

impl BatchRetryPolicy {
    /// Next pacing delay.
    pub fn pacing_delay(&self) -> Duration {
        self.pacing.sample()
    }

    /// Returns `true` if a retry pass should run over `pending` failures.
    pub fn should_retry(&self, pending: usize) -> bool {
        self.retry_pass && pending > 0
    }
}
