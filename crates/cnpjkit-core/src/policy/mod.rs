//! Retry and pacing policies.
//!
//! Two independent layers wrap every query:
//! ```text
//! Batch → [BatchRetryPolicy: pacing, cooldown, one retry pass]
//!       → LookupClient → [RateLimitPolicy: up to 3 attempts on 429] → Transport
//! ```
//! Durations are computed here; the actual waiting goes through a [`Sleeper`]
//! so tests can run the whole state machine without wall-clock delays.

pub mod delay;
pub mod pacing;
pub mod retry;

pub use delay::{DelayRange, RecordingSleeper, Sleeper, TokioSleeper};
pub use pacing::BatchRetryPolicy;
pub use retry::RateLimitPolicy;
