//! User-visible status events and the sinks that receive them.
//!
//! The lookup client and the batch processor never print. Every branch they
//! take is described by a [`StatusEvent`] handed to a [`StatusSink`], so a
//! CLI, a UI or a test can decide what to do with it.

use std::fmt;
use std::sync::Mutex;
use std::time::Duration;

use crate::error::LookupError;
use crate::table::Table;

/// How loudly an event should be surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Something worth telling the user about.
#[derive(Debug, Clone, PartialEq)]
pub enum StatusEvent {
    /// First rows of the input, shown before any query.
    Preview { table: Table },
    Found { cnpj: String },
    InvalidIdentifier { cnpj: String },
    ApiError { cnpj: String, message: String },
    RateLimited {
        cnpj: String,
        attempt: u32,
        max_attempts: u32,
        wait: Duration,
    },
    RetriesExhausted { cnpj: String, attempts: u32 },
    HttpStatus { cnpj: String, status: u16 },
    Network { cnpj: String, reason: String },
    Decode { cnpj: String, reason: String },
    MissingColumn { column: String },
    RetryPassStarted { pending: usize, cooldown: Duration },
    FinalFailure { cnpj: String },
    BatchComplete { succeeded: usize, failed: usize },
}

impl StatusEvent {
    pub fn severity(&self) -> Severity {
        match self {
            Self::Preview { .. }
            | Self::Found { .. }
            | Self::RetryPassStarted { .. }
            | Self::BatchComplete { .. } => Severity::Info,
            Self::RateLimited { .. } | Self::FinalFailure { .. } => Severity::Warning,
            Self::InvalidIdentifier { .. }
            | Self::ApiError { .. }
            | Self::RetriesExhausted { .. }
            | Self::HttpStatus { .. }
            | Self::Network { .. }
            | Self::Decode { .. }
            | Self::MissingColumn { .. } => Severity::Error,
        }
    }
}

impl From<&LookupError> for StatusEvent {
    fn from(err: &LookupError) -> Self {
        match err.clone() {
            LookupError::InvalidIdentifier { cnpj } => Self::InvalidIdentifier { cnpj },
            LookupError::ApiReported { cnpj, message } => Self::ApiError { cnpj, message },
            LookupError::RateLimited { cnpj, attempts } => Self::RetriesExhausted { cnpj, attempts },
            LookupError::Http { cnpj, status } => Self::HttpStatus { cnpj, status },
            LookupError::Network { cnpj, reason } => Self::Network { cnpj, reason },
            LookupError::Decode { cnpj, reason } => Self::Decode { cnpj, reason },
        }
    }
}

impl fmt::Display for StatusEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Preview { table } => write!(f, "Preview of the spreadsheet ({} rows):\n{table}", table.len()),
            Self::Found { cnpj } => write!(f, "CNPJ {cnpj} found"),
            Self::InvalidIdentifier { cnpj } => write!(f, "Invalid CNPJ: {cnpj}"),
            Self::ApiError { cnpj, message } => write!(f, "Registry error for CNPJ {cnpj}: {message}"),
            Self::RateLimited { cnpj, attempt, max_attempts, wait } => write!(
                f,
                "Rate limited on CNPJ {cnpj}, retrying in {:.1}s (attempt {attempt}/{max_attempts})",
                wait.as_secs_f64()
            ),
            Self::RetriesExhausted { cnpj, attempts } => {
                write!(f, "Could not query CNPJ {cnpj} after {attempts} attempts")
            }
            Self::HttpStatus { cnpj, status } => write!(f, "HTTP error {status} for CNPJ {cnpj}"),
            Self::Network { cnpj, reason } => write!(f, "Connection error for CNPJ {cnpj}: {reason}"),
            Self::Decode { cnpj, reason } => write!(f, "Unreadable response for CNPJ {cnpj}: {reason}"),
            Self::MissingColumn { column } => {
                write!(f, "Error: the spreadsheet must contain a column named '{column}'")
            }
            Self::RetryPassStarted { pending, cooldown } => write!(
                f,
                "Retrying {pending} CNPJs that failed in {}s",
                cooldown.as_secs()
            ),
            Self::FinalFailure { cnpj } => write!(f, "Final failure querying CNPJ {cnpj}"),
            Self::BatchComplete { succeeded, failed } => {
                write!(f, "Batch complete: {succeeded} found, {failed} failed")
            }
        }
    }
}

/// Receives status events.
pub trait StatusSink: Send + Sync {
    fn emit(&self, event: StatusEvent);
}

impl<F> StatusSink for F
where
    F: Fn(StatusEvent) + Send + Sync,
{
    fn emit(&self, event: StatusEvent) {
        self(event)
    }
}

/// Forwards events to `tracing` at the matching level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl StatusSink for TracingSink {
    fn emit(&self, event: StatusEvent) {
        match event.severity() {
            Severity::Info => tracing::info!("{event}"),
            Severity::Warning => tracing::warn!("{event}"),
            Severity::Error => tracing::error!("{event}"),
        }
    }
}

/// Keeps every event in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<StatusEvent>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything emitted so far.
    pub fn events(&self) -> Vec<StatusEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    /// Number of events at `severity`.
    pub fn count(&self, severity: Severity) -> usize {
        self.events()
            .iter()
            .filter(|e| e.severity() == severity)
            .count()
    }
}

impl StatusSink for MemorySink {
    fn emit(&self, event: StatusEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}
