//! Error types for lookups and batch runs.

use thiserror::Error;

/// Errors that can end a single-identifier lookup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// Identifier is not 14 digits after normalization; no request was made.
    #[error("invalid CNPJ: {cnpj}")]
    InvalidIdentifier { cnpj: String },

    /// The registry answered 200 with an `erro` field in the body.
    #[error("registry error for CNPJ {cnpj}: {message}")]
    ApiReported { cnpj: String, message: String },

    /// Every attempt was answered with HTTP 429.
    #[error("CNPJ {cnpj} still rate limited after {attempts} attempts")]
    RateLimited { cnpj: String, attempts: u32 },

    /// Any status other than 200 or 429.
    #[error("HTTP {status} for CNPJ {cnpj}")]
    Http { cnpj: String, status: u16 },

    /// Transport failure: timeout, DNS, refused connection.
    #[error("connection error for CNPJ {cnpj}: {reason}")]
    Network { cnpj: String, reason: String },

    /// A 200 response whose body is not the expected JSON document.
    #[error("could not decode response for CNPJ {cnpj}: {reason}")]
    Decode { cnpj: String, reason: String },
}

impl LookupError {
    /// Returns `true` if the error is transient and worth another attempt.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::RateLimited { .. })
    }

    /// The identifier the failed lookup was about.
    pub fn cnpj(&self) -> &str {
        match self {
            Self::InvalidIdentifier { cnpj }
            | Self::ApiReported { cnpj, .. }
            | Self::RateLimited { cnpj, .. }
            | Self::Http { cnpj, .. }
            | Self::Network { cnpj, .. }
            | Self::Decode { cnpj, .. } => cnpj,
        }
    }
}

/// Errors that abort a whole batch run before any query is made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BatchError {
    #[error("the spreadsheet must contain a column named '{column}'")]
    MissingColumn { column: String },
}
