//! The `RegistryTransport` trait: the seam between lookup policy and HTTP.

use async_trait::async_trait;

use crate::error::LookupError;

/// Status and raw body of one registry response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self { status, body: body.into() }
    }
}

/// Fetches the registry document for one CNPJ.
///
/// Implementations perform exactly one request per call and never retry;
/// status handling and retries belong to [`crate::LookupClient`]. Only
/// transport-level failures are errors, reported as [`LookupError::Network`].
#[async_trait]
pub trait RegistryTransport: Send + Sync + 'static {
    async fn get(&self, cnpj: &str) -> Result<RawResponse, LookupError>;

    /// Base URL or name of the backend.
    fn url(&self) -> &str;
}
