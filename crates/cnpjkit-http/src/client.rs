//! HTTP registry transport backed by `reqwest`.

use std::time::Duration;

use async_trait::async_trait;

use cnpjkit_core::error::LookupError;
use cnpjkit_core::transport::{RawResponse, RegistryTransport};

/// ReceitaWS CNPJ endpoint; the identifier is appended as the last path segment.
pub const DEFAULT_BASE_URL: &str = "https://www.receitaws.com.br/v1/cnpj";

/// Per-request timeout.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// One GET per call against `{base_url}/{cnpj}`.
pub struct ReceitaWsTransport {
    base_url: String,
    http: reqwest::Client,
}

impl ReceitaWsTransport {
    /// Transport for the public ReceitaWS endpoint.
    pub fn new() -> Result<Self, LookupError> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Transport for another host serving the same API (used by tests).
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, LookupError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("cnpjkit/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| LookupError::Network {
                cnpj: String::new(),
                reason: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        })
    }

    /// Full URL queried for `cnpj`.
    pub fn endpoint(&self, cnpj: &str) -> String {
        format!("{}/{cnpj}", self.base_url)
    }
}

#[async_trait]
impl RegistryTransport for ReceitaWsTransport {
    async fn get(&self, cnpj: &str) -> Result<RawResponse, LookupError> {
        let url = self.endpoint(cnpj);
        tracing::debug!(%url, "GET");

        let network = |e: reqwest::Error| LookupError::Network {
            cnpj: cnpj.to_string(),
            reason: e.to_string(),
        };

        let resp = self.http.get(&url).send().await.map_err(network)?;
        let status = resp.status().as_u16();
        let body = resp.text().await.map_err(network)?;

        tracing::debug!(%url, status, bytes = body.len(), "response");
        Ok(RawResponse { status, body })
    }

    fn url(&self) -> &str {
        &self.base_url
    }
}
