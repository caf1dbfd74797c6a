//! # cnpjkit-http
//!
//! `reqwest` transport for the ReceitaWS public CNPJ endpoint.
//!
//! ## Usage
//! ```no_run
//! use cnpjkit_core::LookupClient;
//! use cnpjkit_http::ReceitaWsTransport;
//!
//! # async fn run() -> Result<(), cnpjkit_core::LookupError> {
//! let client = LookupClient::new(ReceitaWsTransport::new()?);
//! let record = client.lookup("12345678000195").await;
//! # Ok(())
//! # }
//! ```

pub mod client;

pub use client::{ReceitaWsTransport, DEFAULT_BASE_URL, REQUEST_TIMEOUT};
