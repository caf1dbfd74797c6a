//! cnpjkit-core: normalizer, lookup client and batch processor for CNPJ enrichment.
//!
//! # Overview
//!
//! cnpjkit takes a table of raw CNPJ values, queries the public registry for
//! each one and returns the enriched records alongside the identifiers that
//! could not be resolved. The core crate defines:
//!
//! - [`normalize`]: canonical 14-digit form of a raw cell value
//! - [`RegistryTransport`]: the async seam every registry backend implements
//! - [`LookupClient`]: single-identifier lookup with rate-limit retry
//! - [`BatchProcessor`]: two-pass batch run producing a [`BatchOutcome`]
//! - [`policy`] module: delay ranges, sleepers, rate-limit and batch retry policies
//! - [`report`] module: status events and the sinks that receive them

pub mod batch;
pub mod cnpj;
pub mod error;
pub mod lookup;
pub mod policy;
pub mod record;
pub mod report;
pub mod table;
pub mod transport;

pub use batch::{BatchOutcome, BatchProcessor, IdentifierState};
pub use cnpj::{is_valid, normalize, CNPJ_LEN};
pub use error::{BatchError, LookupError};
pub use lookup::LookupClient;
pub use record::{CompanyRecord, RegistryResponse};
pub use report::{MemorySink, Severity, StatusEvent, StatusSink, TracingSink};
pub use table::Table;
pub use transport::{RawResponse, RegistryTransport};
