//! # cnpjkit-sheet
//!
//! Spreadsheet edges of a batch run: read the uploaded workbook into a
//! [`Table`](cnpjkit_core::Table) with `calamine`, write the two-sheet result
//! workbook with `rust_xlsxwriter`.

pub mod error;
pub mod reader;
pub mod writer;

pub use error::SheetError;
pub use reader::{read_table, read_table_from_bytes};
pub use writer::{outcome_to_buffer, write_outcome, DEFAULT_OUTPUT, ERRORS_SHEET, RESULTS_SHEET};
