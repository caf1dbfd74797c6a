//! Spreadsheet error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SheetError {
    #[error("could not read spreadsheet: {0}")]
    Read(#[from] calamine::Error),

    #[error("could not write spreadsheet: {0}")]
    Write(#[from] rust_xlsxwriter::XlsxError),

    #[error("spreadsheet has no worksheet")]
    EmptyWorkbook,

    /// Refused to export a run that found nothing.
    #[error("no data to save")]
    NothingToSave,
}
