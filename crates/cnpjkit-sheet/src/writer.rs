//! [`BatchOutcome`] → two-sheet workbook.

use std::path::Path;

use rust_xlsxwriter::{Format, Workbook};

use cnpjkit_core::{BatchOutcome, Table};

use crate::error::SheetError;

/// Sheet holding the records found.
pub const RESULTS_SHEET: &str = "Dados CNPJs";
/// Sheet holding the identifiers that failed.
pub const ERRORS_SHEET: &str = "CNPJs com Erro";
/// File name offered for the export.
pub const DEFAULT_OUTPUT: &str = "dados_cnpjs.xlsx";

/// Write `outcome` to `path`.
pub fn write_outcome(outcome: &BatchOutcome, path: impl AsRef<Path>) -> Result<(), SheetError> {
    let path = path.as_ref();
    let mut workbook = build_workbook(outcome)?;
    workbook.save(path)?;
    tracing::info!(
        path = %path.display(),
        records = outcome.records.len(),
        failed = outcome.failed.len(),
        "spreadsheet saved"
    );
    Ok(())
}

/// Render `outcome` as `.xlsx` bytes, ready to be served as a download.
pub fn outcome_to_buffer(outcome: &BatchOutcome) -> Result<Vec<u8>, SheetError> {
    Ok(build_workbook(outcome)?.save_to_buffer()?)
}

fn build_workbook(outcome: &BatchOutcome) -> Result<Workbook, SheetError> {
    if outcome.records.is_empty() {
        return Err(SheetError::NothingToSave);
    }

    let mut workbook = Workbook::new();
    write_sheet(&mut workbook, RESULTS_SHEET, &outcome.records_table())?;
    write_sheet(&mut workbook, ERRORS_SHEET, &outcome.failures_table())?;
    Ok(workbook)
}

fn write_sheet(workbook: &mut Workbook, name: &str, table: &Table) -> Result<(), SheetError> {
    let header = Format::new().set_bold();
    let sheet = workbook.add_worksheet();
    sheet.set_name(name)?;

    for (col, title) in table.columns.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, title, &header)?;
    }
    for (row, cells) in table.rows.iter().enumerate() {
        for (col, cell) in cells.iter().enumerate() {
            sheet.write_string(row as u32 + 1, col as u16, cell)?;
        }
    }
    sheet.autofit();
    Ok(())
}
