//! Input workbook → [`Table`].
//!
//! Only the first worksheet is read. Its first row is the header; every
//! other cell is rendered as text so identifiers keep their punctuation.

use std::io::Cursor;
use std::path::Path;

use calamine::{open_workbook_auto, open_workbook_auto_from_rs, Data, Range, Reader};

use cnpjkit_core::Table;

use crate::error::SheetError;

/// Read the first worksheet of the workbook at `path` (`.xlsx`, `.xls`, `.ods`).
pub fn read_table(path: impl AsRef<Path>) -> Result<Table, SheetError> {
    let path = path.as_ref();
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(SheetError::EmptyWorkbook)??;
    let table = range_to_table(&range);
    tracing::debug!(path = %path.display(), rows = table.len(), columns = table.columns.len(), "read spreadsheet");
    Ok(table)
}

/// Same as [`read_table`] for an in-memory upload.
pub fn read_table_from_bytes(bytes: &[u8]) -> Result<Table, SheetError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(SheetError::EmptyWorkbook)??;
    Ok(range_to_table(&range))
}

fn range_to_table(range: &Range<Data>) -> Table {
    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Table::default();
    };
    let mut table = Table::new(header.iter().map(cell_text));
    for row in rows {
        table.push_row(row.iter().map(cell_text));
    }
    table
}

/// Text of one cell. Integral numbers lose the `.0` so a CNPJ typed as a
/// number comes back as its digits.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e16 => format!("{}", *f as i64),
        other => other.to_string(),
    }
}
