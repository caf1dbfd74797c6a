//! Reading uploads and writing exports through real `.xlsx` files.

use calamine::{open_workbook_auto, Reader};
use rust_xlsxwriter::Workbook;
use tempfile::TempDir;

use cnpjkit_core::record::UNAVAILABLE;
use cnpjkit_core::{BatchOutcome, CompanyRecord};
use cnpjkit_sheet::{
    outcome_to_buffer, read_table, read_table_from_bytes, write_outcome, SheetError, ERRORS_SHEET,
    RESULTS_SHEET,
};

fn upload() -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.write_string(0, 0, "Empresa")?;
    sheet.write_string(0, 1, "CNPJ")?;
    sheet.write_string(1, 0, "ACME")?;
    sheet.write_string(1, 1, "12.345.678/0001-95")?;
    sheet.write_string(2, 0, "Sem CNPJ")?;
    sheet.write_string(3, 0, "Numérico")?;
    sheet.write_number(3, 1, 191.0)?;
    Ok(workbook.save_to_buffer()?)
}

fn outcome() -> BatchOutcome {
    BatchOutcome {
        records: vec![CompanyRecord {
            cnpj: "12.345.678/0001-95".into(),
            name: "ACME LTDA".into(),
            address: "RUA A, 10 - CENTRO, SAO PAULO - SP".into(),
            first_partner: UNAVAILABLE.into(),
            ..Default::default()
        }],
        failed: vec!["00000000000191".into()],
        total_input: 2,
        recovered: 0,
    }
}

#[test]
fn reads_first_sheet_as_text() {
    let table = read_table_from_bytes(&upload().unwrap()).unwrap();
    assert_eq!(table.columns, vec!["Empresa", "CNPJ"]);
    assert_eq!(
        table.column("CNPJ").unwrap(),
        vec!["12.345.678/0001-95", "", "191"]
    );
}

#[test]
fn reads_from_disk() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("upload.xlsx");
    std::fs::write(&path, upload().unwrap()).unwrap();
    let table = read_table(&path).unwrap();
    assert_eq!(table.len(), 3);
}

#[test]
fn missing_file_is_a_read_error() {
    let dir = TempDir::new().unwrap();
    let err = read_table(dir.path().join("nope.xlsx")).unwrap_err();
    assert!(matches!(err, SheetError::Read(_)));
}

#[test]
fn export_has_results_and_errors_sheets() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("dados_cnpjs.xlsx");
    write_outcome(&outcome(), &path).unwrap();

    let mut workbook = open_workbook_auto(&path).unwrap();
    assert_eq!(workbook.sheet_names(), vec![RESULTS_SHEET.to_string(), ERRORS_SHEET.to_string()]);

    let results = workbook.worksheet_range(RESULTS_SHEET).unwrap();
    let rows: Vec<_> = results.rows().collect();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0][0].to_string(), "CNPJ");
    assert_eq!(rows[0][10].to_string(), "Quadro Societário");
    assert_eq!(rows[1][1].to_string(), "ACME LTDA");
    assert_eq!(rows[1][10].to_string(), UNAVAILABLE);

    let errors = workbook.worksheet_range(ERRORS_SHEET).unwrap();
    let rows: Vec<_> = errors.rows().collect();
    assert_eq!(rows[0][0].to_string(), "CNPJ com Erro");
    assert_eq!(rows[1][0].to_string(), "00000000000191");
}

#[test]
fn buffer_export_is_a_readable_workbook() {
    let bytes = outcome_to_buffer(&outcome()).unwrap();
    let table = read_table_from_bytes(&bytes).unwrap();
    assert_eq!(table.columns.len(), 11);
    assert_eq!(table.rows[0][1], "ACME LTDA");
}
