//! `cnpjkit lookup` and `cnpjkit normalize`.

use std::sync::Arc;

use anyhow::{anyhow, Result};

use cnpjkit_core::record::COLUMNS;
use cnpjkit_core::{is_valid, normalize, LookupClient};
use cnpjkit_http::ReceitaWsTransport;

use crate::console::ConsoleSink;

pub async fn lookup(raw: &str, json: bool) -> Result<()> {
    let cnpj = normalize(raw);
    let client = LookupClient::new(ReceitaWsTransport::new()?).with_sink(Arc::new(ConsoleSink));
    let record = client
        .lookup(&cnpj)
        .await
        .ok_or_else(|| anyhow!("lookup failed for CNPJ {cnpj}"))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&record)?);
    } else {
        let width = COLUMNS.iter().map(|c| c.chars().count()).max().unwrap_or(0);
        for (column, value) in COLUMNS.iter().zip(record.cells()) {
            println!("{column:<width$}  {value}");
        }
    }
    Ok(())
}

pub fn normalize_values(values: &[String]) {
    for raw in values {
        let cnpj = normalize(raw);
        let verdict = if is_valid(&cnpj) { "valid" } else { "invalid" };
        println!("{raw:?} -> {cnpj} ({verdict})");
    }
}
