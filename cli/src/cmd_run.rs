//! `cnpjkit run`: enrich a spreadsheet of CNPJs.

use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};

use cnpjkit_core::{BatchProcessor, LookupClient};
use cnpjkit_http::ReceitaWsTransport;
use cnpjkit_sheet::{read_table, write_outcome, SheetError};

use crate::console::ConsoleSink;

pub async fn run(input: &Path, output: &Path) -> Result<()> {
    let table = read_table(input).with_context(|| format!("reading {}", input.display()))?;
    tracing::info!(input = %input.display(), rows = table.len(), "spreadsheet loaded");

    let transport = ReceitaWsTransport::new()?;
    let client = LookupClient::new(transport).with_sink(Arc::new(ConsoleSink));
    let outcome = BatchProcessor::new(client).process(&table).await?;

    println!("Results ({} found):", outcome.records.len());
    print!("{}", outcome.records_table());
    if !outcome.failed.is_empty() {
        println!("\nFailed ({}):", outcome.failed.len());
        print!("{}", outcome.failures_table());
    }

    match write_outcome(&outcome, output) {
        Ok(()) => {
            println!("\nSaved {}", output.display());
            Ok(())
        }
        Err(SheetError::NothingToSave) => bail!("no data to save"),
        Err(e) => Err(e).with_context(|| format!("writing {}", output.display())),
    }
}
