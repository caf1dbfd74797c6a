//! cnpjkit CLI: enrich a spreadsheet of CNPJs from the public registry.
//!
//! # Commands
//! ```text
//! cnpjkit run       --input <planilha.xlsx> [--output dados_cnpjs.xlsx]
//! cnpjkit lookup    <cnpj> [--json]
//! cnpjkit normalize <value>...
//! cnpjkit info
//! ```

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod cmd_lookup;
mod cmd_run;
mod console;
mod logging;

use cnpjkit_core::policy::{BatchRetryPolicy, RateLimitPolicy};
use cnpjkit_http::{DEFAULT_BASE_URL, REQUEST_TIMEOUT};
use cnpjkit_sheet::DEFAULT_OUTPUT;

#[derive(Parser)]
#[command(
    name = "cnpjkit",
    about = "Query the public CNPJ registry for every row of a spreadsheet",
    long_about = "
cnpjkit reads a spreadsheet with a 'CNPJ' column, queries ReceitaWS for each
identifier (pacing requests and backing off when rate limited), retries the
failures once more and writes the results to a two-sheet workbook.
",
    version
)]
struct Cli {
    /// Enable debug logs
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Enrich every CNPJ in a spreadsheet and export the results
    Run {
        /// Spreadsheet with a 'CNPJ' column (.xlsx, .xls, .ods)
        #[arg(short, long)]
        input: PathBuf,
        /// Where to write the results workbook
        #[arg(short, long, default_value = DEFAULT_OUTPUT)]
        output: PathBuf,
    },

    /// Look up a single CNPJ
    Lookup {
        /// CNPJ, with or without punctuation
        cnpj: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the canonical 14-digit form of each value
    Normalize {
        #[arg(required = true)]
        values: Vec<String>,
    },

    /// Show the fixed endpoint and retry settings
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_tracing(&logging::LogConfig::from_flags(cli.verbose, cli.json_logs));

    match cli.command {
        Commands::Run { input, output } => cmd_run::run(&input, &output).await,
        Commands::Lookup { cnpj, json } => cmd_lookup::lookup(&cnpj, json).await,
        Commands::Normalize { values } => {
            cmd_lookup::normalize_values(&values);
            Ok(())
        }
        Commands::Info => {
            cmd_info();
            Ok(())
        }
    }
}

fn cmd_info() {
    let rate = RateLimitPolicy::default();
    let batch = BatchRetryPolicy::default();
    println!("cnpjkit v{}", env!("CARGO_PKG_VERSION"));
    println!("  Endpoint:         {DEFAULT_BASE_URL}/{{cnpj}}");
    println!("  Request timeout:  {}s", REQUEST_TIMEOUT.as_secs());
    println!(
        "  On HTTP 429:      up to {} attempts, {}-{}s between them",
        rate.max_attempts,
        rate.backoff.min.as_secs(),
        rate.backoff.max.as_secs()
    );
    println!(
        "  Pacing:           {}-{}s after every query",
        batch.pacing.min.as_secs(),
        batch.pacing.max.as_secs()
    );
    println!("  Retry pass:       once, after {}s", batch.cooldown.as_secs());
    println!("  Output:           {DEFAULT_OUTPUT}");
}
