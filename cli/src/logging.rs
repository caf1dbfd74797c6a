//! Tracing initialisation for the CLI.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log level and format.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Default level: "trace" | "debug" | "info" | "warn" | "error"
    pub level: String,
    /// Emit JSON structured logs instead of human-readable text
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            json: false,
        }
    }
}

impl LogConfig {
    pub fn from_flags(verbose: bool, json: bool) -> Self {
        Self {
            level: if verbose { "debug" } else { "info" }.into(),
            json,
        }
    }

    /// Filter directives: our crates at `level`, dependencies at `warn`.
    fn directives(&self) -> String {
        ["cnpjkit", "cnpjkit_core", "cnpjkit_http", "cnpjkit_sheet"]
            .iter()
            .fold("warn".to_string(), |mut acc, krate| {
                acc.push_str(&format!(",{krate}={}", self.level));
                acc
            })
    }
}

/// Install the global subscriber. Logs go to stderr; stdout carries results.
pub fn init_tracing(config: &LogConfig) {
    let filter = EnvFilter::try_new(config.directives()).unwrap_or_else(|_| EnvFilter::new("info"));

    if config.json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
}
