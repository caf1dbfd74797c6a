//! Status sink for the terminal.

use cnpjkit_core::{StatusEvent, StatusSink, TracingSink};

/// Prints the input preview to stdout, logs everything else.
pub struct ConsoleSink;

impl StatusSink for ConsoleSink {
    fn emit(&self, event: StatusEvent) {
        match event {
            StatusEvent::Preview { table } => {
                println!("Preview of the spreadsheet:");
                print!("{table}");
                println!();
            }
            other => TracingSink.emit(other),
        }
    }
}
