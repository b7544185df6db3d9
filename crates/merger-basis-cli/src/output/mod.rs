pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::Value;

/// What a command produced: the structured value, plus pre-rendered text
/// for the formats the core knows how to render itself.
pub struct CommandOutput {
    pub value: Value,
    pub report: Option<String>,
    pub csv: Option<String>,
}

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, out: &CommandOutput) {
    match format {
        OutputFormat::Report => match out.report {
            Some(ref text) => print!("{}", text),
            None => json::print_json(&out.value),
        },
        OutputFormat::Json => json::print_json(&out.value),
        OutputFormat::Table => table::print_table(&out.value),
        OutputFormat::Csv => match out.csv {
            Some(ref text) => print!("{}", text),
            None => csv_out::print_csv(&out.value),
        },
        OutputFormat::Minimal => minimal::print_minimal(&out.value),
    }
}
