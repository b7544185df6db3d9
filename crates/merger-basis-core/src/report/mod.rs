//! Human-readable report and CSV export for valuated lots.

pub mod csv_export;
pub mod format;
pub mod text;

pub use csv_export::{csv_header, lot_csv_record, to_csv_string, write_csv, CSV_HEADER};
pub use text::{render_lot, render_parameters, render_report, render_totals};
