//! Rendering of arbitrage results.
//!
//! Results are flattened into [`ReportRow`]s and rendered as a text table,
//! CSV, or JSON. Exports return bytes; writing them anywhere is up to the
//! caller.

pub mod export;
pub mod rows;
pub mod table;

pub use export::{export_csv, export_json};
pub use rows::{column_headers, max_outcomes, ReportLeg, ReportRow, NOT_AVAILABLE};
pub use table::TableFormatter;
