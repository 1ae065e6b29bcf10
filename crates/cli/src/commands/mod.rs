//! CLI commands for the arbitrage scanner.

pub mod evaluate;
pub mod output;
pub mod pipeline;
pub mod scan;
pub mod snapshot;
pub mod sports;

pub use evaluate::{run_evaluate, EvaluateArgs};
pub use output::{OutputArgs, OutputFormat};
pub use scan::{run_scan, ScanArgs};
pub use sports::{run_sports, SportsArgs};
