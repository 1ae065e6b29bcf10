//! Offline scan of a saved odds snapshot.

use anyhow::Result;
use clap::Args;
use sports_arb_core::OddsSource;
use std::path::PathBuf;

use super::output::{emit, OutputArgs};
use super::pipeline::{self, ConfigSummary};
use super::snapshot::SnapshotFile;

/// Arguments for the evaluate command.
#[derive(Args, Debug, Clone)]
pub struct EvaluateArgs {
    /// JSON file holding a list of events in odds feed format
    #[arg(short, long)]
    pub input: PathBuf,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Runs the evaluate command.
///
/// # Errors
/// Returns an error if configuration is invalid or the snapshot cannot be read.
pub async fn run_evaluate(args: EvaluateArgs) -> Result<()> {
    let config = args.output.load_config()?;
    let source = SnapshotFile::new(&args.input);

    ConfigSummary::new(&config, source.name(), args.output.format).log();

    let events = pipeline::fetch(&source).await?;
    let (results, _summary) = pipeline::scan(&events, &config)?;
    emit(&results, &config, args.output.format)
}
