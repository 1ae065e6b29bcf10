//! Live scan against the odds feed.
//!
//! ## Example Usage
//!
//! ```bash
//! # Next events across all sports, decimal odds, table on stdout
//! sports-arb scan
//!
//! # EPL only, UK books, American odds, CSV written to disk
//! sports-arb scan --sport soccer_epl --regions uk --american -o bets.csv
//! ```

use anyhow::{Context, Result};
use clap::Args;
use sports_arb_core::AppConfig;
use sports_arb_odds_api::{OddsApiClient, OddsApiClientConfig};
use std::path::PathBuf;

use super::output::{emit, OutputArgs};
use super::pipeline::{self, ConfigSummary};
use super::snapshot::SnapshotFile;

/// Arguments for the scan command.
#[derive(Args, Debug, Clone)]
pub struct ScanArgs {
    /// Sport key to scan (e.g. soccer_epl); defaults to upcoming events
    #[arg(long)]
    pub sport: Option<String>,

    /// Comma-separated bookmaker regions (us, uk, eu, au)
    #[arg(long)]
    pub regions: Option<String>,

    /// Also save the fetched odds for later `evaluate` runs
    #[arg(long)]
    pub save_snapshot: Option<PathBuf>,

    #[command(flatten)]
    pub output: OutputArgs,
}

impl ScanArgs {
    fn apply(&self, config: &mut AppConfig) {
        if let Some(ref sport) = self.sport {
            config.odds_api.sport.clone_from(sport);
        }
        if let Some(ref regions) = self.regions {
            config.odds_api.regions.clone_from(regions);
        }
    }
}

/// Runs the scan command.
///
/// # Errors
///
/// Returns an error if:
/// - Configuration is invalid
/// - The API key is missing
/// - The odds feed cannot be reached or returns bad data
pub async fn run_scan(args: ScanArgs) -> Result<()> {
    let mut config = args.output.load_config()?;
    args.apply(&mut config);

    let client_config = OddsApiClientConfig::from_app_config(&config.odds_api)
        .context("Failed to configure odds feed client")?;
    let client = OddsApiClient::new(client_config)?;

    ConfigSummary::new(&config, client.base_url(), args.output.format).log();

    let events = pipeline::fetch(&client).await?;

    if let Some(quota) = client.last_quota() {
        tracing::info!(
            remaining = ?quota.remaining,
            used = ?quota.used,
            "Odds API request quota"
        );
    }

    if let Some(ref path) = args.save_snapshot {
        SnapshotFile::save(path, &events).await?;
    }

    let (results, _summary) = pipeline::scan(&events, &config)?;
    emit(&results, &config, args.output.format)
}
