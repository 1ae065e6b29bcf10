//! Fetch-then-scan flow shared by `scan` and `evaluate`.

use anyhow::{anyhow, Result};
use sports_arb_arbitrage::{ArbitrageResult, BatchAggregator, ScanSummary};
use sports_arb_core::{AppConfig, OddsSource, RawEvent};

use super::output::OutputFormat;

/// Reported when the odds source cannot supply a usable snapshot.
pub const NO_GAMES: &str = "No games available or invalid data structure.";

/// Configuration summary for logging.
pub struct ConfigSummary<'a> {
    config: &'a AppConfig,
    source: &'a str,
    format: OutputFormat,
}

impl<'a> ConfigSummary<'a> {
    pub fn new(config: &'a AppConfig, source: &'a str, format: OutputFormat) -> Self {
        Self {
            config,
            source,
            format,
        }
    }

    pub fn log(&self) {
        tracing::info!("========================================");
        tracing::info!("  SPORTSBOOK ARBITRAGE SCAN             ");
        tracing::info!("========================================");
        tracing::info!("Source:                {}", self.source);
        tracing::info!("Bet Size:              {}", self.config.scan.bet_size);
        tracing::info!("Outcome Aliases:       {}", self.config.scan.outcome_aliases.len());
        tracing::info!("----------------------------------------");
        tracing::info!("Feed:");
        tracing::info!("  Sport:               {}", self.config.odds_api.sport);
        tracing::info!("  Regions:             {}", self.config.odds_api.regions);
        tracing::info!("  Markets:             {}", self.config.odds_api.markets);
        tracing::info!("----------------------------------------");
        tracing::info!("Report:");
        tracing::info!("  Format:              {}", self.format);
        tracing::info!(
            "  Odds:                {}",
            if self.config.report.american_odds { "american" } else { "decimal" }
        );
        match self.config.report.output_path {
            Some(ref path) => tracing::info!("  Output:              {}", path),
            None => tracing::info!("  Output:              stdout"),
        }
        tracing::info!("========================================");
    }
}

/// Pulls one snapshot from the source.
///
/// # Errors
/// Any source failure is logged and replaced with [`NO_GAMES`].
pub async fn fetch(source: &dyn OddsSource) -> Result<Vec<RawEvent>> {
    match source.fetch_events().await {
        Ok(events) => {
            tracing::info!(source = source.name(), events = events.len(), "Fetched events");
            Ok(events)
        }
        Err(e) => {
            tracing::error!(source = source.name(), error = %format!("{e:#}"), "Failed to fetch odds");
            Err(anyhow!(NO_GAMES))
        }
    }
}

/// Scans a snapshot with the configured bet size and aliases.
///
/// # Errors
/// Returns an error if the configured bet size is invalid.
pub fn scan(events: &[RawEvent], config: &AppConfig) -> Result<(Vec<ArbitrageResult>, ScanSummary)> {
    let aggregator = BatchAggregator::from_config(&config.scan)?;
    let (results, summary) = aggregator.scan_with_summary(events);
    log_summary(&summary);
    Ok((results, summary))
}

fn log_summary(summary: &ScanSummary) {
    tracing::info!("========================================");
    tracing::info!("         SCAN SUMMARY                   ");
    tracing::info!("========================================");
    tracing::info!("Events Scanned:        {}", summary.events_scanned);
    tracing::info!("  Without Outcomes:    {}", summary.events_without_outcomes);
    tracing::info!("  Rejected:            {}", summary.events_rejected);
    tracing::info!("Opportunities:         {}", summary.opportunities);
    tracing::info!("Total Expected Profit: {}", summary.total_expected_profit);
    if let Some(ref best) = summary.best_opportunity {
        tracing::info!(
            "Best:                  {} ({}% edge, {} profit)",
            best.event_label,
            best.edge_pct,
            best.expected_profit
        );
    }
    tracing::info!("========================================");
}
