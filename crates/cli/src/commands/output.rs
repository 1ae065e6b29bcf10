//! Shared report flags, config loading, and rendering.

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use sports_arb_arbitrage::{ArbitrageResult, PriceFormat};
use sports_arb_core::{AppConfig, ConfigLoader};
use sports_arb_report::{export_csv, export_json, ReportRow, TableFormatter};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Printed when a scan finds nothing.
pub const NO_OPPORTUNITIES: &str = "No arbitrage opportunities found.";

/// How results are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Fixed-width text table
    #[default]
    Table,
    /// One CSV row per event
    Csv,
    /// Full results as JSON
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Csv => write!(f, "csv"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Flags shared by every command that produces a report.
#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Total amount to split across each event's outcomes
    #[arg(long)]
    pub bet_size: Option<Decimal>,

    /// Show prices in American notation
    #[arg(long)]
    pub american: bool,

    /// Output format
    #[arg(long, default_value = "table", value_enum)]
    pub format: OutputFormat,

    /// Write the report to a file (tables are written as CSV)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Configuration profile (loads config/Config.{profile}.toml)
    #[arg(long, env = "SPORTS_ARB_PROFILE")]
    pub profile: Option<String>,

    /// Explicit configuration file
    #[arg(short, long)]
    pub config: Option<String>,
}

impl OutputArgs {
    /// Loads the layered configuration and applies command-line overrides.
    ///
    /// # Errors
    /// Returns an error if configuration cannot be loaded or is invalid.
    pub fn load_config(&self) -> Result<AppConfig> {
        let mut config = match (&self.config, &self.profile) {
            (Some(path), _) => ConfigLoader::load_from(path),
            (None, Some(profile)) => ConfigLoader::load_with_profile(profile),
            (None, None) => ConfigLoader::load(),
        }
        .context("Failed to load configuration")?;

        self.apply(&mut config);
        config.validate()?;
        Ok(config)
    }

    fn apply(&self, config: &mut AppConfig) {
        if let Some(bet_size) = self.bet_size {
            config.scan.bet_size = bet_size;
        }
        if self.american {
            config.report.american_odds = true;
        }
        if let Some(ref path) = self.output {
            config.report.output_path = Some(path.display().to_string());
        }
    }
}

/// Price notation selected by the report config.
#[must_use]
pub fn price_format(config: &AppConfig) -> PriceFormat {
    if config.report.american_odds {
        PriceFormat::American
    } else {
        PriceFormat::Decimal
    }
}

/// Renders results in the given format.
///
/// # Errors
/// Returns an error if CSV or JSON serialization fails.
pub fn render(
    results: &[ArbitrageResult],
    format: OutputFormat,
    prices: PriceFormat,
) -> Result<Vec<u8>> {
    let rows = ReportRow::from_results(results, prices);
    match format {
        OutputFormat::Table => Ok(TableFormatter::format(&rows).into_bytes()),
        OutputFormat::Csv => export_csv(&rows),
        OutputFormat::Json => export_json(results),
    }
}

/// Prints or writes the report for a finished scan.
///
/// With an output path the report goes to that file; a table request is
/// still printed and the file receives CSV.
///
/// # Errors
/// Returns an error if rendering or writing fails.
pub fn emit(results: &[ArbitrageResult], config: &AppConfig, format: OutputFormat) -> Result<()> {
    if results.is_empty() {
        println!("{NO_OPPORTUNITIES}");
        return Ok(());
    }

    let prices = price_format(config);

    match config.report.output_path.as_deref() {
        Some(path) => {
            if format == OutputFormat::Table {
                print_bytes(&render(results, OutputFormat::Table, prices)?)?;
            }
            let file_format = match format {
                OutputFormat::Table => OutputFormat::Csv,
                other => other,
            };
            write_report(Path::new(path), &render(results, file_format, prices)?)?;
            tracing::info!(path, format = %file_format, events = results.len(), "Report written");
        }
        None => print_bytes(&render(results, format, prices)?)?,
    }

    Ok(())
}

fn print_bytes(bytes: &[u8]) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(bytes)?;
    stdout.flush()?;
    Ok(())
}

fn write_report(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    std::fs::write(path, bytes)
        .with_context(|| format!("Failed to write report: {}", path.display()))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use sports_arb_arbitrage::BatchAggregator;
    use sports_arb_core::{BookmakerOffer, OutcomeQuote, RawEvent};

    pub(crate) fn sample_events() -> Vec<RawEvent> {
        vec![
            RawEvent::new(
                "nba-1",
                "basketball_nba",
                vec![
                    BookmakerOffer::head_to_head(
                        "Book A",
                        vec![
                            OutcomeQuote::new("Team X", dec!(2.10)),
                            OutcomeQuote::new("Team Y", dec!(1.70)),
                        ],
                    ),
                    BookmakerOffer::head_to_head(
                        "Book B",
                        vec![
                            OutcomeQuote::new("Team X", dec!(1.80)),
                            OutcomeQuote::new("Team Y", dec!(2.05)),
                        ],
                    ),
                ],
            ),
            RawEvent::new("empty", "soccer_epl", vec![]),
        ]
    }

    fn sample_results() -> Vec<ArbitrageResult> {
        BatchAggregator::with_bet_size(dec!(100))
            .unwrap()
            .scan(&sample_events())
    }

    #[test]
    fn test_apply_overrides() {
        let args = OutputArgs {
            bet_size: Some(dec!(500)),
            american: true,
            output: Some(PathBuf::from("out/bets.csv")),
            ..Default::default()
        };
        let mut config = AppConfig::default();

        args.apply(&mut config);

        assert_eq!(config.scan.bet_size, dec!(500));
        assert!(config.report.american_odds);
        assert_eq!(config.report.output_path.as_deref(), Some("out/bets.csv"));
        assert_eq!(price_format(&config), PriceFormat::American);
    }

    #[test]
    fn test_no_overrides_keep_config() {
        let mut config = AppConfig::default();
        OutputArgs::default().apply(&mut config);
        assert_eq!(config, AppConfig::default());
        assert_eq!(price_format(&config), PriceFormat::Decimal);
    }

    #[test]
    fn test_render_formats() {
        let results = sample_results();

        let table = String::from_utf8(
            render(&results, OutputFormat::Table, PriceFormat::Decimal).unwrap(),
        )
        .unwrap();
        assert!(table.contains("nba-1"));

        let csv = String::from_utf8(
            render(&results, OutputFormat::Csv, PriceFormat::American).unwrap(),
        )
        .unwrap();
        assert!(csv.starts_with("ID,Sport Key,Expected Earnings"));
        assert!(csv.contains("+110.00"));

        let json: serde_json::Value = serde_json::from_slice(
            &render(&results, OutputFormat::Json, PriceFormat::Decimal).unwrap(),
        )
        .unwrap();
        assert_eq!(json[0]["event_id"], "nba-1");
    }

    #[test]
    fn test_emit_writes_csv_for_table_output() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports").join("bets.csv");
        let mut config = AppConfig::default();
        config.report.output_path = Some(path.display().to_string());

        emit(&sample_results(), &config, OutputFormat::Table).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("ID,Sport Key,Expected Earnings"));
        assert!(written.contains("nba-1,basketball_nba,3.73"));
    }

    #[test]
    fn test_emit_empty_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bets.json");
        let mut config = AppConfig::default();
        config.report.output_path = Some(path.display().to_string());

        emit(&[], &config, OutputFormat::Json).unwrap();

        assert!(!path.exists());
    }

    #[test]
    fn test_output_format_display() {
        assert_eq!(OutputFormat::Table.to_string(), "table");
        assert_eq!(OutputFormat::Csv.to_string(), "csv");
        assert_eq!(OutputFormat::Json.to_string(), "json");
        assert_eq!(OutputFormat::default(), OutputFormat::Table);
    }
}
