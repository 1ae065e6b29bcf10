use clap::{Parser, Subcommand};

mod commands;

use commands::{EvaluateArgs, ScanArgs, SportsArgs};

#[derive(Parser)]
#[command(name = "sports-arb")]
#[command(about = "Find sportsbook arbitrage opportunities across bookmakers", long_about = None)]
struct Cli {
    /// Optional log file path (logs to file instead of stderr)
    #[arg(long, global = true)]
    log_file: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch live odds and scan them for arbitrage
    Scan(ScanArgs),
    /// Scan a saved odds snapshot without calling the API
    Evaluate(EvaluateArgs),
    /// List sport keys offered by the odds feed
    Sports(SportsArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    // Reports go to stdout, so logs never do.
    match &cli.log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::sync::Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }

    match cli.command {
        Commands::Scan(args) => commands::run_scan(args).await?,
        Commands::Evaluate(args) => commands::run_evaluate(args).await?,
        Commands::Sports(args) => commands::run_sports(args).await?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_scan_flags() {
        let cli = Cli::try_parse_from([
            "sports-arb",
            "scan",
            "--sport",
            "soccer_epl",
            "--bet-size",
            "250",
            "--american",
            "--format",
            "csv",
        ])
        .unwrap();

        let Commands::Scan(args) = cli.command else {
            panic!("expected scan");
        };
        assert_eq!(args.sport.as_deref(), Some("soccer_epl"));
        assert_eq!(args.output.bet_size, Some(dec!(250)));
        assert!(args.output.american);
        assert_eq!(args.output.format, commands::OutputFormat::Csv);
    }

    #[test]
    fn test_parse_evaluate_requires_input() {
        assert!(Cli::try_parse_from(["sports-arb", "evaluate"]).is_err());

        let cli =
            Cli::try_parse_from(["sports-arb", "evaluate", "--input", "odds.json"]).unwrap();
        assert!(matches!(cli.command, Commands::Evaluate(_)));
    }

    #[test]
    fn test_parse_global_log_file() {
        let cli = Cli::try_parse_from(["sports-arb", "sports", "--all", "--log-file", "scan.log"])
            .unwrap();
        assert_eq!(cli.log_file.as_deref(), Some("scan.log"));
        let Commands::Sports(args) = cli.command else {
            panic!("expected sports");
        };
        assert!(args.all);
    }

    #[test]
    fn test_rejects_unknown_format() {
        assert!(Cli::try_parse_from(["sports-arb", "scan", "--format", "xlsx"]).is_err());
    }
}
