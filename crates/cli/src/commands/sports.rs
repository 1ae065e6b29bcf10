//! Lists sport keys accepted by `scan --sport`.

use anyhow::{Context, Result};
use clap::Args;
use sports_arb_core::ConfigLoader;
use sports_arb_odds_api::{OddsApiClient, OddsApiClientConfig, Sport};

/// Arguments for the sports command.
#[derive(Args, Debug, Clone)]
pub struct SportsArgs {
    /// Include out-of-season sports
    #[arg(long)]
    pub all: bool,

    /// Configuration profile (loads config/Config.{profile}.toml)
    #[arg(long, env = "SPORTS_ARB_PROFILE")]
    pub profile: Option<String>,
}

/// Runs the sports command.
///
/// # Errors
/// Returns an error if the API key is missing or the request fails.
pub async fn run_sports(args: SportsArgs) -> Result<()> {
    let config = match args.profile {
        Some(ref profile) => ConfigLoader::load_with_profile(profile)?,
        None => ConfigLoader::load()?,
    };

    let client_config = OddsApiClientConfig::from_app_config(&config.odds_api)
        .context("Failed to configure odds feed client")?;
    let client = OddsApiClient::new(client_config)?;

    let sports = client.list_sports(args.all).await?;
    tracing::info!(count = sports.len(), all = args.all, "Fetched sports");

    print!("{}", format_sports(&sports));
    Ok(())
}

fn format_sports(sports: &[Sport]) -> String {
    let key_width = sports
        .iter()
        .map(|s| s.key.len())
        .max()
        .unwrap_or(0)
        .max("KEY".len());

    let mut output = format!("{:<key_width$}  {:<6}  TITLE\n", "KEY", "ACTIVE");
    for sport in sports {
        let active = if sport.active { "yes" } else { "no" };
        output.push_str(&format!(
            "{:<key_width$}  {:<6}  {}\n",
            sport.key, active, sport.title
        ));
    }
    output
}
