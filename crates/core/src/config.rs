use anyhow::{bail, Result};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub scan: ScanConfig,
    pub odds_api: OddsApiConfig,
    pub report: ReportConfig,
}

/// Settings read by the arbitrage core. Bet size is the only value the
/// stake computation depends on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Total amount split across all outcomes of an event.
    pub bet_size: Decimal,
    /// Outcome label aliases, e.g. `Tie = "Draw"`. Empty means exact matching.
    #[serde(default)]
    pub outcome_aliases: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OddsApiConfig {
    pub base_url: String,
    /// Environment variable holding the API key.
    pub api_key_env: String,
    pub sport: String,
    pub regions: String,
    pub markets: String,
    pub odds_format: String,
    pub date_format: String,
    pub requests_per_minute: u32,
    pub timeout_secs: u64,
    /// Retries after a transient feed failure.
    pub max_retries: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Render prices in American notation instead of decimal.
    pub american_odds: bool,
    /// Default export path used when the CLI is not given one.
    #[serde(default)]
    pub output_path: Option<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            bet_size: dec!(100),
            outcome_aliases: BTreeMap::new(),
        }
    }
}

impl Default for OddsApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.the-odds-api.com".to_string(),
            api_key_env: "ODDS_API_KEY".to_string(),
            sport: "upcoming".to_string(),
            regions: "us".to_string(),
            markets: "h2h".to_string(),
            odds_format: "decimal".to_string(),
            date_format: "iso".to_string(),
            requests_per_minute: 30,
            timeout_secs: 30,
            max_retries: 2,
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            american_odds: false,
            output_path: None,
        }
    }
}

impl AppConfig {
    /// Checks values the core cannot work with.
    ///
    /// # Errors
    ///
    /// Returns an error if the bet size is not positive, the odds format is
    /// not decimal, or the rate limit is zero.
    pub fn validate(&self) -> Result<()> {
        if self.scan.bet_size <= Decimal::ZERO {
            bail!("scan.bet_size must be positive, got {}", self.scan.bet_size);
        }
        // Stake math assumes decimal prices.
        if self.odds_api.odds_format != "decimal" {
            bail!(
                "odds_api.odds_format must be \"decimal\", got \"{}\"",
                self.odds_api.odds_format
            );
        }
        if self.odds_api.requests_per_minute == 0 {
            bail!("odds_api.requests_per_minute must be at least 1");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_upcoming_h2h_scan() {
        let config = AppConfig::default();
        assert_eq!(config.scan.bet_size, dec!(100));
        assert_eq!(config.odds_api.sport, "upcoming");
        assert_eq!(config.odds_api.regions, "us");
        assert_eq!(config.odds_api.markets, "h2h");
        assert_eq!(config.odds_api.odds_format, "decimal");
        assert!(!config.report.american_odds);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_non_positive_bet_size() {
        let mut config = AppConfig::default();
        config.scan.bet_size = Decimal::ZERO;
        assert!(config.validate().is_err());

        config.scan.bet_size = dec!(-5);
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("bet_size"));
    }

    #[test]
    fn test_validate_rejects_american_feed() {
        let mut config = AppConfig::default();
        config.odds_api.odds_format = "american".to_string();
        assert!(config.validate().is_err());
    }
}
