use crate::config::AppConfig;
use anyhow::Result;
use figment::{
    providers::{Env, Format, Json, Serialized, Toml},
    Figment,
};

/// Environment prefix for configuration overrides, e.g. `SPORTS_ARB_SCAN__BET_SIZE=250`.
pub const ENV_PREFIX: &str = "SPORTS_ARB_";

pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads application configuration by layering defaults, TOML, environment
    /// variables, and JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration files cannot be parsed or the merged
    /// configuration is invalid.
    pub fn load() -> Result<AppConfig> {
        Self::extract(Self::base())
    }

    /// Loads application configuration with a specific profile.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration files cannot be parsed or the merged
    /// configuration is invalid.
    pub fn load_with_profile(profile: &str) -> Result<AppConfig> {
        let figment = Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file("config/Config.toml"))
            .merge(Toml::file(format!("config/Config.{profile}.toml")))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .join(Json::file("config/Config.json"));

        Self::extract(figment)
    }

    /// Loads configuration from an explicit TOML file on top of the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be parsed or the merged
    /// configuration is invalid.
    pub fn load_from(path: &str) -> Result<AppConfig> {
        let figment = Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));

        Self::extract(figment)
    }

    fn base() -> Figment {
        Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file("config/Config.toml"))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .join(Json::file("config/Config.json"))
    }

    fn extract(figment: Figment) -> Result<AppConfig> {
        let config: AppConfig = figment.extract()?;
        config.validate()?;

        tracing::debug!(
            bet_size = %config.scan.bet_size,
            sport = %config.odds_api.sport,
            regions = %config.odds_api.regions,
            "Configuration loaded"
        );

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_load_defaults_without_files() {
        figment::Jail::expect_with(|_jail| {
            let config = ConfigLoader::load().map_err(|e| e.to_string())?;
            assert_eq!(config, AppConfig::default());
            Ok(())
        });
    }

    #[test]
    fn test_toml_overrides_defaults() {
        figment::Jail::expect_with(|jail| {
            jail.create_dir("config")?;
            jail.create_file(
                "config/Config.toml",
                r#"
                [scan]
                bet_size = 250

                [scan.outcome_aliases]
                Tie = "Draw"

                [odds_api]
                regions = "uk,eu"
                "#,
            )?;

            let config = ConfigLoader::load().map_err(|e| e.to_string())?;
            assert_eq!(config.scan.bet_size, dec!(250));
            assert_eq!(config.scan.outcome_aliases.get("Tie").map(String::as_str), Some("Draw"));
            assert_eq!(config.odds_api.regions, "uk,eu");
            assert_eq!(config.odds_api.sport, "upcoming");
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_toml() {
        figment::Jail::expect_with(|jail| {
            jail.create_dir("config")?;
            jail.create_file("config/Config.toml", "[scan]\nbet_size = 250\n")?;
            jail.set_env("SPORTS_ARB_SCAN__BET_SIZE", "40");
            jail.set_env("SPORTS_ARB_ODDS_API__SPORT", "soccer_epl");
            jail.set_env("SPORTS_ARB_ODDS_API__MAX_RETRIES", "0");

            let config = ConfigLoader::load().map_err(|e| e.to_string())?;
            assert_eq!(config.scan.bet_size, dec!(40));
            assert_eq!(config.odds_api.sport, "soccer_epl");
            assert_eq!(config.odds_api.max_retries, 0);
            Ok(())
        });
    }

    #[test]
    fn test_profile_file_is_layered() {
        figment::Jail::expect_with(|jail| {
            jail.create_dir("config")?;
            jail.create_file("config/Config.toml", "[scan]\nbet_size = 250\n")?;
            jail.create_file("config/Config.small.toml", "[scan]\nbet_size = 10\n")?;

            let config = ConfigLoader::load_with_profile("small").map_err(|e| e.to_string())?;
            assert_eq!(config.scan.bet_size, dec!(10));
            Ok(())
        });
    }

    #[test]
    fn test_invalid_bet_size_is_rejected() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("custom.toml", "[scan]\nbet_size = 0\n")?;
            assert!(ConfigLoader::load_from("custom.toml").is_err());
            Ok(())
        });
    }
}
