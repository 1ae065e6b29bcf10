pub mod config;
pub mod config_loader;
pub mod odds;
pub mod traits;

pub use config::{AppConfig, OddsApiConfig, ReportConfig, ScanConfig};
pub use config_loader::ConfigLoader;
pub use odds::{BookmakerOffer, MarketQuote, OutcomeQuote, RawEvent};
pub use traits::OddsSource;
