//! Sportsbook arbitrage detection and stake allocation.
//!
//! Bookmakers price the same event independently. Taking the best price for
//! every outcome across all of them sometimes leaves the implied
//! probabilities summing to less than one, and staking in proportion to
//! those probabilities then returns the same amount whichever outcome wins:
//!
//! ```text
//! Book A:  Team X @ 2.10
//! Book B:  Team Y @ 2.05
//!
//! Implied sum: 1/2.10 + 1/2.05 = 0.9640
//! Bet 100:     49.40 on X, 50.60 on Y
//! Payout:      100 / 0.9640 = 103.73 either way
//! Profit:      3.73
//! ```
//!
//! # Modules
//!
//! - [`normalizer`]: Reduce an event to its best price per outcome
//! - [`evaluator`]: Detect arbitrage and compute stakes
//! - [`aggregator`]: Scan a batch of events
//! - [`canonical`]: Optional outcome label aliases
//! - [`odds_format`]: Display-only American odds conversion
//! - [`types`]: Best-price tables and results
//!
//! # Example
//!
//! ```ignore
//! use sports_arb_arbitrage::BatchAggregator;
//! use rust_decimal_macros::dec;
//!
//! let aggregator = BatchAggregator::with_bet_size(dec!(100))?;
//! for result in aggregator.scan(&events) {
//!     println!("{}: profit {}", result.event_label, result.expected_profit);
//! }
//! ```

pub mod aggregator;
pub mod canonical;
pub mod error;
pub mod evaluator;
pub mod normalizer;
pub mod odds_format;
pub mod types;

pub use aggregator::{BatchAggregator, OpportunitySummary, ScanSummary};
pub use canonical::OutcomeCanonicalizer;
pub use error::{ArbitrageError, Result};
pub use evaluator::{ArbitrageEvaluator, EvaluatorConfig, StakeSplit};
pub use normalizer::OddsNormalizer;
pub use odds_format::{
    decimal_to_american, display_table, format_price, DisplayPriceEntry, PriceFormat,
};
pub use types::{ArbitrageResult, BestPriceEntry, BestPriceTable};
