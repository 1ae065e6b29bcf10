//! Error types for arbitrage evaluation.
//!
//! None of these abort a batch: the aggregator logs them and drops the
//! offending event.

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised while evaluating a single event.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ArbitrageError {
    /// A best price is zero or negative, so its implied probability is undefined.
    #[error("invalid price {price} for outcome '{outcome}' at {bookmaker}")]
    InvalidPrice {
        /// Outcome label.
        outcome: String,
        /// Bookmaker offering the price.
        bookmaker: String,
        /// Offending price.
        price: Decimal,
    },

    /// The configured bet size is not positive.
    #[error("bet size must be positive, got {0}")]
    InvalidBetSize(Decimal),

    /// Implied probabilities overflowed the decimal range.
    #[error("arithmetic overflow while evaluating outcome '{outcome}'")]
    Overflow {
        /// Outcome being processed when the overflow happened.
        outcome: String,
    },
}

impl ArbitrageError {
    /// Creates an invalid price error.
    pub fn invalid_price(
        outcome: impl Into<String>,
        bookmaker: impl Into<String>,
        price: Decimal,
    ) -> Self {
        Self::InvalidPrice {
            outcome: outcome.into(),
            bookmaker: bookmaker.into(),
            price,
        }
    }

    /// Creates an overflow error.
    pub fn overflow(outcome: impl Into<String>) -> Self {
        Self::Overflow {
            outcome: outcome.into(),
        }
    }
}

/// Result type alias for arbitrage operations.
pub type Result<T> = std::result::Result<T, ArbitrageError>;
