//! Arbitrage detection and stake allocation.
//!
//! An event is an arbitrage when the implied probabilities of its best
//! prices sum to strictly less than one. Staking `bet * (1/p_i) / sum` on
//! each outcome then returns `bet / sum` whichever outcome wins.

use chrono::Utc;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use sports_arb_core::RawEvent;
use tracing::{debug, info, trace};

use crate::error::{ArbitrageError, Result};
use crate::types::{ArbitrageResult, BestPriceTable};

/// Decimal places stakes and profit are rounded to.
pub const STAKE_DP: u32 = 2;

// =============================================================================
// Evaluator Configuration
// =============================================================================

/// Configuration for arbitrage evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluatorConfig {
    /// Total amount split across all outcomes of an event.
    pub bet_size: Decimal,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            bet_size: dec!(100),
        }
    }
}

impl EvaluatorConfig {
    /// Creates a configuration for the given bet size.
    #[must_use]
    pub fn with_bet_size(bet_size: Decimal) -> Self {
        Self { bet_size }
    }
}

// =============================================================================
// Stake Split
// =============================================================================

/// Stake allocation for one qualifying best-price table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakeSplit {
    /// Sum of 1/price over every entry.
    pub implied_probability_sum: Decimal,
    /// One stake per table entry, same order.
    pub stakes: Vec<Decimal>,
    /// Guaranteed profit, `bet / sum - bet`.
    pub expected_profit: Decimal,
}

// =============================================================================
// Arbitrage Evaluator
// =============================================================================

/// Decides whether a best-price table is an arbitrage and sizes the stakes.
#[derive(Debug, Clone)]
pub struct ArbitrageEvaluator {
    config: EvaluatorConfig,
}

impl ArbitrageEvaluator {
    /// Creates an evaluator for the given bet size with cent rounding.
    ///
    /// # Errors
    /// Returns [`ArbitrageError::InvalidBetSize`] if `bet_size` is not positive.
    pub fn new(bet_size: Decimal) -> Result<Self> {
        Self::with_config(EvaluatorConfig::with_bet_size(bet_size))
    }

    /// Creates an evaluator with custom configuration.
    ///
    /// # Errors
    /// Returns [`ArbitrageError::InvalidBetSize`] if the bet size is not positive.
    pub fn with_config(config: EvaluatorConfig) -> Result<Self> {
        if config.bet_size <= Decimal::ZERO {
            return Err(ArbitrageError::InvalidBetSize(config.bet_size));
        }
        Ok(Self { config })
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &EvaluatorConfig {
        &self.config
    }

    #[must_use]
    pub fn bet_size(&self) -> Decimal {
        self.config.bet_size
    }

    /// Sums the implied probability `1/price` over every entry.
    ///
    /// An empty table sums to zero.
    ///
    /// # Errors
    /// Returns [`ArbitrageError::InvalidPrice`] for a price of zero or below,
    /// before it reaches the sum.
    pub fn implied_probability_sum(table: &BestPriceTable) -> Result<Decimal> {
        let mut sum = Decimal::ZERO;
        for entry in table {
            if entry.price <= Decimal::ZERO {
                return Err(ArbitrageError::invalid_price(
                    &entry.outcome,
                    &entry.bookmaker,
                    entry.price,
                ));
            }
            let implied = Decimal::ONE
                .checked_div(entry.price)
                .ok_or_else(|| ArbitrageError::overflow(&entry.outcome))?;
            sum = sum
                .checked_add(implied)
                .ok_or_else(|| ArbitrageError::overflow(&entry.outcome))?;
        }
        Ok(sum)
    }

    /// Returns true if the table is a non-empty arbitrage.
    ///
    /// # Errors
    /// Propagates invalid prices from [`Self::implied_probability_sum`].
    pub fn is_arbitrage(table: &BestPriceTable) -> Result<bool> {
        if table.is_empty() {
            return Ok(false);
        }
        Ok(Self::implied_probability_sum(table)? < Decimal::ONE)
    }

    /// Computes the stake split, or `None` when the table is not an arbitrage.
    ///
    /// # Errors
    /// Returns an error for invalid prices or arithmetic overflow.
    pub fn stake_split(&self, table: &BestPriceTable) -> Result<Option<StakeSplit>> {
        // An empty table sums to 0, which would otherwise pass the `< 1` test.
        if table.is_empty() {
            trace!("Empty best-price table - no market to arbitrage");
            return Ok(None);
        }

        let sum = Self::implied_probability_sum(table)?;

        if sum >= Decimal::ONE {
            trace!(
                implied_probability_sum = %sum,
                num_outcomes = table.num_outcomes(),
                "No arbitrage - implied probability sum >= 1"
            );
            return Ok(None);
        }

        let bet = self.config.bet_size;

        let mut stakes = Vec::with_capacity(table.num_outcomes());
        for entry in table {
            let stake = bet
                .checked_div(entry.price)
                .and_then(|weighted| weighted.checked_div(sum))
                .ok_or_else(|| ArbitrageError::overflow(&entry.outcome))?;
            stakes.push(stake.round_dp(STAKE_DP));
        }

        let payout = bet
            .checked_div(sum)
            .ok_or_else(|| ArbitrageError::overflow("total payout"))?;
        let expected_profit = (payout - bet).round_dp(STAKE_DP);

        Ok(Some(StakeSplit {
            implied_probability_sum: sum,
            stakes,
            expected_profit,
        }))
    }

    /// Evaluates one event's best-price table.
    ///
    /// Returns `Ok(None)` when the event does not qualify.
    ///
    /// # Errors
    /// Returns an error for invalid prices or arithmetic overflow.
    pub fn evaluate(
        &self,
        event: &RawEvent,
        table: BestPriceTable,
    ) -> Result<Option<ArbitrageResult>> {
        let Some(split) = self.stake_split(&table)? else {
            debug!(
                event_id = %event.id,
                sport_key = %event.sport_key,
                num_outcomes = table.num_outcomes(),
                "Event does not qualify"
            );
            return Ok(None);
        };

        let result = ArbitrageResult {
            event_id: event.id.clone(),
            sport_key: event.sport_key.clone(),
            event_label: event.label(),
            commence_time: event.commence_time,
            best_prices: table,
            implied_probability_sum: split.implied_probability_sum,
            stakes: split.stakes,
            expected_profit: split.expected_profit,
            bet_size: self.config.bet_size,
            detected_at: Utc::now(),
        };

        info!(
            event_id = %result.event_id,
            sport_key = %result.sport_key,
            event = %result.event_label,
            num_outcomes = result.num_outcomes(),
            implied_probability_sum = %result.implied_probability_sum.round_dp(4),
            expected_profit = %result.expected_profit,
            "Arbitrage opportunity detected"
        );

        Ok(Some(result))
    }
}
