//! Shared types for best-price tables and arbitrage results.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

// =============================================================================
// Best Price Table
// =============================================================================

/// The best available price for one outcome of an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestPriceEntry {
    /// Bookmaker offering the price.
    pub bookmaker: String,
    /// Outcome label (team name, `Draw`, ...).
    pub outcome: String,
    /// Highest decimal price seen for this outcome.
    pub price: Decimal,
}

impl BestPriceEntry {
    pub fn new(bookmaker: impl Into<String>, outcome: impl Into<String>, price: Decimal) -> Self {
        Self {
            bookmaker: bookmaker.into(),
            outcome: outcome.into(),
            price,
        }
    }
}

/// One entry per distinct outcome of an event, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BestPriceTable {
    entries: Vec<BestPriceEntry>,
}

impl BestPriceTable {
    /// Wraps already-deduplicated entries.
    #[must_use]
    pub fn new(entries: Vec<BestPriceEntry>) -> Self {
        Self { entries }
    }

    #[must_use]
    pub fn entries(&self) -> &[BestPriceEntry] {
        &self.entries
    }

    /// Number of distinct outcomes.
    #[must_use]
    pub fn num_outcomes(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BestPriceEntry> {
        self.entries.iter()
    }

    /// Looks up the entry for an outcome label.
    #[must_use]
    pub fn get(&self, outcome: &str) -> Option<&BestPriceEntry> {
        self.entries.iter().find(|e| e.outcome == outcome)
    }
}

impl<'a> IntoIterator for &'a BestPriceTable {
    type Item = &'a BestPriceEntry;
    type IntoIter = std::slice::Iter<'a, BestPriceEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

// =============================================================================
// Arbitrage Result
// =============================================================================

/// A qualifying event with the stake split that locks in its profit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArbitrageResult {
    /// Event identifier copied from the odds source.
    pub event_id: String,
    /// Sport category copied from the odds source.
    pub sport_key: String,
    /// Readable event label (teams or id).
    pub event_label: String,
    /// Scheduled start, when known.
    pub commence_time: Option<DateTime<Utc>>,
    /// Best price per outcome, in the same order as `stakes`.
    pub best_prices: BestPriceTable,
    /// Sum of 1/price over all best prices (strictly below 1).
    pub implied_probability_sum: Decimal,
    /// Amount to stake on each outcome, rounded to cents.
    pub stakes: Vec<Decimal>,
    /// Guaranteed profit for the configured bet size, rounded to cents.
    pub expected_profit: Decimal,
    /// Total bet size the stakes were computed for.
    pub bet_size: Decimal,
    /// When the opportunity was evaluated.
    pub detected_at: DateTime<Utc>,
}

impl ArbitrageResult {
    #[must_use]
    pub fn num_outcomes(&self) -> usize {
        self.best_prices.num_outcomes()
    }

    /// Pairs each best-price entry with its stake.
    pub fn legs(&self) -> impl Iterator<Item = (&BestPriceEntry, Decimal)> + '_ {
        self.best_prices.iter().zip(self.stakes.iter().copied())
    }

    /// Sum of the rounded stakes.
    #[must_use]
    pub fn total_staked(&self) -> Decimal {
        self.stakes.iter().copied().sum()
    }

    /// Payout if outcome `index` wins, using the rounded stake.
    #[must_use]
    pub fn payout_for(&self, index: usize) -> Option<Decimal> {
        let entry = self.best_prices.entries().get(index)?;
        let stake = self.stakes.get(index)?;
        Some(*stake * entry.price)
    }

    /// Margin below certainty as a percentage: `(1 - sum) * 100`.
    #[must_use]
    pub fn edge_pct(&self) -> Decimal {
        (Decimal::ONE - self.implied_probability_sum) * dec!(100)
    }

    /// Return on the bet size as a percentage.
    #[must_use]
    pub fn roi_pct(&self) -> Decimal {
        if self.bet_size == Decimal::ZERO {
            return Decimal::ZERO;
        }
        self.expected_profit / self.bet_size * dec!(100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_way_table() -> BestPriceTable {
        BestPriceTable::new(vec![
            BestPriceEntry::new("Book A", "Team X", dec!(2.10)),
            BestPriceEntry::new("Book B", "Team Y", dec!(2.05)),
        ])
    }

    fn sample_result() -> ArbitrageResult {
        ArbitrageResult {
            event_id: "evt-1".to_string(),
            sport_key: "soccer_epl".to_string(),
            event_label: "Team X vs Team Y".to_string(),
            commence_time: None,
            best_prices: two_way_table(),
            implied_probability_sum: dec!(0.96),
            stakes: vec![dec!(49.40), dec!(50.60)],
            expected_profit: dec!(3.73),
            bet_size: dec!(100),
            detected_at: Utc::now(),
        }
    }

    #[test]
    fn test_table_accessors() {
        let table = two_way_table();
        assert_eq!(table.num_outcomes(), 2);
        assert!(!table.is_empty());
        assert_eq!(table.get("Team Y").unwrap().bookmaker, "Book B");
        assert!(table.get("Draw").is_none());
        assert!(BestPriceTable::default().is_empty());
    }

    #[test]
    fn test_table_serializes_as_list() {
        let value = serde_json::to_value(two_way_table()).unwrap();
        assert!(value.is_array());
        assert_eq!(value[0]["outcome"], "Team X");
    }

    #[test]
    fn test_result_legs_and_totals() {
        let result = sample_result();
        let legs: Vec<_> = result.legs().collect();

        assert_eq!(legs.len(), 2);
        assert_eq!(legs[0].0.outcome, "Team X");
        assert_eq!(legs[0].1, dec!(49.40));
        assert_eq!(result.total_staked(), dec!(100.00));
        assert_eq!(result.payout_for(0), Some(dec!(103.7400)));
        assert_eq!(result.payout_for(5), None);
    }

    #[test]
    fn test_result_percentages() {
        let result = sample_result();
        assert_eq!(result.edge_pct(), dec!(4.00));
        assert_eq!(result.roi_pct(), dec!(3.73));
    }

    #[test]
    fn test_roi_zero_bet_size() {
        let mut result = sample_result();
        result.bet_size = Decimal::ZERO;
        assert_eq!(result.roi_pct(), Decimal::ZERO);
    }
}
