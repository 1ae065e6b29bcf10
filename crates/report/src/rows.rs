//! Flat report rows, one per qualifying event.
//!
//! Layout: `ID, Sport Key, Expected Earnings`, then four columns per outcome
//! (`Bookmaker #n, Name #n, Odds #n, Amount to Buy #n`). Rows with fewer
//! outcomes than the widest row are padded with `N/A`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sports_arb_arbitrage::{display_table, ArbitrageResult, PriceFormat};

/// Placeholder for missing or non-computable cells.
pub const NOT_AVAILABLE: &str = "N/A";

/// Leading columns present on every row.
pub const FIXED_COLUMNS: [&str; 3] = ["ID", "Sport Key", "Expected Earnings"];

/// One bookmaker bet within a row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportLeg {
    pub bookmaker: String,
    pub name: String,
    /// Price rendered in the report's notation.
    pub odds: String,
    pub amount: Decimal,
}

/// A qualifying event flattened for presentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    pub event_id: String,
    pub sport_key: String,
    pub event_label: String,
    pub expected_earnings: Decimal,
    pub legs: Vec<ReportLeg>,
}

impl ReportRow {
    /// Flattens a result, rendering prices in `format`.
    ///
    /// The result itself is not modified; American odds that cannot be
    /// computed show as `N/A`.
    #[must_use]
    pub fn from_result(result: &ArbitrageResult, format: PriceFormat) -> Self {
        let legs = display_table(&result.best_prices, format)
            .into_iter()
            .zip(result.stakes.iter().copied())
            .map(|(entry, stake)| ReportLeg {
                odds: entry.render(),
                bookmaker: entry.bookmaker,
                name: entry.outcome,
                amount: stake,
            })
            .collect();

        Self {
            event_id: result.event_id.clone(),
            sport_key: result.sport_key.clone(),
            event_label: result.event_label.clone(),
            expected_earnings: result.expected_profit.round_dp(2),
            legs,
        }
    }

    /// Builds rows for a batch of results, keeping their order.
    #[must_use]
    pub fn from_results(results: &[ArbitrageResult], format: PriceFormat) -> Vec<Self> {
        results
            .iter()
            .map(|result| Self::from_result(result, format))
            .collect()
    }

    /// Cells for this row, padded to `max_outcomes` legs.
    #[must_use]
    pub fn cells(&self, max_outcomes: usize) -> Vec<String> {
        let mut cells = Vec::with_capacity(FIXED_COLUMNS.len() + 4 * max_outcomes);
        cells.push(self.event_id.clone());
        cells.push(self.sport_key.clone());
        cells.push(format!("{:.2}", self.expected_earnings));

        for leg in &self.legs {
            cells.push(leg.bookmaker.clone());
            cells.push(leg.name.clone());
            cells.push(leg.odds.clone());
            cells.push(format!("{:.2}", leg.amount));
        }

        let width = FIXED_COLUMNS.len() + 4 * max_outcomes;
        while cells.len() < width {
            cells.push(NOT_AVAILABLE.to_string());
        }
        cells
    }
}

/// Largest leg count across `rows`.
#[must_use]
pub fn max_outcomes(rows: &[ReportRow]) -> usize {
    rows.iter().map(|row| row.legs.len()).max().unwrap_or(0)
}

/// Header cells for a report with `max_outcomes` outcome groups.
#[must_use]
pub fn column_headers(max_outcomes: usize) -> Vec<String> {
    let mut headers: Vec<String> = FIXED_COLUMNS.iter().map(ToString::to_string).collect();
    for n in 1..=max_outcomes {
        headers.push(format!("Bookmaker #{n}"));
        headers.push(format!("Name #{n}"));
        headers.push(format!("Odds #{n}"));
        headers.push(format!("Amount to Buy #{n}"));
    }
    headers
}
