//! Price notation conversions for display.
//!
//! Everything here works on copies of best-price data. Evaluation always
//! runs on decimal prices; converted values never flow back into it.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::BestPriceTable;

/// Decimal price at which American notation flips from negative to positive.
pub const AMERICAN_EVEN_PRICE: Decimal = dec!(2);

/// Notation used when presenting prices.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceFormat {
    /// European decimal odds, e.g. `2.50`.
    #[default]
    Decimal,
    /// American moneyline odds, e.g. `+150` / `-200`.
    American,
}

impl PriceFormat {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Decimal => "decimal",
            Self::American => "american",
        }
    }
}

impl std::fmt::Display for PriceFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Converts a decimal price to American notation, rounded to 2 dp.
///
/// `p >= 2` gives `(p - 1) * 100`; `p < 2` gives `-100 / (p - 1)`.
/// Returns `None` when the conversion is undefined (`p == 1` or `p <= 0`)
/// or the result does not fit in a `Decimal`.
#[must_use]
pub fn decimal_to_american(price: Decimal) -> Option<Decimal> {
    if price <= Decimal::ZERO {
        return None;
    }
    let american = if price >= AMERICAN_EVEN_PRICE {
        (price - Decimal::ONE).checked_mul(dec!(100))?
    } else {
        dec!(-100).checked_div(price - Decimal::ONE)?
    };
    Some(american.round_dp(2))
}

/// Converts a decimal price into the requested notation.
#[must_use]
pub fn convert(price: Decimal, format: PriceFormat) -> Option<Decimal> {
    match format {
        PriceFormat::Decimal => Some(price),
        PriceFormat::American => decimal_to_american(price),
    }
}

/// Renders a price for tables and exports; `N/A` when not computable.
#[must_use]
pub fn format_price(price: Decimal, format: PriceFormat) -> String {
    render(convert(price, format), format)
}

fn render(converted: Option<Decimal>, format: PriceFormat) -> String {
    match (format, converted) {
        (_, None) => "N/A".to_string(),
        (PriceFormat::Decimal, Some(value)) => value.normalize().to_string(),
        (PriceFormat::American, Some(value)) if value > Decimal::ZERO => format!("+{value:.2}"),
        (PriceFormat::American, Some(value)) => format!("{value:.2}"),
    }
}

/// A best-price entry prepared for presentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayPriceEntry {
    pub bookmaker: String,
    pub outcome: String,
    /// Original decimal price.
    pub decimal_price: Decimal,
    /// Notation of `display_price`.
    pub format: PriceFormat,
    /// Price in the requested notation; `None` when not computable.
    pub display_price: Option<Decimal>,
}

impl DisplayPriceEntry {
    /// Text form of `display_price`; `N/A` when not computable.
    #[must_use]
    pub fn render(&self) -> String {
        render(self.display_price, self.format)
    }
}

/// Builds a display copy of a best-price table; the table is left untouched.
#[must_use]
pub fn display_table(table: &BestPriceTable, format: PriceFormat) -> Vec<DisplayPriceEntry> {
    table
        .iter()
        .map(|entry| DisplayPriceEntry {
            bookmaker: entry.bookmaker.clone(),
            outcome: entry.outcome.clone(),
            decimal_price: entry.price,
            format,
            display_price: convert(entry.price, format),
        })
        .collect()
}
