//! Odds snapshot types as supplied by an odds source.
//!
//! These mirror the shape of a head-to-head odds feed: one [`RawEvent`] per
//! upcoming fixture, each carrying the offers of every bookmaker that prices
//! it. Every nested collection defaults to empty when the source omits it,
//! so deserialization never fails on a sparse record.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One upcoming sporting event with the odds offered on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawEvent {
    /// Opaque unique identifier assigned by the odds source.
    pub id: String,
    /// Category identifier (e.g. `soccer_epl`).
    pub sport_key: String,
    /// Human-readable sport name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sport_title: Option<String>,
    /// Scheduled start time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commence_time: Option<DateTime<Utc>>,
    /// Home side, when the source distinguishes one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home_team: Option<String>,
    /// Away side, when the source distinguishes one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub away_team: Option<String>,
    /// Bookmaker offers in source order.
    #[serde(default)]
    pub bookmakers: Vec<BookmakerOffer>,
}

impl RawEvent {
    /// Creates an event with no descriptive metadata.
    pub fn new(
        id: impl Into<String>,
        sport_key: impl Into<String>,
        bookmakers: Vec<BookmakerOffer>,
    ) -> Self {
        Self {
            id: id.into(),
            sport_key: sport_key.into(),
            sport_title: None,
            commence_time: None,
            home_team: None,
            away_team: None,
            bookmakers,
        }
    }

    /// Returns a short label for logs, e.g. `Arsenal vs Chelsea`.
    #[must_use]
    pub fn label(&self) -> String {
        match (&self.home_team, &self.away_team) {
            (Some(home), Some(away)) => format!("{home} vs {away}"),
            _ => self.id.clone(),
        }
    }
}

/// All markets a single bookmaker quotes for an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookmakerOffer {
    /// Machine key of the bookmaker (e.g. `draftkings`).
    #[serde(default)]
    pub key: String,
    /// Display name of the bookmaker.
    #[serde(default)]
    pub title: String,
    /// Quoted markets; only the first one is the head-to-head market.
    #[serde(default)]
    pub markets: Vec<MarketQuote>,
}

impl BookmakerOffer {
    /// Creates an offer with a single head-to-head market.
    pub fn head_to_head(title: impl Into<String>, outcomes: Vec<OutcomeQuote>) -> Self {
        let title = title.into();
        Self {
            key: title.to_lowercase().replace(' ', "_"),
            title,
            markets: vec![MarketQuote {
                key: "h2h".to_string(),
                outcomes,
            }],
        }
    }

    /// Returns the first listed market, which is the only one considered.
    #[must_use]
    pub fn primary_market(&self) -> Option<&MarketQuote> {
        self.markets.first()
    }
}

/// A single market (e.g. `h2h`) and its outcome prices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketQuote {
    /// Market key.
    #[serde(default)]
    pub key: String,
    /// Outcome prices in source order.
    #[serde(default)]
    pub outcomes: Vec<OutcomeQuote>,
}

/// A decimal price on one named outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutcomeQuote {
    /// Outcome label (team name, `Draw`, ...).
    #[serde(default)]
    pub name: String,
    /// Decimal (European) odds: total payout per unit staked.
    #[serde(default)]
    pub price: Decimal,
}

impl OutcomeQuote {
    pub fn new(name: impl Into<String>, price: Decimal) -> Self {
        Self {
            name: name.into(),
            price,
        }
    }
}
