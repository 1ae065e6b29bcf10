//! Client for The Odds API (v4).
//!
//! This crate provides:
//! - REST client with rate limiting for the odds and sports endpoints
//! - Typed errors with retry hints
//! - An [`OddsSource`](sports_arb_core::OddsSource) implementation for the scanner
//!
//! # API Key
//!
//! The key is read from `ODDS_API_KEY` (or the variable named by
//! `odds_api.api_key_env`) and sent as the `apiKey` query parameter.
//!
//! # API Endpoints
//!
//! - `GET /v4/sports` - List sports
//! - `GET /v4/sports/{sport}/odds` - Odds for a sport's upcoming events

pub mod client;
pub mod error;
pub mod types;

pub use client::{OddsApiClient, OddsApiClientConfig, DEFAULT_API_KEY_ENV, ODDS_API_URL};
pub use error::{OddsApiError, Result};
pub use types::{OddsQuery, RequestQuota, Sport, UPCOMING_SPORT};
