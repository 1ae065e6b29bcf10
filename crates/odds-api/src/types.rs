//! Request and response types for the odds feed.

use serde::{Deserialize, Serialize};

/// Sport key that returns the next events across all sports.
pub const UPCOMING_SPORT: &str = "upcoming";

/// Parameters of an odds request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OddsQuery {
    /// Sport key (e.g. `soccer_epl`) or `upcoming`.
    pub sport: String,
    /// Comma-separated bookmaker regions (e.g. `us,uk`).
    pub regions: String,
    /// Comma-separated market keys; only `h2h` is evaluated.
    pub markets: String,
    /// Price notation requested from the feed.
    pub odds_format: String,
    /// Timestamp notation requested from the feed.
    pub date_format: String,
}

impl Default for OddsQuery {
    fn default() -> Self {
        Self {
            sport: UPCOMING_SPORT.to_string(),
            regions: "us".to_string(),
            markets: "h2h".to_string(),
            odds_format: "decimal".to_string(),
            date_format: "iso".to_string(),
        }
    }
}

impl OddsQuery {
    /// Creates a query for a single sport with default parameters.
    #[must_use]
    pub fn for_sport(sport: impl Into<String>) -> Self {
        Self {
            sport: sport.into(),
            ..Default::default()
        }
    }

    /// Sets the bookmaker regions.
    #[must_use]
    pub fn with_regions(mut self, regions: impl Into<String>) -> Self {
        self.regions = regions.into();
        self
    }

    /// Sets the market keys.
    #[must_use]
    pub fn with_markets(mut self, markets: impl Into<String>) -> Self {
        self.markets = markets.into();
        self
    }

    /// Query string pairs, excluding the API key.
    pub(crate) fn params(&self) -> [(&'static str, &str); 4] {
        [
            ("regions", self.regions.as_str()),
            ("markets", self.markets.as_str()),
            ("oddsFormat", self.odds_format.as_str()),
            ("dateFormat", self.date_format.as_str()),
        ]
    }
}

/// A sport listed by the feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sport {
    /// Key used in odds requests.
    pub key: String,
    #[serde(default)]
    pub group: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Whether the sport currently has events.
    #[serde(default)]
    pub active: bool,
    /// Whether the sport only offers futures markets.
    #[serde(default)]
    pub has_outrights: bool,
}

/// Request usage reported by the feed on every response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestQuota {
    /// Requests left in the current billing period.
    pub remaining: Option<u32>,
    /// Requests used in the current billing period.
    pub used: Option<u32>,
}

impl RequestQuota {
    /// Reads `x-requests-remaining` and `x-requests-used`.
    #[must_use]
    pub fn from_headers(headers: &reqwest::header::HeaderMap) -> Self {
        let read = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.trim().parse::<f64>().ok())
                .filter(|v| *v >= 0.0)
                .map(|v| v as u32)
        };
        Self {
            remaining: read("x-requests-remaining"),
            used: read("x-requests-used"),
        }
    }

    /// True when the feed reports no requests left.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.remaining == Some(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::{HeaderMap, HeaderValue};

    #[test]
    fn test_default_query_matches_feed_defaults() {
        let query = OddsQuery::default();
        assert_eq!(query.sport, "upcoming");
        assert_eq!(query.regions, "us");
        assert_eq!(query.markets, "h2h");
        assert_eq!(query.odds_format, "decimal");
        assert_eq!(query.date_format, "iso");
    }

    #[test]
    fn test_query_builder() {
        let query = OddsQuery::for_sport("soccer_epl").with_regions("uk,eu");
        assert_eq!(query.sport, "soccer_epl");
        assert_eq!(query.params()[0], ("regions", "uk,eu"));
        assert_eq!(query.params()[2], ("oddsFormat", "decimal"));
    }

    #[test]
    fn test_quota_from_headers() {
        let mut headers = HeaderMap::new();
        headers.insert("x-requests-remaining", HeaderValue::from_static("480"));
        headers.insert("x-requests-used", HeaderValue::from_static("20"));

        let quota = RequestQuota::from_headers(&headers);
        assert_eq!(quota.remaining, Some(480));
        assert_eq!(quota.used, Some(20));
        assert!(!quota.is_exhausted());
    }

    #[test]
    fn test_quota_missing_or_garbage_headers() {
        let mut headers = HeaderMap::new();
        headers.insert("x-requests-remaining", HeaderValue::from_static("lots"));

        let quota = RequestQuota::from_headers(&headers);
        assert_eq!(quota, RequestQuota::default());
    }

    #[test]
    fn test_sport_deserializes_sparse_record() {
        let sport: Sport = serde_json::from_str(r#"{"key": "soccer_epl", "active": true}"#).unwrap();
        assert_eq!(sport.key, "soccer_epl");
        assert!(sport.active);
        assert!(sport.title.is_empty());
    }
}
