//! Odds feed REST client with rate limiting.
//!
//! # Example
//!
//! ```ignore
//! use sports_arb_odds_api::{OddsApiClient, OddsApiClientConfig, OddsQuery};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = OddsApiClient::new(OddsApiClientConfig::from_env("ODDS_API_KEY")?)?;
//!
//!     let events = client.get_odds(&OddsQuery::for_sport("soccer_epl")).await?;
//!     println!("Fetched {} events", events.len());
//!     Ok(())
//! }
//! ```

use crate::error::{OddsApiError, Result};
use crate::types::{OddsQuery, RequestQuota, Sport};
use async_trait::async_trait;
use governor::{Quota, RateLimiter};
use nonzero_ext::nonzero;
use parking_lot::RwLock;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use sports_arb_core::{OddsApiConfig, OddsSource, RawEvent};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

// =============================================================================
// Constants
// =============================================================================

/// Production API base URL.
pub const ODDS_API_URL: &str = "https://api.the-odds-api.com";

/// Default environment variable holding the API key.
pub const DEFAULT_API_KEY_ENV: &str = "ODDS_API_KEY";

/// Upper bound on the wait between retries, whatever the feed suggests.
pub const MAX_RETRY_DELAY: Duration = Duration::from_secs(60);

// =============================================================================
// Configuration
// =============================================================================

/// Configuration for the odds feed client.
#[derive(Debug, Clone)]
pub struct OddsApiClientConfig {
    /// Base URL for the API.
    pub base_url: String,

    /// API key sent as the `apiKey` query parameter.
    pub api_key: SecretString,

    /// Query used by [`OddsSource::fetch_events`].
    pub default_query: OddsQuery,

    /// Requests per minute limit.
    pub requests_per_minute: NonZeroU32,

    /// Request timeout in seconds.
    pub timeout_secs: u64,

    /// Extra attempts after a transient failure (network, timeout, 429, 5xx).
    pub max_retries: u32,

    /// Cap on the wait between retries.
    pub max_retry_delay: Duration,
}

impl OddsApiClientConfig {
    /// Creates a configuration with default settings for the given key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: ODDS_API_URL.to_string(),
            api_key: SecretString::from(api_key.into()),
            default_query: OddsQuery::default(),
            requests_per_minute: nonzero!(30u32),
            timeout_secs: 30,
            max_retries: 2,
            max_retry_delay: MAX_RETRY_DELAY,
        }
    }

    /// Reads the API key from the named environment variable.
    ///
    /// # Errors
    /// Returns [`OddsApiError::Authentication`] if the variable is unset or empty.
    pub fn from_env(var: &str) -> Result<Self> {
        let key = std::env::var(var).unwrap_or_default();
        if key.trim().is_empty() {
            return Err(OddsApiError::Authentication(format!(
                "environment variable {var} is not set"
            )));
        }
        Ok(Self::new(key))
    }

    /// Builds a configuration from the application config section.
    ///
    /// # Errors
    /// Returns an error if the API key variable is unset or the rate limit is zero.
    pub fn from_app_config(config: &OddsApiConfig) -> Result<Self> {
        let requests_per_minute = NonZeroU32::new(config.requests_per_minute).ok_or_else(|| {
            OddsApiError::Configuration("requests_per_minute must be positive".to_string())
        })?;

        let default_query = OddsQuery {
            sport: config.sport.clone(),
            regions: config.regions.clone(),
            markets: config.markets.clone(),
            odds_format: config.odds_format.clone(),
            date_format: config.date_format.clone(),
        };

        Ok(Self::from_env(&config.api_key_env)?
            .with_base_url(&config.base_url)
            .with_default_query(default_query)
            .with_rate_limit(requests_per_minute)
            .with_timeout_secs(config.timeout_secs)
            .with_max_retries(config.max_retries))
    }

    /// Sets the base URL.
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the query used when acting as an [`OddsSource`].
    #[must_use]
    pub fn with_default_query(mut self, query: OddsQuery) -> Self {
        self.default_query = query;
        self
    }

    /// Sets the rate limit.
    #[must_use]
    pub fn with_rate_limit(mut self, requests_per_minute: NonZeroU32) -> Self {
        self.requests_per_minute = requests_per_minute;
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Sets the number of retries after a transient failure.
    #[must_use]
    pub fn with_max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Caps the wait between retries.
    #[must_use]
    pub fn with_max_retry_delay(mut self, delay: Duration) -> Self {
        self.max_retry_delay = delay;
        self
    }
}

// =============================================================================
// OddsApiClient
// =============================================================================

/// Odds feed REST client.
///
/// All requests are rate-limited. The most recent request quota reported by
/// the feed is kept and exposed through [`OddsApiClient::last_quota`].
pub struct OddsApiClient {
    /// Configuration.
    config: OddsApiClientConfig,

    /// HTTP client.
    http: Client,

    /// Rate limiter.
    rate_limiter: Arc<
        RateLimiter<
            governor::state::NotKeyed,
            governor::state::InMemoryState,
            governor::clock::DefaultClock,
        >,
    >,

    /// Quota from the last response.
    last_quota: RwLock<Option<RequestQuota>>,
}

impl std::fmt::Debug for OddsApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OddsApiClient")
            .field("base_url", &self.config.base_url)
            .field("requests_per_minute", &self.config.requests_per_minute)
            .finish_non_exhaustive()
    }
}

impl OddsApiClient {
    /// Creates a new client with the given configuration.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be built.
    pub fn new(config: OddsApiClientConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| OddsApiError::Network(format!("failed to build HTTP client: {e}")))?;

        let quota = Quota::per_minute(config.requests_per_minute);
        let rate_limiter = Arc::new(RateLimiter::direct(quota));

        Ok(Self {
            config,
            http,
            rate_limiter,
            last_quota: RwLock::new(None),
        })
    }

    /// Returns the base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Sets a custom base URL (useful for testing).
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Request quota reported by the most recent response.
    #[must_use]
    pub fn last_quota(&self) -> Option<RequestQuota> {
        *self.last_quota.read()
    }

    /// Validates a sport key before it is placed in a URL path.
    fn validate_sport_key(sport: &str) -> Result<&str> {
        if sport.is_empty() {
            return Err(OddsApiError::InvalidRequest(
                "sport key cannot be empty".to_string(),
            ));
        }

        if !sport
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err(OddsApiError::InvalidRequest(format!(
                "invalid sport key: must contain only alphanumeric or underscore: {sport}"
            )));
        }

        if sport.len() > 64 {
            return Err(OddsApiError::InvalidRequest(format!(
                "invalid sport key: exceeds maximum length of 64: {}",
                sport.len()
            )));
        }

        Ok(sport)
    }

    /// Makes a GET request, retrying transient failures up to
    /// `max_retries` times with the delay the error suggests.
    async fn get<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<T> {
        let max_retries = self.config.max_retries;

        for attempt in 0..=max_retries {
            match self.get_once(path, params).await {
                Ok(body) => return Ok(body),
                Err(e) if e.is_transient() && attempt < max_retries => {
                    let delay = e
                        .retry_delay_secs()
                        .map_or(Duration::from_secs(1), Duration::from_secs)
                        .min(self.config.max_retry_delay);
                    warn!(
                        path,
                        attempt = attempt + 1,
                        max_retries,
                        error = %e,
                        delay_ms = delay.as_millis(),
                        "Odds API request failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }

        Err(OddsApiError::Network(format!(
            "max retries exceeded for {path}"
        )))
    }

    /// Waits for the rate limiter and makes one GET request with the API key.
    async fn get_once<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<T> {
        self.rate_limiter.until_ready().await;

        let url = format!("{}{}", self.config.base_url, path);

        debug!("GET {}", url);

        let response = self
            .http
            .get(&url)
            .header("Accept", "application/json")
            .query(&[("apiKey", self.config.api_key.expose_secret())])
            .query(params)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Handles API response, converting errors appropriately.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();
        self.record_quota(&response);

        if status == StatusCode::UNAUTHORIZED {
            let text = response.text().await.unwrap_or_default();
            return Err(OddsApiError::Authentication(text));
        }

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok())
                .unwrap_or(60);
            return Err(OddsApiError::rate_limit(retry_after));
        }

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(OddsApiError::api(status.as_u16(), text));
        }

        let text = response.text().await?;
        let body = serde_json::from_str::<T>(&text)?;
        Ok(body)
    }

    fn record_quota(&self, response: &reqwest::Response) {
        let quota = RequestQuota::from_headers(response.headers());
        if quota == RequestQuota::default() {
            return;
        }

        if quota.is_exhausted() {
            warn!(used = ?quota.used, "Odds API request quota exhausted");
        } else {
            debug!(remaining = ?quota.remaining, used = ?quota.used, "Odds API quota");
        }
        *self.last_quota.write() = Some(quota);
    }

    // =========================================================================
    // Endpoints
    // =========================================================================

    /// Gets head-to-head odds for every upcoming event of a sport.
    ///
    /// # Errors
    /// Returns [`OddsApiError::UnexpectedResponse`] if the body is not a list
    /// of events, or the mapped HTTP error otherwise.
    pub async fn get_odds(&self, query: &OddsQuery) -> Result<Vec<RawEvent>> {
        let sport = Self::validate_sport_key(&query.sport)?;
        let path = format!("/v4/sports/{sport}/odds");

        let events: Vec<RawEvent> = self.get(&path, &query.params()).await?;

        info!(
            sport = %query.sport,
            regions = %query.regions,
            events = events.len(),
            remaining_requests = ?self.last_quota().and_then(|q| q.remaining),
            "Fetched odds"
        );

        Ok(events)
    }

    /// Gets odds for the next events across all sports using the configured
    /// regions and markets.
    ///
    /// # Errors
    /// Returns error if the API call fails.
    pub async fn get_upcoming_odds(&self) -> Result<Vec<RawEvent>> {
        let query = OddsQuery {
            sport: crate::types::UPCOMING_SPORT.to_string(),
            ..self.config.default_query.clone()
        };
        self.get_odds(&query).await
    }

    /// Lists sports; only in-season ones unless `all` is set.
    ///
    /// # Errors
    /// Returns error if the API call fails.
    pub async fn list_sports(&self, all: bool) -> Result<Vec<Sport>> {
        let params: &[(&str, &str)] = if all { &[("all", "true")] } else { &[] };
        self.get("/v4/sports", params).await
    }
}

#[async_trait]
impl OddsSource for OddsApiClient {
    async fn fetch_events(&self) -> anyhow::Result<Vec<RawEvent>> {
        Ok(self.get_odds(&self.config.default_query).await?)
    }

    fn name(&self) -> &str {
        "the-odds-api"
    }
}
