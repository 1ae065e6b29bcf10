//! Error types for the odds feed client.

use thiserror::Error;

/// Errors that can occur when talking to the odds feed.
#[derive(Debug, Error)]
pub enum OddsApiError {
    /// API key missing or rejected.
    #[error("authentication error: {0}")]
    Authentication(String),

    /// API request failed.
    #[error("API error: {status_code} - {message}")]
    Api {
        /// HTTP status code.
        status_code: u16,
        /// Error message from API.
        message: String,
    },

    /// Request quota exhausted.
    #[error("rate limit exceeded, retry after {retry_after_secs}s")]
    RateLimit {
        /// Seconds to wait before retry.
        retry_after_secs: u64,
    },

    /// Network error.
    #[error("network error: {0}")]
    Network(String),

    /// Request timeout.
    #[error("request timeout: {0}")]
    Timeout(String),

    /// Response body was not the expected shape.
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),

    /// Invalid request parameters.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl OddsApiError {
    /// Creates an API error from status code and message.
    pub fn api(status_code: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status_code,
            message: message.into(),
        }
    }

    /// Creates a rate limit error.
    pub fn rate_limit(retry_after_secs: u64) -> Self {
        Self::RateLimit { retry_after_secs }
    }

    /// Returns true if the error indicates the request should be retried later.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Network(_) | Self::Timeout(_) | Self::RateLimit { .. } => true,
            Self::Api { status_code, .. } => *status_code >= 500,
            _ => false,
        }
    }

    /// Returns the suggested retry delay in seconds, if applicable.
    #[must_use]
    pub fn retry_delay_secs(&self) -> Option<u64> {
        match self {
            Self::RateLimit { retry_after_secs } => Some(*retry_after_secs),
            Self::Network(_) | Self::Timeout(_) => Some(1),
            Self::Api { status_code, .. } if *status_code >= 500 => Some(2),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for OddsApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else if err.is_connect() {
            Self::Network(format!("connection failed: {err}"))
        } else if err.is_decode() {
            Self::UnexpectedResponse(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for OddsApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::UnexpectedResponse(err.to_string())
    }
}

/// Result type alias for odds feed operations.
pub type Result<T> = std::result::Result<T, OddsApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Error Construction Tests ====================

    #[test]
    fn test_api_error_construction() {
        let err = OddsApiError::api(422, "invalid market");
        assert!(matches!(
            err,
            OddsApiError::Api {
                status_code: 422,
                ..
            }
        ));
        assert!(err.to_string().contains("422"));
        assert!(err.to_string().contains("invalid market"));
    }

    #[test]
    fn test_rate_limit_error_construction() {
        let err = OddsApiError::rate_limit(60);
        assert!(matches!(
            err,
            OddsApiError::RateLimit {
                retry_after_secs: 60
            }
        ));
        assert!(err.to_string().contains("60"));
    }

    #[test]
    fn test_from_serde_error_is_unexpected_response() {
        let err: OddsApiError = serde_json::from_str::<Vec<u8>>("{}").unwrap_err().into();
        assert!(matches!(err, OddsApiError::UnexpectedResponse(_)));
    }

    // ==================== Transient Tests ====================

    #[test]
    fn test_transient_errors() {
        assert!(OddsApiError::Network("refused".to_string()).is_transient());
        assert!(OddsApiError::Timeout("timed out".to_string()).is_transient());
        assert!(OddsApiError::rate_limit(30).is_transient());
    }

    #[test]
    fn test_server_error_is_transient() {
        assert!(OddsApiError::api(500, "internal server error").is_transient());
        assert!(OddsApiError::api(503, "unavailable").is_transient());
    }

    #[test]
    fn test_permanent_errors() {
        let auth = OddsApiError::Authentication("invalid key".to_string());
        assert!(!auth.is_transient());

        let shape = OddsApiError::UnexpectedResponse("not a list".to_string());
        assert!(!shape.is_transient());
        assert!(!OddsApiError::api(400, "bad request").is_transient());
    }

    // ==================== Retry Delay Tests ====================

    #[test]
    fn test_retry_delays() {
        assert_eq!(OddsApiError::rate_limit(45).retry_delay_secs(), Some(45));
        assert_eq!(
            OddsApiError::Timeout("slow".to_string()).retry_delay_secs(),
            Some(1)
        );
        assert_eq!(OddsApiError::api(503, "unavailable").retry_delay_secs(), Some(2));
        assert_eq!(OddsApiError::api(404, "unknown sport").retry_delay_secs(), None);
    }
}
