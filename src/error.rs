//! Graph API error types.

use std::time::Duration;

use thiserror::Error;

/// Errors produced by the Graph API client.
#[derive(Error, Debug)]
pub enum GraphError {
    /// Caller supplied insufficient or contradictory parameters.
    /// Raised before any request is issued.
    #[error("Invalid parameter: {message}")]
    InvalidParameter { message: String },

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The Graph API returned an error envelope
    #[error("Graph API error {code}: {message}")]
    Api {
        /// HTTP status of the response
        status: u16,
        /// Graph error code (e.g. 4 = application throttled)
        code: i64,
        /// Graph error subcode, when present
        error_subcode: Option<i64>,
        /// Error type (e.g. "OAuthException")
        error_type: Option<String>,
        message: String,
        /// Facebook trace id for support lookups
        fbtrace_id: Option<String>,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Graph error codes that indicate throttling. See
/// <https://developers.facebook.com/docs/graph-api/guides/error-handling>.
const THROTTLE_CODES: &[i64] = &[4, 17, 32, 613];

impl GraphError {
    /// Check if this error is retryable.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Http(e) => e.is_timeout() || e.is_connect(),
            Self::Api { status, code, .. } => {
                *status >= 500 || *status == 429 || THROTTLE_CODES.contains(code)
            }
            _ => false,
        }
    }

    /// Get the suggested retry delay, if the API indicated one.
    #[must_use]
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::Api { status, code, .. }
                if *status == 429 || THROTTLE_CODES.contains(code) =>
            {
                Some(Duration::from_secs(60))
            }
            _ => None,
        }
    }

    pub(crate) fn invalid_parameter(message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            message: message.into(),
        }
    }
}

/// Result type for Graph API operations.
pub type GraphResult<T> = Result<T, GraphError>;
