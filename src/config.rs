//! Graph API client configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Configuration for the Graph API client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphConfig {
    /// User or page access token sent with every request
    pub access_token: String,

    /// App secret. When set, every request also carries an
    /// `appsecret_proof` parameter derived from the token.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_secret: Option<String>,

    /// Base URL for the Graph API (default: https://graph.facebook.com)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Graph API version segment (default: v12.0)
    #[serde(default = "default_version")]
    pub version: String,

    /// Request timeout
    #[serde(default = "default_timeout", with = "duration_secs")]
    pub timeout: Duration,

    /// Retry configuration
    #[serde(default)]
    pub retry: RetryConfig,
}

fn default_base_url() -> String {
    "https://graph.facebook.com".into()
}

fn default_version() -> String {
    "v12.0".into()
}

fn default_timeout() -> Duration {
    Duration::from_secs(30)
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_secs().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

/// Retry configuration for transport-level failures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum attempts per page request
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Initial delay between retries in milliseconds
    #[serde(default = "default_initial_delay_ms")]
    pub initial_delay_ms: u64,

    /// Maximum delay between retries in milliseconds
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,
}

fn default_max_attempts() -> u32 {
    3
}

fn default_initial_delay_ms() -> u64 {
    1000
}

fn default_max_delay_ms() -> u64 {
    60_000
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            initial_delay_ms: default_initial_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
        }
    }
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            access_token: String::new(),
            app_secret: None,
            base_url: default_base_url(),
            version: default_version(),
            timeout: default_timeout(),
            retry: RetryConfig::default(),
        }
    }
}

impl GraphConfig {
    /// Create a config with just an access token and defaults for
    /// everything else.
    #[must_use]
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            ..Default::default()
        }
    }
}
