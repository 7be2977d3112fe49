use std::time::Duration;

use serde::Deserialize;

use crate::retry::RetryPolicy;

/// Remote API connection settings.
#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    /// Base URL including the version prefix. Default: "http://localhost:5000/api/v1".
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Bearer token sent with every request, if set.
    #[serde(default)]
    pub token: Option<String>,
    /// Per-request timeout in seconds. Default: 15.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:5000/api/v1".into()
}
fn default_timeout_secs() -> u64 {
    15
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Submission status polling settings.
#[derive(Debug, Deserialize, Clone)]
pub struct PollConfig {
    /// Delay between consecutive reads. Default: 2000.
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
    /// Retries for a failed read before giving up. Default: 0 (stop on first error).
    #[serde(default)]
    pub max_retries: u8,
    /// Default: 500.
    #[serde(default = "default_retry_base_delay_ms")]
    pub retry_base_delay_ms: u64,
    /// Default: 10000.
    #[serde(default = "default_retry_max_delay_ms")]
    pub retry_max_delay_ms: u64,
}

fn default_interval_ms() -> u64 {
    2000
}
fn default_retry_base_delay_ms() -> u64 {
    500
}
fn default_retry_max_delay_ms() -> u64 {
    10_000
}

impl PollConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_retries: self.max_retries,
            base_delay: Duration::from_millis(self.retry_base_delay_ms),
            max_delay: Duration::from_millis(self.retry_max_delay_ms),
        }
    }
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
            max_retries: 0,
            retry_base_delay_ms: default_retry_base_delay_ms(),
            retry_max_delay_ms: default_retry_max_delay_ms(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_section_uses_defaults() {
        let poll: PollConfig = serde_json::from_str(r#"{ "interval_ms": 500 }"#).unwrap();
        assert_eq!(poll.interval(), Duration::from_millis(500));
        assert_eq!(poll.retry_policy(), RetryPolicy {
            max_retries: 0,
            base_delay: Duration::from_millis(500),
            max_delay: Duration::from_millis(10_000),
        });

        let api: ApiConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(api.base_url, "http://localhost:5000/api/v1");
        assert_eq!(api.timeout(), Duration::from_secs(15));
    }
}
