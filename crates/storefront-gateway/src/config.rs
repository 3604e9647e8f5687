//! Gateway configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default API origin
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Gateway configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Origin the fixed `/api/...` paths are appended to
    pub base_url: String,
    /// Per-request timeout in milliseconds
    pub timeout_ms: u64,
    /// Extra attempts for failed collection reads
    pub max_retries: u32,
    /// Pause between read attempts in milliseconds
    pub retry_backoff_ms: u64,
}

impl GatewayConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With API origin
    #[inline]
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// With request timeout
    #[inline]
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// With read retries
    #[inline]
    #[must_use]
    pub fn with_retries(mut self, max_retries: u32, backoff: Duration) -> Self {
        self.max_retries = max_retries;
        self.retry_backoff_ms = u64::try_from(backoff.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Request timeout
    #[inline]
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Pause between read attempts
    #[inline]
    #[must_use]
    pub fn retry_backoff(&self) -> Duration {
        Duration::from_millis(self.retry_backoff_ms)
    }

    /// Base URL without a trailing slash
    #[must_use]
    pub fn normalized_base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_ms: 10_000,
            max_retries: 0,
            retry_backoff_ms: 250,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = GatewayConfig::new();
        assert_eq!(config.base_url, "http://localhost:3000");
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert_eq!(config.max_retries, 0);
    }

    #[test]
    fn builders_and_normalization() {
        let config = GatewayConfig::new()
            .with_base_url("http://api.example:8080/")
            .with_timeout(Duration::from_millis(1500))
            .with_retries(2, Duration::from_millis(50));
        assert_eq!(config.normalized_base_url(), "http://api.example:8080");
        assert_eq!(config.timeout_ms, 1500);
        assert_eq!(config.retry_backoff(), Duration::from_millis(50));
    }

    #[test]
    fn partial_config_uses_defaults() {
        let config: GatewayConfig =
            serde_json::from_str(r#"{ "base_url": "http://10.0.0.2:3000" }"#).unwrap();
        assert_eq!(config.base_url, "http://10.0.0.2:3000");
        assert_eq!(config.timeout_ms, 10_000);
    }
}
