//! Console configuration
//!
//! Resolution order, later wins: built-in defaults, the TOML file,
//! `STOREFRONT_API_URL`, then `--api-url`.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use storefront_core::ControllerConfig;
use storefront_gateway::GatewayConfig;

/// Environment variable overriding the API origin
pub const API_URL_ENV: &str = "STOREFRONT_API_URL";

/// Everything the console needs to start
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorefrontConfig {
    /// `[gateway]` table
    pub gateway: GatewayConfig,
    /// `[controller]` table
    pub controller: ControllerConfig,
}

impl StorefrontConfig {
    /// Parse TOML text; missing tables and keys take their defaults
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).context("invalid storefront configuration")
    }

    /// Load from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read config file {}", path.display()))?;
        Self::from_toml_str(&text).with_context(|| format!("in {}", path.display()))
    }

    /// Apply the API origin overrides; the flag beats the environment
    #[must_use]
    pub fn with_overrides(mut self, env_url: Option<String>, flag_url: Option<String>) -> Self {
        if let Some(url) = flag_url.or(env_url).filter(|u| !u.trim().is_empty()) {
            self.gateway = self.gateway.with_base_url(url);
        }
        self
    }

    /// Resolve the full configuration for this process
    pub fn resolve(path: Option<&Path>, flag_url: Option<String>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        let env_url = std::env::var(API_URL_ENV).ok();
        let config = config.with_overrides(env_url, flag_url);
        tracing::debug!(base_url = %config.gateway.base_url, "configuration resolved");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use std::time::Duration;

    #[test]
    fn empty_file_is_default() {
        let config = StorefrontConfig::from_toml_str("").unwrap();
        assert_eq!(config, StorefrontConfig::default());
        assert_eq!(config.gateway.base_url, storefront_gateway::DEFAULT_BASE_URL);
        assert_eq!(config.controller.error_marker_ttl(), Duration::from_secs(5));
    }

    #[test]
    fn partial_tables_keep_other_defaults() {
        let config = StorefrontConfig::from_toml_str(
            r#"
            [gateway]
            base_url = "http://shop.internal:8080"
            max_retries = 2

            [controller]
            error_marker_ttl_ms = 2500
            "#,
        )
        .unwrap();
        assert_eq!(config.gateway.base_url, "http://shop.internal:8080");
        assert_eq!(config.gateway.max_retries, 2);
        assert_eq!(config.gateway.timeout_ms, GatewayConfig::default().timeout_ms);
        assert_eq!(config.controller.error_marker_ttl_ms, 2500);
    }

    #[test]
    fn bad_types_are_reported() {
        let err = StorefrontConfig::from_toml_str("[gateway]\nmax_retries = \"many\"").unwrap_err();
        assert!(err.to_string().contains("invalid storefront configuration"));
    }

    #[test]
    fn flag_beats_environment() {
        let config = StorefrontConfig::default().with_overrides(
            Some("http://from-env".into()),
            Some("http://from-flag".into()),
        );
        assert_eq!(config.gateway.base_url, "http://from-flag");

        let config = StorefrontConfig::default().with_overrides(Some("http://from-env".into()), None);
        assert_eq!(config.gateway.base_url, "http://from-env");
    }

    #[test]
    fn blank_override_is_ignored() {
        let config = StorefrontConfig::default().with_overrides(Some("  ".into()), None);
        assert_eq!(config.gateway.base_url, storefront_gateway::DEFAULT_BASE_URL);
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[controller]\nerror_marker_ttl_ms = 100").unwrap();

        let config = StorefrontConfig::from_file(file.path()).unwrap();
        assert_eq!(config.controller.error_marker_ttl(), Duration::from_millis(100));
    }

    #[test]
    fn missing_file_names_path() {
        let err = StorefrontConfig::from_file(Path::new("/nonexistent/storefront.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/storefront.toml"));
    }
}
