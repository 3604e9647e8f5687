//! Controller configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default lifetime of an invalid-field marker
pub const DEFAULT_ERROR_MARKER_TTL_MS: u64 = 5_000;

/// Controller configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// How long invalid-field markers stay before clearing themselves
    pub error_marker_ttl_ms: u64,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            error_marker_ttl_ms: DEFAULT_ERROR_MARKER_TTL_MS,
        }
    }
}

impl ControllerConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With marker lifetime
    #[inline]
    #[must_use]
    pub fn with_error_marker_ttl(mut self, ttl: Duration) -> Self {
        self.error_marker_ttl_ms = u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Marker lifetime as a duration
    #[inline]
    #[must_use]
    pub fn error_marker_ttl(&self) -> Duration {
        Duration::from_millis(self.error_marker_ttl_ms)
    }
}
