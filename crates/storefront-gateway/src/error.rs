//! Error types for the data gateway

/// Remote collection addressed by a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    /// `/api/Stores`
    Stores,
    /// `/api/Products`
    Products,
}

impl Collection {
    /// Path of the collection under the API base
    #[inline]
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Stores => "/api/Stores",
            Self::Products => "/api/Products",
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Stores => f.write_str("Stores"),
            Self::Products => f.write_str("Products"),
        }
    }
}

/// Gateway error type
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Connection, timeout or other transport failure
    #[error("transport error on {method} {url}: {message}")]
    Transport {
        method: String,
        url: String,
        message: String,
    },

    /// Server answered with a non-success status
    #[error("{method} {url} returned status {status}")]
    Status {
        method: String,
        url: String,
        status: u16,
    },

    /// Response body did not match the collection schema
    #[error("failed to decode response from {url}: {message}")]
    Decode { url: String, message: String },

    /// Record addressed by id does not exist
    #[error("{collection} record {id} not found")]
    NotFound { collection: Collection, id: u64 },

    /// Backend deliberately unavailable (in-memory gateway)
    #[error("backend unavailable")]
    Unavailable,

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

impl GatewayError {
    /// Check if the failed request may be repeated
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport { .. } | Self::Unavailable => true,
            Self::Status { status, .. } => *status >= 500,
            Self::Decode { .. } | Self::NotFound { .. } | Self::Config(_) => false,
        }
    }

    /// Check if the failure happened below HTTP
    #[inline]
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. } | Self::Unavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retry_classification() {
        let transport = GatewayError::Transport {
            method: "GET".into(),
            url: "http://localhost:3000/api/Stores".into(),
            message: "connection refused".into(),
        };
        assert!(transport.is_retryable());
        assert!(transport.is_transport());

        let server = GatewayError::Status {
            method: "GET".into(),
            url: String::new(),
            status: 503,
        };
        assert!(server.is_retryable());

        let client = GatewayError::Status {
            method: "POST".into(),
            url: String::new(),
            status: 400,
        };
        assert!(!client.is_retryable());

        let missing = GatewayError::NotFound {
            collection: Collection::Stores,
            id: 4,
        };
        assert!(!missing.is_retryable());
        assert_eq!(missing.to_string(), "Stores record 4 not found");
    }

    #[test]
    fn collection_paths() {
        assert_eq!(Collection::Stores.path(), "/api/Stores");
        assert_eq!(Collection::Products.path(), "/api/Products");
    }
}
