//! Error types for the selection controller
//!
//! Gateway and surface failures are wrapped unchanged; the controller adds
//! its own for flows attempted out of order.

use crate::bindings::Affordance;
use crate::state::{SelectionEvent, SelectionPhase};
use storefront_gateway::GatewayError;
use storefront_model::{ProductId, ValidationErrors};
use storefront_surface::{Modal, SurfaceError};

/// Main controller error type
#[derive(Debug, thiserror::Error)]
pub enum ControllerError {
    /// Remote call failed
    #[error("gateway error: {0}")]
    Gateway(#[from] GatewayError),

    /// Render operation failed
    #[error("surface error: {0}")]
    Surface(#[from] SurfaceError),

    /// Form input rejected
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    /// Event not allowed in the current phase
    #[error("{event:?} not allowed while {phase:?}")]
    IllegalTransition {
        /// Phase the controller is in
        phase: SelectionPhase,
        /// Rejected event
        event: SelectionEvent,
    },

    /// Flow needs a selected store
    #[error("no store selected")]
    NoStoreSelected,

    /// Affordance used before its handler exists
    #[error("no handler bound for {0:?}")]
    NotBound(Affordance),

    /// Second attempt to attach a handler
    #[error("handler already bound for {0:?}")]
    AlreadyBound(Affordance),

    /// Form submitted while its modal is closed
    #[error("{0:?} modal is not open")]
    ModalClosed(Modal),

    /// Confirm or cancel without an open confirmation
    #[error("no delete awaiting confirmation")]
    NoPendingDelete,

    /// Delete requested for a product not in the table
    #[error("product {0} is not in the current table")]
    UnknownProduct(ProductId),
}

impl ControllerError {
    /// Check if error is retryable
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Gateway(e) if e.is_retryable())
    }

    /// Check if error came from form validation
    #[inline]
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if error came from the network layer
    #[inline]
    #[must_use]
    pub fn is_gateway(&self) -> bool {
        matches!(self, Self::Gateway(_))
    }
}

/// Result alias for controller operations
pub type Result<T> = std::result::Result<T, ControllerError>;

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_model::{FormField, ValidationError};

    #[test]
    fn retryable_follows_gateway() {
        assert!(ControllerError::from(GatewayError::Unavailable).is_retryable());
        assert!(!ControllerError::NoStoreSelected.is_retryable());
        assert!(ControllerError::from(GatewayError::Unavailable).is_gateway());
    }

    #[test]
    fn validation_is_classified() {
        let mut errors = ValidationErrors::new();
        errors.push(ValidationError::InvalidField {
            field: FormField::Email,
            value: "x".into(),
        });
        let err = ControllerError::from(errors);
        assert!(err.is_validation());
        assert!(err.to_string().contains("Email"));
    }
}
