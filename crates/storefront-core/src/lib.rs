//! Storefront Core
//!
//! The selection controller behind the storefront console.
//!
//! # Core Concepts
//!
//! - [`SelectionController`]: owns the explicit [`SelectionState`], talks to a
//!   [`storefront_gateway::DataGateway`] and drives a
//!   [`storefront_surface::Surface`]
//! - [`SelectionPhase`] / [`SelectionEvent`]: the transition table that decides
//!   which user events are legal
//! - [`SelectionToken`]: tags each selection so stale completions are dropped
//! - [`EventBindings`]: which affordances have handlers; detail handlers are
//!   attached exactly once, when the details pane signals ready
//! - [`ValidationMarkers`]: invalid-field markers that clear themselves
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use storefront_core::{ControllerConfig, SelectionController};
//! use storefront_gateway::{GatewayConfig, HttpGateway};
//! use storefront_model::{ProductStatus, StatusFilter, StoreId};
//!
//! let gateway = Arc::new(HttpGateway::new(GatewayConfig::new())?);
//! let controller = SelectionController::new(gateway, ControllerConfig::new());
//! controller.load_stores().await?;
//! controller.select_store(StoreId(1)).await?;
//! controller.apply_status_filter(StatusFilter::Only(ProductStatus::Ok))?;
//! ```

#![warn(unreachable_pub)]

pub mod bindings;
pub mod config;
pub mod controller;
pub mod error;
pub mod markers;
pub mod state;
pub mod token;

pub use bindings::{Affordance, EventBindings, PaneReady};
pub use config::{ControllerConfig, DEFAULT_ERROR_MARKER_TTL_MS};
pub use controller::{PendingDelete, SelectionController, SelectionOutcome};
pub use error::{ControllerError, Result};
pub use markers::ValidationMarkers;
pub use state::{allowed_events, validate_transition, SelectionEvent, SelectionPhase, SelectionState};
pub use token::{SelectionToken, TokenIssuer};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
