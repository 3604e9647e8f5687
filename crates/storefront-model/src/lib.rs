//! Storefront Model
//!
//! Entities and value types shared by every layer of the storefront console.
//!
//! # Core Concepts
//!
//! - [`Store`]: a retail location record, identified by [`StoreId`]
//! - [`Product`]: an item owned by exactly one store through `StoreId`
//! - [`ProductStatus`] and [`StatusFilter`]: stock state of a product and the
//!   filter that restricts which product rows are visible
//! - [`StoreForm`] / [`ProductForm`]: raw form input, validated into
//!   [`StoreDraft`] / [`ProductDraft`] request bodies
//!
//! # Example
//!
//! ```rust,ignore
//! use storefront_model::{StoreForm, StatusFilter, ProductStatus};
//!
//! let draft = StoreForm {
//!     name: "Downtown".into(),
//!     email: "shop@example.com".into(),
//!     floor_area: "120.5".into(),
//!     ..StoreForm::default()
//! }
//! .validate()?;
//!
//! assert!(StatusFilter::Only(ProductStatus::Ok).matches(ProductStatus::Ok));
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

// Core modules
pub mod entity;
pub mod error;
pub mod form;
pub mod status;
pub mod validation;

// Re-exports for convenience
pub use entity::{Product, ProductId, Store, StoreId};
pub use error::{FormField, ValidationError, ValidationErrors};
pub use form::{ProductDraft, ProductForm, StoreDraft, StoreForm};
pub use status::{ProductStatus, StatusFilter, StatusSummary};
pub use validation::{parse_floor_area, validate_email, validate_floor_area, validate_rating};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with storefront entities
    pub use crate::{
        Product, ProductDraft, ProductForm, ProductId, ProductStatus, StatusFilter, StatusSummary,
        Store, StoreDraft, StoreForm, StoreId,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
