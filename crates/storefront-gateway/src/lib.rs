//! Storefront Gateway
//!
//! Stateless access to the two remote collections:
//! - `GET/POST /api/Stores`, `DELETE /api/Stores/{id}`
//! - `GET/POST /api/Products`, `DELETE /api/Products/{id}`
//!
//! plus the client-side helpers built on full collection reads (product join,
//! store search).
//!
//! # Example
//!
//! ```rust,ignore
//! use storefront_gateway::{DataGateway, GatewayConfig, HttpGateway, filter_stores_from};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let gateway = HttpGateway::new(GatewayConfig::new())?;
//! let stores = filter_stores_from(|| gateway.fetch_all_stores(), "market").await?;
//! println!("{} stores match", stores.len());
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod config;
pub mod error;
pub mod gateway;
pub mod http;
pub mod memory;

pub use config::{GatewayConfig, DEFAULT_BASE_URL};
pub use error::{Collection, GatewayError};
pub use gateway::{filter_stores, filter_stores_from, join_products, store_matches, DataGateway};
pub use http::HttpGateway;
pub use memory::InMemoryGateway;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
