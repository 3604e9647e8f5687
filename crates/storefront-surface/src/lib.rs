//! Storefront Surface
//!
//! The rendered document the console shows: store list, details pane,
//! status filter affordances, product table and modal forms.
//!
//! # Core Concepts
//!
//! - [`Element`]: tag, ordered classes, ordered attributes, text, children
//! - [`Surface`]: the document root with render operations (write markup
//!   from model data) and queries (read hooks back)
//! - [`Modal`]: the four modal windows toggled with `show` / `hide`
//!
//! # Example
//!
//! ```rust,ignore
//! use storefront_surface::Surface;
//!
//! let mut surface = Surface::new();
//! surface.render_store_list(&stores)?;
//! surface.mark_active_store(stores[0].id);
//! surface.construct_details_pane(&stores[0], &products)?;
//! println!("{}", surface.to_html());
//! ```

#![warn(unreachable_pub)]

pub mod element;
pub mod error;
pub mod html;
mod markup;
pub mod surface;
pub mod text;

pub use element::Element;
pub use error::{Result, SurfaceError};
pub use markup::{highlight_class, summary_count_class};
pub use surface::{Modal, Surface};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
