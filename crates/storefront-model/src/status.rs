//! Product stock status and the status filter
//!
//! The filter is a two-level state: [`StatusFilter::All`] is the
//! de-highlighted super-state, [`StatusFilter::Only`] narrows the product
//! table to one status.

use crate::entity::Product;
use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Stock status of a product
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ProductStatus {
    /// Available on the shop floor
    #[serde(rename = "OK")]
    Ok,
    /// Held in storage
    #[serde(rename = "STORAGE")]
    Storage,
    /// Not available
    #[serde(rename = "OUT_OF_STOCK")]
    OutOfStock,
}

impl ProductStatus {
    /// All statuses, in display order
    pub const ALL: [ProductStatus; 3] = [Self::Ok, Self::Storage, Self::OutOfStock];

    /// Wire value (`OK`, `STORAGE`, `OUT_OF_STOCK`)
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Storage => "STORAGE",
            Self::OutOfStock => "OUT_OF_STOCK",
        }
    }

    /// Human label used in the status summary
    #[inline]
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Ok => "Ok",
            Self::Storage => "Storage",
            Self::OutOfStock => "Out of stock",
        }
    }
}

impl std::fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductStatus {
    type Err = ValidationError;

    /// Accepts wire values and their kebab/lowercase spellings
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().replace('-', "_").as_str() {
            "OK" => Ok(Self::Ok),
            "STORAGE" => Ok(Self::Storage),
            "OUT_OF_STOCK" => Ok(Self::OutOfStock),
            _ => Err(ValidationError::UnknownStatus(s.to_string())),
        }
    }
}

/// Which product rows are visible
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum StatusFilter {
    /// Every row visible, no affordance highlighted
    #[default]
    All,
    /// Only rows with this status visible
    Only(ProductStatus),
}

impl StatusFilter {
    /// Every filter affordance, `all` first
    pub const AFFORDANCES: [StatusFilter; 4] = [
        Self::All,
        Self::Only(ProductStatus::Ok),
        Self::Only(ProductStatus::Storage),
        Self::Only(ProductStatus::OutOfStock),
    ];

    /// Whether a row with `status` is visible under this filter
    #[inline]
    #[must_use]
    pub fn matches(self, status: ProductStatus) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == status,
        }
    }

    /// Value of the `data-status` hook on the filter affordance
    #[inline]
    #[must_use]
    pub fn data_status(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Only(status) => status.as_str(),
        }
    }

    /// The highlighted status, if any
    #[inline]
    #[must_use]
    pub fn status(self) -> Option<ProductStatus> {
        match self {
            Self::All => None,
            Self::Only(status) => Some(status),
        }
    }
}

impl std::fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.data_status())
    }
}

impl FromStr for StatusFilter {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(Self::All)
        } else {
            s.parse().map(Self::Only)
        }
    }
}

/// Per-status product counts shown above the product table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatusSummary {
    /// Products in stock
    pub ok: usize,
    /// Products in storage
    pub storage: usize,
    /// Products out of stock
    pub out_of_stock: usize,
}

impl StatusSummary {
    /// Count statuses over a product slice
    #[must_use]
    pub fn from_products(products: &[Product]) -> Self {
        products.iter().fold(Self::default(), |mut acc, p| {
            match p.status {
                ProductStatus::Ok => acc.ok += 1,
                ProductStatus::Storage => acc.storage += 1,
                ProductStatus::OutOfStock => acc.out_of_stock += 1,
            }
            acc
        })
    }

    /// Count for one status
    #[inline]
    #[must_use]
    pub fn count(&self, status: ProductStatus) -> usize {
        match status {
            ProductStatus::Ok => self.ok,
            ProductStatus::Storage => self.storage,
            ProductStatus::OutOfStock => self.out_of_stock,
        }
    }

    /// Total across statuses (the `all` figure)
    #[inline]
    #[must_use]
    pub fn total(&self) -> usize {
        self.ok + self.storage + self.out_of_stock
    }
}
