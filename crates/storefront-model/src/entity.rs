//! Store and product entities
//!
//! Field names on the wire follow the backend collections exactly
//! (`Name`, `FloorArea`, `StoreId`, ...), so every field carries an explicit
//! serde rename.

use crate::status::ProductStatus;
use serde::{Deserialize, Serialize};
use std::num::ParseIntError;
use std::str::FromStr;

/// Store identifier (backend `id`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoreId(pub u64);

impl StoreId {
    /// Raw numeric value
    #[inline]
    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for StoreId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for StoreId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// Product identifier (backend `id`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub u64);

impl ProductId {
    /// Raw numeric value
    #[inline]
    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ProductId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// A retail location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Store {
    /// Backend identifier
    pub id: StoreId,
    /// Display name
    #[serde(rename = "Name")]
    pub name: String,
    /// Street address
    #[serde(rename = "Address")]
    pub address: String,
    /// Floor area in square metres
    #[serde(rename = "FloorArea")]
    pub floor_area: f64,
    /// Contact email
    #[serde(rename = "Email")]
    pub email: String,
    /// Contact phone number
    #[serde(rename = "PhoneNumber")]
    pub phone_number: String,
    /// Opening date as entered; kept verbatim
    #[serde(rename = "Established")]
    pub established: String,
}

impl Store {
    /// Floor area in its display form (`120`, `12.5`)
    #[inline]
    #[must_use]
    pub fn floor_area_text(&self) -> String {
        self.floor_area.to_string()
    }
}

/// An item stocked by one store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Backend identifier
    pub id: ProductId,
    /// Owning store
    #[serde(rename = "StoreId")]
    pub store_id: StoreId,
    /// Display name
    #[serde(rename = "Name")]
    pub name: String,
    /// Price in USD
    #[serde(rename = "Price")]
    pub price: f64,
    /// Specifications
    #[serde(rename = "Specs", default)]
    pub specs: String,
    /// Supplier information
    #[serde(rename = "SupplierInfo", default)]
    pub supplier_info: String,
    /// Country of manufacture
    #[serde(rename = "MadeIn", default)]
    pub made_in: String,
    /// Production company
    #[serde(rename = "ProductionCompanyName", default)]
    pub production_company_name: String,
    /// Star rating, 0 through 5
    #[serde(rename = "Rating")]
    pub rating: u8,
    /// Stock status
    #[serde(rename = "Status")]
    pub status: ProductStatus,
}

impl Product {
    /// Whether this product belongs to `store`
    #[inline]
    #[must_use]
    pub fn belongs_to(&self, store: StoreId) -> bool {
        self.store_id == store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn store_decodes_backend_field_names() {
        let store: Store = serde_json::from_value(json!({
            "id": 1,
            "Name": "Downtown",
            "Address": "1 Main St",
            "FloorArea": 120,
            "Email": "shop@example.com",
            "PhoneNumber": "555-0100",
            "Established": "2010-04-01"
        }))
        .unwrap();

        assert_eq!(store.id, StoreId(1));
        assert_eq!(store.name, "Downtown");
        assert_eq!(store.floor_area_text(), "120");
    }

    #[test]
    fn product_decodes_and_defaults_optional_text() {
        let product: Product = serde_json::from_value(json!({
            "id": 10,
            "StoreId": 1,
            "Name": "Kettle",
            "Price": 19.5,
            "Rating": 4,
            "Status": "OUT_OF_STOCK"
        }))
        .unwrap();

        assert_eq!(product.id, ProductId(10));
        assert!(product.belongs_to(StoreId(1)));
        assert!(!product.belongs_to(StoreId(2)));
        assert_eq!(product.status, ProductStatus::OutOfStock);
        assert!(product.specs.is_empty());
    }

    #[test]
    fn ids_parse_from_attribute_text() {
        assert_eq!(" 42 ".parse::<StoreId>().unwrap(), StoreId(42));
        assert_eq!("7".parse::<ProductId>().unwrap(), ProductId(7));
        assert!("x".parse::<StoreId>().is_err());
    }

    #[test]
    fn fractional_floor_area_text() {
        let store = Store {
            id: StoreId(2),
            name: String::new(),
            address: String::new(),
            floor_area: 12.5,
            email: String::new(),
            phone_number: String::new(),
            established: String::new(),
        };
        assert_eq!(store.floor_area_text(), "12.5");
    }
}
