//! Testing utilities for the storefront workspace
//!
//! Shared fixtures, a warp mock of the REST backend and a gateway whose
//! reads can be held open to stage overlapping selections.

#![allow(missing_docs)]

mod backend;
mod gated;

pub use backend::{MockBackend, RecordedRequest};
pub use gated::{Gate, GatedGateway};

use storefront_gateway::InMemoryGateway;
use storefront_model::{Product, ProductId, ProductStatus, Store, StoreId};

pub fn store(id: u64, name: &str) -> Store {
    Store {
        id: StoreId(id),
        name: name.to_string(),
        address: format!("{id} Test Street"),
        floor_area: 100.0 + id as f64,
        email: format!("store{id}@example.com"),
        phone_number: format!("555-{id:04}"),
        established: "2015-06-01".to_string(),
    }
}

pub fn product(id: u64, store_id: u64, status: ProductStatus) -> Product {
    Product {
        id: ProductId(id),
        store_id: StoreId(store_id),
        name: format!("Product {id}"),
        price: 10.0 * id as f64,
        specs: "standard".to_string(),
        supplier_info: "Test Supplier".to_string(),
        made_in: "Testland".to_string(),
        production_company_name: "Test Co".to_string(),
        rating: (id % 6) as u8,
        status,
    }
}

/// One store with an OK product (10) and a STORAGE product (11)
pub fn single_store_scenario() -> (Vec<Store>, Vec<Product>) {
    (
        vec![store(1, "A")],
        vec![
            product(10, 1, ProductStatus::Ok),
            product(11, 1, ProductStatus::Storage),
        ],
    )
}

/// Two stores with interleaved products of every status
pub fn two_store_scenario() -> (Vec<Store>, Vec<Product>) {
    (
        vec![store(1, "Alpha"), store(2, "Beta")],
        vec![
            product(10, 1, ProductStatus::Ok),
            product(20, 2, ProductStatus::Storage),
            product(11, 1, ProductStatus::Storage),
            product(21, 2, ProductStatus::OutOfStock),
            product(12, 1, ProductStatus::OutOfStock),
            product(13, 1, ProductStatus::Ok),
        ],
    )
}

pub fn gateway_for(scenario: (Vec<Store>, Vec<Product>)) -> InMemoryGateway {
    let (stores, products) = scenario;
    InMemoryGateway::with_data(stores, products)
}
