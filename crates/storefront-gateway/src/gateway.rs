//! The data gateway seam and client-side store filtering
//!
//! The backend has no server-side filtering: products are joined to their
//! store and stores are searched on the client after a full collection read.

use crate::error::GatewayError;
use std::future::Future;
use storefront_model::{Product, ProductDraft, ProductId, Store, StoreDraft, StoreId};

/// Access to the Stores and Products collections
///
/// Implementations own no selection state; every read returns the full
/// current collection.
#[async_trait::async_trait]
pub trait DataGateway: Send + Sync {
    /// `GET /api/Stores`
    async fn fetch_all_stores(&self) -> Result<Vec<Store>, GatewayError>;

    /// `GET /api/Products`
    async fn fetch_all_products(&self) -> Result<Vec<Product>, GatewayError>;

    /// `POST /api/Stores`
    async fn create_store(&self, draft: &StoreDraft) -> Result<(), GatewayError>;

    /// `POST /api/Products`
    async fn create_product(&self, draft: &ProductDraft) -> Result<(), GatewayError>;

    /// `DELETE /api/Stores/{id}`
    async fn delete_store(&self, id: StoreId) -> Result<(), GatewayError>;

    /// `DELETE /api/Products/{id}`
    async fn delete_product(&self, id: ProductId) -> Result<(), GatewayError>;

    /// Read every product, keep those owned by `store`
    async fn fetch_products_for_store(&self, store: &Store) -> Result<Vec<Product>, GatewayError> {
        let products = self.fetch_all_products().await?;
        Ok(join_products(store.id, products))
    }
}

/// Keep products owned by `store`, preserving fetch order
#[must_use]
pub fn join_products(store: StoreId, products: Vec<Product>) -> Vec<Product> {
    products.into_iter().filter(|p| p.belongs_to(store)).collect()
}

/// Whether `store` matches a search query
///
/// Case-insensitive substring match on name, address or the decimal text of
/// the floor area. The empty query matches every store.
#[must_use]
pub fn store_matches(store: &Store, query: &str) -> bool {
    let needle = query.to_lowercase();
    store.name.to_lowercase().contains(&needle)
        || store.address.to_lowercase().contains(&needle)
        || store.floor_area_text().to_lowercase().contains(&needle)
}

/// Filter an already fetched store list
#[must_use]
pub fn filter_stores(stores: Vec<Store>, query: &str) -> Vec<Store> {
    stores.into_iter().filter(|s| store_matches(s, query)).collect()
}

/// Fetch stores from `source`, then filter them by `query`
///
/// # Errors
/// Propagates the source's failure unchanged.
pub async fn filter_stores_from<F, Fut>(source: F, query: &str) -> Result<Vec<Store>, GatewayError>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<Vec<Store>, GatewayError>>,
{
    let stores = source().await?;
    let total = stores.len();
    let matched = filter_stores(stores, query);
    tracing::debug!(query, total, matched = matched.len(), "filtered stores");
    Ok(matched)
}
