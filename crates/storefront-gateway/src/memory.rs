//! In-process gateway backed by vectors
//!
//! Behaves like the REST backend: ids are allocated on create, deletes of
//! unknown ids fail with `NotFound`, and deleting a store leaves its products
//! in place.

use crate::error::{Collection, GatewayError};
use crate::gateway::DataGateway;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use storefront_model::{
    Product, ProductDraft, ProductId, ProductStatus, Store, StoreDraft, StoreId,
};

#[derive(Debug, Default)]
struct Collections {
    stores: Vec<Store>,
    products: Vec<Product>,
}

impl Collections {
    fn next_store_id(&self) -> StoreId {
        StoreId(self.stores.iter().map(|s| s.id.get()).max().unwrap_or(0) + 1)
    }

    fn next_product_id(&self) -> ProductId {
        ProductId(self.products.iter().map(|p| p.id.get()).max().unwrap_or(0) + 1)
    }
}

/// Gateway holding both collections in memory
#[derive(Debug, Default)]
pub struct InMemoryGateway {
    inner: Mutex<Collections>,
    unavailable: AtomicBool,
}

impl InMemoryGateway {
    /// Create empty gateway
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create gateway holding the given records
    #[must_use]
    pub fn with_data(stores: Vec<Store>, products: Vec<Product>) -> Self {
        Self {
            inner: Mutex::new(Collections { stores, products }),
            unavailable: AtomicBool::new(false),
        }
    }

    /// Small demonstration data set
    #[must_use]
    pub fn seeded() -> Self {
        let store = |id: u64, name: &str, address: &str, floor_area: f64, email: &str| Store {
            id: StoreId(id),
            name: name.to_string(),
            address: address.to_string(),
            floor_area,
            email: email.to_string(),
            phone_number: format!("555-01{id:02}"),
            established: format!("20{:02}-03-15", 10 + id),
        };
        let product = |id: u64, store: u64, name: &str, price: f64, rating: u8, status| Product {
            id: ProductId(id),
            store_id: StoreId(store),
            name: name.to_string(),
            price,
            specs: format!("{name} specification"),
            supplier_info: "Acme Supply".to_string(),
            made_in: "Portugal".to_string(),
            production_company_name: "Acme".to_string(),
            rating,
            status,
        };

        Self::with_data(
            vec![
                store(1, "Downtown Market", "1 Main St", 120.0, "downtown@example.com"),
                store(2, "Harbour Goods", "44 Quay Rd", 85.5, "harbour@example.com"),
                store(3, "Uptown Outlet", "9 Hill Ave", 300.0, "uptown@example.com"),
            ],
            vec![
                product(10, 1, "Kettle", 24.99, 4, ProductStatus::Ok),
                product(11, 1, "Toaster", 39.5, 3, ProductStatus::Storage),
                product(12, 1, "Blender", 89.0, 5, ProductStatus::OutOfStock),
                product(13, 2, "Lantern", 15.0, 2, ProductStatus::Ok),
                product(14, 3, "Desk Lamp", 32.0, 4, ProductStatus::Ok),
                product(15, 3, "Bookshelf", 120.0, 1, ProductStatus::Storage),
            ],
        )
    }

    /// Make every call fail with `GatewayError::Unavailable`
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Current store records
    #[must_use]
    pub fn stores(&self) -> Vec<Store> {
        self.inner.lock().stores.clone()
    }

    /// Current product records
    #[must_use]
    pub fn products(&self) -> Vec<Product> {
        self.inner.lock().products.clone()
    }

    fn check_available(&self) -> Result<(), GatewayError> {
        if self.unavailable.load(Ordering::SeqCst) {
            Err(GatewayError::Unavailable)
        } else {
            Ok(())
        }
    }
}

#[async_trait::async_trait]
impl DataGateway for InMemoryGateway {
    async fn fetch_all_stores(&self) -> Result<Vec<Store>, GatewayError> {
        self.check_available()?;
        Ok(self.stores())
    }

    async fn fetch_all_products(&self) -> Result<Vec<Product>, GatewayError> {
        self.check_available()?;
        Ok(self.products())
    }

    async fn create_store(&self, draft: &StoreDraft) -> Result<(), GatewayError> {
        self.check_available()?;
        let mut inner = self.inner.lock();
        let id = inner.next_store_id();
        inner.stores.push(Store {
            id,
            name: draft.name.clone(),
            address: draft.address.clone(),
            floor_area: draft.floor_area,
            email: draft.email.clone(),
            phone_number: draft.phone_number.clone(),
            established: draft.established.clone(),
        });
        tracing::debug!(%id, "store created");
        Ok(())
    }

    async fn create_product(&self, draft: &ProductDraft) -> Result<(), GatewayError> {
        self.check_available()?;
        let mut inner = self.inner.lock();
        let id = inner.next_product_id();
        inner.products.push(Product {
            id,
            store_id: draft.store_id,
            name: draft.name.clone(),
            price: draft.price,
            specs: draft.specs.clone(),
            supplier_info: draft.supplier_info.clone(),
            made_in: draft.made_in.clone(),
            production_company_name: draft.production_company_name.clone(),
            rating: draft.rating,
            status: draft.status,
        });
        tracing::debug!(%id, store = %draft.store_id, "product created");
        Ok(())
    }

    async fn delete_store(&self, id: StoreId) -> Result<(), GatewayError> {
        self.check_available()?;
        let mut inner = self.inner.lock();
        let before = inner.stores.len();
        inner.stores.retain(|s| s.id != id);
        if inner.stores.len() == before {
            return Err(GatewayError::NotFound {
                collection: Collection::Stores,
                id: id.get(),
            });
        }
        Ok(())
    }

    async fn delete_product(&self, id: ProductId) -> Result<(), GatewayError> {
        self.check_available()?;
        let mut inner = self.inner.lock();
        let before = inner.products.len();
        inner.products.retain(|p| p.id != id);
        if inner.products.len() == before {
            return Err(GatewayError::NotFound {
                collection: Collection::Products,
                id: id.get(),
            });
        }
        Ok(())
    }
}
