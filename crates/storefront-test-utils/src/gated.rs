use parking_lot::Mutex;
use std::collections::VecDeque;
use storefront_gateway::{DataGateway, GatewayError, InMemoryGateway};
use storefront_model::{Product, ProductDraft, ProductId, Store, StoreDraft, StoreId};
use tokio::sync::oneshot;

/// Releases one held read
#[derive(Debug)]
pub struct Gate {
    sender: oneshot::Sender<()>,
}

impl Gate {
    /// Let the held call proceed
    pub fn release(self) {
        let _ = self.sender.send(());
    }
}

/// In-memory gateway whose next reads can be held until released
///
/// Every call is also appended to a log so tests can check ordering.
#[derive(Debug)]
pub struct GatedGateway {
    inner: InMemoryGateway,
    store_gates: Mutex<VecDeque<oneshot::Receiver<()>>>,
    product_gates: Mutex<VecDeque<oneshot::Receiver<()>>>,
    calls: Mutex<Vec<&'static str>>,
}

impl GatedGateway {
    /// Wrap `inner`; nothing held
    pub fn new(inner: InMemoryGateway) -> Self {
        Self {
            inner,
            store_gates: Mutex::new(VecDeque::new()),
            product_gates: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Hold the next `fetch_all_stores` until the gate is released
    pub fn hold_next_store_fetch(&self) -> Gate {
        let (sender, receiver) = oneshot::channel();
        self.store_gates.lock().push_back(receiver);
        Gate { sender }
    }

    /// Hold the next `fetch_all_products` until the gate is released
    pub fn hold_next_product_fetch(&self) -> Gate {
        let (sender, receiver) = oneshot::channel();
        self.product_gates.lock().push_back(receiver);
        Gate { sender }
    }

    /// Wrapped gateway
    pub fn inner(&self) -> &InMemoryGateway {
        &self.inner
    }

    /// Gateway calls in arrival order
    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().clone()
    }

    fn record(&self, call: &'static str) {
        self.calls.lock().push(call);
    }
}

#[async_trait::async_trait]
impl DataGateway for GatedGateway {
    async fn fetch_all_stores(&self) -> Result<Vec<Store>, GatewayError> {
        self.record("fetch_all_stores");
        let gate = self.store_gates.lock().pop_front();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        self.inner.fetch_all_stores().await
    }

    async fn fetch_all_products(&self) -> Result<Vec<Product>, GatewayError> {
        self.record("fetch_all_products");
        let gate = self.product_gates.lock().pop_front();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        self.inner.fetch_all_products().await
    }

    async fn create_store(&self, draft: &StoreDraft) -> Result<(), GatewayError> {
        self.record("create_store");
        self.inner.create_store(draft).await
    }

    async fn create_product(&self, draft: &ProductDraft) -> Result<(), GatewayError> {
        self.record("create_product");
        self.inner.create_product(draft).await
    }

    async fn delete_store(&self, id: StoreId) -> Result<(), GatewayError> {
        self.record("delete_store");
        self.inner.delete_store(id).await
    }

    async fn delete_product(&self, id: ProductId) -> Result<(), GatewayError> {
        self.record("delete_product");
        self.inner.delete_product(id).await
    }
}
