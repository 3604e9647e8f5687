use parking_lot::Mutex;
use serde_json::Value;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use storefront_model::{Product, ProductDraft, ProductId, Store, StoreDraft, StoreId};
use warp::http::StatusCode;
use warp::hyper::body::Bytes;
use warp::reply::Response;
use warp::{Filter, Reply};

/// A request seen by the mock backend
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: &'static str,
    pub path: String,
    pub body: Option<Value>,
}

#[derive(Debug, Default)]
struct BackendState {
    stores: Vec<Store>,
    products: Vec<Product>,
    failing_reads: usize,
    requests: Vec<RecordedRequest>,
}

/// REST backend double serving `/api/Stores` and `/api/Products`
#[derive(Debug, Clone, Default)]
pub struct MockBackend {
    state: Arc<Mutex<BackendState>>,
}

impl MockBackend {
    /// Backend seeded with `stores` and `products`
    pub fn new(stores: Vec<Store>, products: Vec<Product>) -> Self {
        Self {
            state: Arc::new(Mutex::new(BackendState {
                stores,
                products,
                ..BackendState::default()
            })),
        }
    }

    /// Answer the next `count` collection reads with 503
    pub fn fail_next_reads(&self, count: usize) {
        self.state.lock().failing_reads = count;
    }

    pub fn stores(&self) -> Vec<Store> {
        self.state.lock().stores.clone()
    }

    pub fn products(&self) -> Vec<Product> {
        self.state.lock().products.clone()
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().requests.clone()
    }

    /// Serve on an ephemeral loopback port, returning the base URL
    pub fn start(&self) -> String {
        let (addr, server) = warp::serve(self.routes()).bind_ephemeral(([127, 0, 0, 1], 0));
        tokio::spawn(server);
        base_url(addr)
    }

    fn routes(&self) -> impl Filter<Extract = (impl Reply,), Error = warp::Rejection> + Clone {
        let list_stores = warp::path!("api" / "Stores")
            .and(warp::get())
            .and(with_backend(self.clone()))
            .map(|backend: MockBackend| backend.list(Kind::Stores));

        let list_products = warp::path!("api" / "Products")
            .and(warp::get())
            .and(with_backend(self.clone()))
            .map(|backend: MockBackend| backend.list(Kind::Products));

        let create_store = warp::path!("api" / "Stores")
            .and(warp::post())
            .and(warp::body::json())
            .and(with_backend(self.clone()))
            .map(|draft: StoreDraft, backend: MockBackend| backend.create_store(draft));

        let create_product = warp::path!("api" / "Products")
            .and(warp::post())
            .and(warp::body::json())
            .and(with_backend(self.clone()))
            .map(|draft: ProductDraft, backend: MockBackend| backend.create_product(draft));

        let delete_store = warp::path!("api" / "Stores" / u64)
            .and(warp::delete())
            .and(warp::body::bytes())
            .and(with_backend(self.clone()))
            .map(|id: u64, body: Bytes, backend: MockBackend| {
                backend.delete(Kind::Stores, id, &body)
            });

        let delete_product = warp::path!("api" / "Products" / u64)
            .and(warp::delete())
            .and(warp::body::bytes())
            .and(with_backend(self.clone()))
            .map(|id: u64, body: Bytes, backend: MockBackend| {
                backend.delete(Kind::Products, id, &body)
            });

        list_stores
            .or(list_products)
            .or(create_store)
            .or(create_product)
            .or(delete_store)
            .or(delete_product)
    }

    fn record(&self, method: &'static str, path: String, body: Option<Value>) {
        self.state
            .lock()
            .requests
            .push(RecordedRequest { method, path, body });
    }

    fn list(&self, kind: Kind) -> Response {
        self.record("GET", kind.path().to_string(), None);
        let mut state = self.state.lock();
        if state.failing_reads > 0 {
            state.failing_reads -= 1;
            return StatusCode::SERVICE_UNAVAILABLE.into_response();
        }
        match kind {
            Kind::Stores => warp::reply::json(&state.stores).into_response(),
            Kind::Products => warp::reply::json(&state.products).into_response(),
        }
    }

    fn create_store(&self, draft: StoreDraft) -> Response {
        self.record("POST", Kind::Stores.path().to_string(), serde_json::to_value(&draft).ok());
        let mut state = self.state.lock();
        let id = StoreId(state.stores.iter().map(|s| s.id.get()).max().unwrap_or(0) + 1);
        let store = Store {
            id,
            name: draft.name,
            address: draft.address,
            floor_area: draft.floor_area,
            email: draft.email,
            phone_number: draft.phone_number,
            established: draft.established,
        };
        let reply = warp::reply::json(&store);
        state.stores.push(store);
        warp::reply::with_status(reply, StatusCode::CREATED).into_response()
    }

    fn create_product(&self, draft: ProductDraft) -> Response {
        self.record("POST", Kind::Products.path().to_string(), serde_json::to_value(&draft).ok());
        let mut state = self.state.lock();
        let id = ProductId(state.products.iter().map(|p| p.id.get()).max().unwrap_or(0) + 1);
        let product = Product {
            id,
            store_id: draft.store_id,
            name: draft.name,
            price: draft.price,
            specs: draft.specs,
            supplier_info: draft.supplier_info,
            made_in: draft.made_in,
            production_company_name: draft.production_company_name,
            rating: draft.rating,
            status: draft.status,
        };
        let reply = warp::reply::json(&product);
        state.products.push(product);
        warp::reply::with_status(reply, StatusCode::CREATED).into_response()
    }

    fn delete(&self, kind: Kind, id: u64, body: &[u8]) -> Response {
        self.record(
            "DELETE",
            format!("{}/{id}", kind.path()),
            serde_json::from_slice(body).ok(),
        );
        let mut state = self.state.lock();
        let removed = match kind {
            Kind::Stores => {
                let before = state.stores.len();
                state.stores.retain(|s| s.id.get() != id);
                before != state.stores.len()
            }
            Kind::Products => {
                let before = state.products.len();
                state.products.retain(|p| p.id.get() != id);
                before != state.products.len()
            }
        };
        if removed {
            warp::reply::json(&serde_json::json!({})).into_response()
        } else {
            StatusCode::NOT_FOUND.into_response()
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Kind {
    Stores,
    Products,
}

impl Kind {
    fn path(self) -> &'static str {
        match self {
            Self::Stores => "/api/Stores",
            Self::Products => "/api/Products",
        }
    }
}

fn with_backend(
    backend: MockBackend,
) -> impl Filter<Extract = (MockBackend,), Error = Infallible> + Clone {
    warp::any().map(move || backend.clone())
}

fn base_url(addr: SocketAddr) -> String {
    format!("http://{addr}")
}
