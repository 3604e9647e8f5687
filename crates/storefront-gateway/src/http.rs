//! HTTP gateway over the REST backend
//!
//! Paths are fixed (`/api/Stores`, `/api/Products`); only the origin is
//! configurable. Collection reads may be retried, mutations never are.

use crate::config::GatewayConfig;
use crate::error::{Collection, GatewayError};
use crate::gateway::DataGateway;
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use storefront_model::{Product, ProductDraft, ProductId, Store, StoreDraft, StoreId};

/// Vestigial body the backend expects on DELETE
const DELETE_BODY: DeleteBody = DeleteBody { count: 0 };

#[derive(Debug, Clone, Copy, Serialize)]
struct DeleteBody {
    count: u32,
}

/// Gateway talking JSON over HTTP
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: Client,
    config: GatewayConfig,
}

impl HttpGateway {
    /// Create gateway from configuration
    ///
    /// # Errors
    /// - `GatewayError::Config` if the base URL does not parse or the client
    ///   cannot be built
    pub fn new(config: GatewayConfig) -> Result<Self, GatewayError> {
        reqwest::Url::parse(config.normalized_base_url())
            .map_err(|e| GatewayError::Config(format!("invalid base url {:?}: {e}", config.base_url)))?;

        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| GatewayError::Config(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Get configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Absolute URL of a collection
    #[must_use]
    pub fn collection_url(&self, collection: Collection) -> String {
        format!("{}{}", self.config.normalized_base_url(), collection.path())
    }

    /// Absolute URL of one record
    #[must_use]
    pub fn record_url(&self, collection: Collection, id: u64) -> String {
        format!("{}/{id}", self.collection_url(collection))
    }

    async fn read_collection<T: DeserializeOwned>(
        &self,
        collection: Collection,
    ) -> Result<Vec<T>, GatewayError> {
        let url = self.collection_url(collection);
        let mut attempt = 0u32;

        loop {
            match self.get_once(&url).await {
                Ok(items) => return Ok(items),
                Err(e) if e.is_retryable() && attempt < self.config.max_retries => {
                    attempt += 1;
                    tracing::warn!(%url, attempt, error = %e, "collection read failed, retrying");
                    tokio::time::sleep(self.config.retry_backoff()).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn get_once<T: DeserializeOwned>(&self, url: &str) -> Result<Vec<T>, GatewayError> {
        tracing::debug!(%url, "GET");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| transport(&Method::GET, url, &e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::Status {
                method: Method::GET.as_str().to_string(),
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.json::<Vec<T>>().await.map_err(|e| GatewayError::Decode {
            url: url.to_string(),
            message: e.to_string(),
        })
    }

    async fn send<B: Serialize + Sync>(
        &self,
        method: Method,
        url: String,
        body: &B,
        target: Option<(Collection, u64)>,
    ) -> Result<(), GatewayError> {
        tracing::debug!(method = method.as_str(), %url, "sending");

        let response = self
            .client
            .request(method.clone(), &url)
            .json(body)
            .send()
            .await
            .map_err(|e| transport(&method, &url, &e))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        match target {
            Some((collection, id)) if status == StatusCode::NOT_FOUND => {
                Err(GatewayError::NotFound { collection, id })
            }
            _ => Err(GatewayError::Status {
                method: method.as_str().to_string(),
                url,
                status: status.as_u16(),
            }),
        }
    }
}

#[async_trait::async_trait]
impl DataGateway for HttpGateway {
    async fn fetch_all_stores(&self) -> Result<Vec<Store>, GatewayError> {
        self.read_collection(Collection::Stores).await
    }

    async fn fetch_all_products(&self) -> Result<Vec<Product>, GatewayError> {
        self.read_collection(Collection::Products).await
    }

    async fn create_store(&self, draft: &StoreDraft) -> Result<(), GatewayError> {
        let url = self.collection_url(Collection::Stores);
        self.send(Method::POST, url, draft, None).await
    }

    async fn create_product(&self, draft: &ProductDraft) -> Result<(), GatewayError> {
        let url = self.collection_url(Collection::Products);
        self.send(Method::POST, url, draft, None).await
    }

    async fn delete_store(&self, id: StoreId) -> Result<(), GatewayError> {
        let url = self.record_url(Collection::Stores, id.get());
        self.send(Method::DELETE, url, &DELETE_BODY, Some((Collection::Stores, id.get())))
            .await
    }

    async fn delete_product(&self, id: ProductId) -> Result<(), GatewayError> {
        let url = self.record_url(Collection::Products, id.get());
        self.send(
            Method::DELETE,
            url,
            &DELETE_BODY,
            Some((Collection::Products, id.get())),
        )
        .await
    }
}

fn transport(method: &Method, url: &str, error: &reqwest::Error) -> GatewayError {
    GatewayError::Transport {
        method: method.as_str().to_string(),
        url: url.to_string(),
        message: error.to_string(),
    }
}
