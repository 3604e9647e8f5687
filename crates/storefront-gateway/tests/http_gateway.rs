//! HttpGateway against the warp backend double

use pretty_assertions::assert_eq;
use serde_json::json;
use std::time::Duration;
use storefront_gateway::{Collection, DataGateway, GatewayConfig, GatewayError, HttpGateway};
use storefront_model::{ProductDraft, ProductId, ProductStatus, StoreDraft, StoreId};
use storefront_test_utils::{two_store_scenario, MockBackend};

fn backend() -> MockBackend {
    let (stores, products) = two_store_scenario();
    MockBackend::new(stores, products)
}

fn gateway(base_url: String) -> HttpGateway {
    HttpGateway::new(GatewayConfig::new().with_base_url(base_url)).unwrap()
}

#[tokio::test]
async fn reads_both_collections() {
    let backend = backend();
    let gateway = gateway(backend.start());

    let stores = gateway.fetch_all_stores().await.unwrap();
    let products = gateway.fetch_all_products().await.unwrap();

    assert_eq!(stores.len(), 2);
    assert_eq!(products.len(), 6);
    assert_eq!(stores[1].name, "Beta");
}

#[tokio::test]
async fn products_for_store_keep_backend_order() {
    let backend = backend();
    let gateway = gateway(backend.start());
    let store = gateway.fetch_all_stores().await.unwrap().remove(0);

    let ids: Vec<u64> = gateway
        .fetch_products_for_store(&store)
        .await
        .unwrap()
        .iter()
        .map(|p| p.id.get())
        .collect();

    assert_eq!(ids, vec![10, 11, 12, 13]);
}

#[tokio::test]
async fn create_store_posts_wire_names() {
    let backend = backend();
    let gateway = gateway(backend.start());

    let draft = StoreDraft {
        name: "Gamma".into(),
        email: "gamma@example.com".into(),
        phone_number: "555-0003".into(),
        address: "3 Side Road".into(),
        established: "2020-01-01".into(),
        floor_area: 75.5,
    };
    gateway.create_store(&draft).await.unwrap();

    let request = backend.requests().pop().unwrap();
    assert_eq!(request.method, "POST");
    assert_eq!(request.path, "/api/Stores");
    let body = request.body.unwrap();
    assert_eq!(body["Name"], json!("Gamma"));
    assert_eq!(body["FloorArea"], json!(75.5));
    assert_eq!(body["PhoneNumber"], json!("555-0003"));
    assert_eq!(backend.stores().last().unwrap().id, StoreId(3));
}

#[tokio::test]
async fn create_product_carries_store_id() {
    let backend = backend();
    let gateway = gateway(backend.start());

    let draft = ProductDraft {
        name: "Lamp".into(),
        price: 12.0,
        specs: String::new(),
        rating: 4,
        supplier_info: String::new(),
        made_in: String::new(),
        production_company_name: String::new(),
        status: ProductStatus::Storage,
        store_id: StoreId(2),
    };
    gateway.create_product(&draft).await.unwrap();

    let created = backend.products().pop().unwrap();
    assert_eq!(created.store_id, StoreId(2));
    assert_eq!(created.status, ProductStatus::Storage);
    let body = backend.requests().pop().unwrap().body.unwrap();
    assert_eq!(body["Status"], json!("STORAGE"));
    assert_eq!(body["StoreId"], json!(2));
}

#[tokio::test]
async fn delete_sends_count_body() {
    let backend = backend();
    let gateway = gateway(backend.start());

    gateway.delete_product(ProductId(21)).await.unwrap();
    gateway.delete_store(StoreId(2)).await.unwrap();

    let deletes: Vec<_> = backend
        .requests()
        .into_iter()
        .filter(|r| r.method == "DELETE")
        .collect();
    assert_eq!(deletes.len(), 2);
    assert_eq!(deletes[0].path, "/api/Products/21");
    assert_eq!(deletes[1].path, "/api/Stores/2");
    for request in &deletes {
        assert_eq!(request.body, Some(json!({ "count": 0 })));
    }
    assert_eq!(backend.stores().len(), 1);
}

#[tokio::test]
async fn delete_missing_record_is_not_found() {
    let backend = backend();
    let gateway = gateway(backend.start());

    let err = gateway.delete_store(StoreId(99)).await.unwrap_err();

    assert!(matches!(
        err,
        GatewayError::NotFound {
            collection: Collection::Stores,
            id: 99
        }
    ));
}

#[tokio::test]
async fn failed_read_without_retries_surfaces_status() {
    let backend = backend();
    let gateway = gateway(backend.start());
    backend.fail_next_reads(1);

    let err = gateway.fetch_all_stores().await.unwrap_err();

    assert!(matches!(err, GatewayError::Status { status: 503, .. }));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn failed_read_is_retried_when_configured() {
    let backend = backend();
    let config = GatewayConfig::new()
        .with_base_url(backend.start())
        .with_retries(2, Duration::from_millis(5));
    let gateway = HttpGateway::new(config).unwrap();
    backend.fail_next_reads(2);

    let stores = gateway.fetch_all_stores().await.unwrap();

    assert_eq!(stores.len(), 2);
    let reads = backend
        .requests()
        .iter()
        .filter(|r| r.method == "GET")
        .count();
    assert_eq!(reads, 3);
}

#[tokio::test]
async fn mutations_are_not_retried() {
    let backend = backend();
    let config = GatewayConfig::new()
        .with_base_url(backend.start())
        .with_retries(3, Duration::from_millis(5));
    let gateway = HttpGateway::new(config).unwrap();

    let err = gateway.delete_product(ProductId(404)).await.unwrap_err();

    assert!(matches!(err, GatewayError::NotFound { .. }));
    assert_eq!(backend.requests().len(), 1);
}
