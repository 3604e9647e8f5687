//! Call ordering against a mocked gateway

use async_trait::async_trait;
use mockall::{mock, Sequence};
use std::sync::Arc;
use storefront_core::{ControllerConfig, PendingDelete, SelectionController, SelectionOutcome};
use storefront_surface::Modal;
use storefront_gateway::{DataGateway, GatewayError};
use storefront_model::{Product, ProductDraft, ProductId, ProductStatus, Store, StoreDraft, StoreId};
use storefront_test_utils::{product, store};

mock! {
    pub Gateway {}

    #[async_trait]
    impl DataGateway for Gateway {
        async fn fetch_all_stores(&self) -> Result<Vec<Store>, GatewayError>;
        async fn fetch_all_products(&self) -> Result<Vec<Product>, GatewayError>;
        async fn create_store(&self, draft: &StoreDraft) -> Result<(), GatewayError>;
        async fn create_product(&self, draft: &ProductDraft) -> Result<(), GatewayError>;
        async fn delete_store(&self, id: StoreId) -> Result<(), GatewayError>;
        async fn delete_product(&self, id: ProductId) -> Result<(), GatewayError>;
    }
}

#[tokio::test]
async fn selection_fetches_stores_before_products() {
    let mut gateway = MockGateway::new();
    let mut seq = Sequence::new();
    gateway
        .expect_fetch_all_stores()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|| Ok(vec![store(4, "Delta")]));
    gateway
        .expect_fetch_all_products()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|| {
            Ok(vec![
                product(40, 4, ProductStatus::Ok),
                product(50, 5, ProductStatus::Ok),
            ])
        });

    let controller = SelectionController::new(Arc::new(gateway), ControllerConfig::new());
    let outcome = controller.select_store(StoreId(4)).await.unwrap();

    assert_eq!(outcome, SelectionOutcome::Applied(StoreId(4)));
    assert_eq!(controller.products().len(), 1);
}

#[tokio::test]
async fn failed_store_fetch_skips_products() {
    let mut gateway = MockGateway::new();
    gateway
        .expect_fetch_all_stores()
        .times(1)
        .returning(|| Err(GatewayError::Unavailable));
    gateway.expect_fetch_all_products().never();

    let controller = SelectionController::new(Arc::new(gateway), ControllerConfig::new());
    let err = controller.select_store(StoreId(4)).await.unwrap_err();

    assert!(err.is_gateway());
    assert_eq!(controller.selection().store, None);
    assert_eq!(controller.surface().active_store_id(), None);
}

#[tokio::test]
async fn missing_store_skips_products() {
    let mut gateway = MockGateway::new();
    gateway
        .expect_fetch_all_stores()
        .times(1)
        .returning(|| Ok(vec![store(1, "Alpha")]));
    gateway.expect_fetch_all_products().never();

    let controller = SelectionController::new(Arc::new(gateway), ControllerConfig::new());
    let outcome = controller.select_store(StoreId(9)).await.unwrap();

    assert_eq!(outcome, SelectionOutcome::StoreMissing(StoreId(9)));
}

#[tokio::test]
async fn store_delete_then_reload() {
    let mut gateway = MockGateway::new();
    let mut seq = Sequence::new();
    gateway
        .expect_fetch_all_stores()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|| Ok(vec![store(1, "Alpha"), store(2, "Beta")]));
    gateway
        .expect_fetch_all_products()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|| Ok(vec![product(10, 1, ProductStatus::Storage)]));
    gateway
        .expect_delete_store()
        .withf(|id| *id == StoreId(1))
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(()));
    gateway
        .expect_fetch_all_stores()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|| Ok(vec![store(2, "Beta")]));

    let controller = SelectionController::new(Arc::new(gateway), ControllerConfig::new());
    controller.select_store(StoreId(1)).await.unwrap();
    controller.request_store_delete().unwrap();
    controller.confirm_delete().await.unwrap();

    assert_eq!(controller.surface().store_list_ids(), vec![StoreId(2)]);
}

#[tokio::test]
async fn store_delete_succeeds_when_reload_fails() {
    let mut gateway = MockGateway::new();
    let mut seq = Sequence::new();
    gateway
        .expect_fetch_all_stores()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|| Ok(vec![store(1, "Alpha"), store(2, "Beta")]));
    gateway
        .expect_fetch_all_products()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|| Ok(vec![product(10, 1, ProductStatus::Ok)]));
    gateway
        .expect_delete_store()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(()));
    gateway
        .expect_fetch_all_stores()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|| Err(GatewayError::Unavailable));

    let controller = SelectionController::new(Arc::new(gateway), ControllerConfig::new());
    controller.select_store(StoreId(1)).await.unwrap();
    controller.request_store_delete().unwrap();

    let deleted = controller.confirm_delete().await.unwrap();

    assert_eq!(deleted, PendingDelete::Store(StoreId(1)));
    assert_eq!(controller.pending_delete(), None);
    assert!(!controller.surface().modal_is_open(Modal::ConfirmStoreDelete));
    assert_eq!(controller.selection().store, None);
}

#[tokio::test]
async fn product_delete_succeeds_when_refresh_fails() {
    let mut gateway = MockGateway::new();
    let mut seq = Sequence::new();
    gateway
        .expect_fetch_all_stores()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|| Ok(vec![store(1, "Alpha")]));
    gateway
        .expect_fetch_all_products()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|| {
            Ok(vec![
                product(10, 1, ProductStatus::Ok),
                product(11, 1, ProductStatus::Storage),
            ])
        });
    gateway
        .expect_delete_product()
        .withf(|id| *id == ProductId(11))
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(()));
    gateway
        .expect_fetch_all_products()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|| Err(GatewayError::Unavailable));

    let controller = SelectionController::new(Arc::new(gateway), ControllerConfig::new());
    controller.select_store(StoreId(1)).await.unwrap();
    controller.request_product_delete(ProductId(11)).unwrap();

    let deleted = controller.confirm_delete().await.unwrap();

    assert_eq!(deleted, PendingDelete::Product(ProductId(11)));
    assert!(!controller.surface().modal_is_open(Modal::ConfirmProductDelete));
}
