//! Subcommand execution
//!
//! Each action drives a fresh [`SelectionController`] through the same flow
//! a user would follow and returns the text to print.

use crate::args::Action;
use crate::config::StorefrontConfig;
use anyhow::{bail, Context, Result};
use std::fmt::Write as _;
use std::sync::Arc;
use storefront_core::{ControllerConfig, ControllerError, SelectionController, SelectionOutcome};
use storefront_gateway::{DataGateway, HttpGateway, InMemoryGateway};
use storefront_model::{ProductForm, ProductId, StatusFilter, StoreForm, StoreId};
use storefront_surface::text;

/// Gateway for this run
///
/// # Errors
/// Fails if the HTTP client cannot be built.
pub fn connect(config: &StorefrontConfig, offline: bool) -> Result<Arc<dyn DataGateway>> {
    if offline {
        tracing::info!("using built-in demonstration data");
        return Ok(Arc::new(InMemoryGateway::seeded()));
    }
    let gateway = HttpGateway::new(config.gateway.clone()).context("cannot build HTTP client")?;
    tracing::info!(base_url = %config.gateway.base_url, "using remote API");
    Ok(Arc::new(gateway))
}

/// Run one action and return its printable output
pub async fn execute(
    action: &Action,
    gateway: Arc<dyn DataGateway>,
    config: ControllerConfig,
) -> Result<String> {
    let controller = SelectionController::new(Arc::clone(&gateway), config);

    match action {
        Action::Stores { search } => list_stores(&controller, search.as_deref()).await,
        Action::Show { store, status } => {
            select(&controller, *store).await?;
            controller.apply_status_filter(*status)?;
            Ok(details(&controller))
        }
        Action::CreateStore(form) => create_store(&controller, form).await,
        Action::CreateProduct { store, form } => create_product(&controller, *store, form).await,
        Action::DeleteStore(id) => delete_store(&controller, *id).await,
        Action::DeleteProduct(id) => delete_product(&controller, gateway.as_ref(), *id).await,
        Action::Render { store, status } => {
            controller.load_stores().await?;
            if let Some(store) = store {
                select(&controller, *store).await?;
                controller.apply_status_filter(*status)?;
            } else if *status != StatusFilter::All {
                bail!("--status needs --store");
            }
            Ok(controller.html())
        }
    }
}

async fn select(controller: &SelectionController, store: StoreId) -> Result<()> {
    match controller.select_store(store).await? {
        SelectionOutcome::Applied(_) => Ok(()),
        SelectionOutcome::StoreMissing(id) => bail!("store {id} not found"),
        SelectionOutcome::Superseded => bail!("selection of store {store} was superseded"),
    }
}

async fn list_stores(controller: &SelectionController, search: Option<&str>) -> Result<String> {
    let stores = match search {
        Some(query) => controller.search(query).await?,
        None => controller.load_stores().await?,
    };
    if stores.is_empty() {
        return Ok("no stores".to_string());
    }
    Ok(text::store_table(&stores, None))
}

/// Contacts, status summary and product table of the selected store
fn details(controller: &SelectionController) -> String {
    let selection = controller.selection();
    let mut out = String::new();
    if let Some(store) = controller.selected_store() {
        let _ = writeln!(out, "{}", text::contacts(&store));
    }
    let _ = writeln!(
        out,
        "{}",
        text::summary_line(&controller.status_summary(), selection.filter)
    );
    out.push_str(&text::product_table(&controller.products(), selection.filter));
    out
}

/// Turn a rejected form into a readable error
fn form_error(error: ControllerError) -> anyhow::Error {
    match error {
        ControllerError::Validation(errors) => {
            let fields: Vec<String> = errors.fields().iter().map(ToString::to_string).collect();
            anyhow::anyhow!("invalid input in {}: {errors}", fields.join(", "))
        }
        other => other.into(),
    }
}

async fn create_store(controller: &SelectionController, form: &StoreForm) -> Result<String> {
    controller.load_stores().await?;
    controller.open_create_store()?;
    controller.submit_store_form(form).await.map_err(form_error)?;
    Ok(text::store_table(&controller.stores(), None))
}

async fn create_product(
    controller: &SelectionController,
    store: StoreId,
    form: &ProductForm,
) -> Result<String> {
    select(controller, store).await?;
    controller.open_create_product()?;
    controller.submit_product_form(form).await.map_err(form_error)?;
    Ok(details(controller))
}

async fn delete_store(controller: &SelectionController, id: StoreId) -> Result<String> {
    select(controller, id).await?;
    controller.request_store_delete()?;
    controller.confirm_delete().await?;
    Ok(format!("deleted store {id}\n{}", text::store_table(&controller.stores(), None)))
}

async fn delete_product(
    controller: &SelectionController,
    gateway: &dyn DataGateway,
    id: ProductId,
) -> Result<String> {
    let owner = gateway
        .fetch_all_products()
        .await?
        .into_iter()
        .find(|p| p.id == id)
        .map(|p| p.store_id)
        .with_context(|| format!("product {id} not found"))?;

    select(controller, owner).await?;
    controller.request_product_delete(id)?;
    controller.confirm_delete().await?;
    Ok(format!("deleted product {id}\n{}", details(controller)))
}
