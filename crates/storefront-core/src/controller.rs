//! Selection controller
//!
//! Owns the explicit selection state and drives the surface from it. All
//! operations take `&self`; interior state sits behind `parking_lot` locks
//! that are never held across an await. Lock order is state, then surface,
//! then bindings.
//!
//! # Selection flow
//! 1. Issue a selection token and move the active marker
//! 2. Fetch stores, then (strictly after) products
//! 3. Drop the completion if a newer token was issued meanwhile
//! 4. Construct the details pane on first use, patch it in place after

use crate::bindings::{Affordance, EventBindings, PaneReady};
use crate::config::ControllerConfig;
use crate::error::{ControllerError, Result};
use crate::markers::ValidationMarkers;
use crate::state::{validate_transition, SelectionEvent, SelectionState};
use crate::token::{SelectionToken, TokenIssuer};
use parking_lot::Mutex;
use std::sync::Arc;
use storefront_gateway::{filter_stores_from, DataGateway, GatewayError};
use storefront_model::{
    Product, ProductForm, ProductId, StatusFilter, StatusSummary, Store, StoreForm, StoreId,
};
use storefront_surface::{Modal, Surface};

/// How a selection request ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionOutcome {
    /// Details pane now shows the store
    Applied(StoreId),
    /// A newer selection was issued; nothing was written
    Superseded,
    /// The store is gone from the fresh list; selection dropped
    StoreMissing(StoreId),
}

/// Record awaiting delete confirmation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingDelete {
    /// Delete the selected store
    Store(StoreId),
    /// Delete one product row
    Product(ProductId),
}

impl PendingDelete {
    /// Confirmation modal for this delete
    #[inline]
    #[must_use]
    pub fn modal(self) -> Modal {
        match self {
            Self::Store(_) => Modal::ConfirmStoreDelete,
            Self::Product(_) => Modal::ConfirmProductDelete,
        }
    }
}

#[derive(Debug, Default)]
struct ControllerState {
    selection: SelectionState,
    stores: Vec<Store>,
    products: Vec<Product>,
    pending_delete: Option<PendingDelete>,
}

impl ControllerState {
    fn deselect(&mut self, surface: &mut Surface) -> Result<()> {
        self.selection.deselect();
        self.products.clear();
        surface.clear_active_store();
        if surface.details_pane_exists() {
            surface.clear_details()?;
        }
        Ok(())
    }
}

/// Drives store selection, status filtering and the create/delete flows
pub struct SelectionController {
    gateway: Arc<dyn DataGateway>,
    config: ControllerConfig,
    surface: Arc<Mutex<Surface>>,
    state: Mutex<ControllerState>,
    tokens: TokenIssuer,
    bindings: Mutex<EventBindings>,
    pane_ready: PaneReady,
    markers: ValidationMarkers,
}

impl std::fmt::Debug for SelectionController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectionController")
            .field("config", &self.config)
            .field("selection", &self.selection())
            .field("pane_ready", &self.pane_ready.is_ready())
            .finish_non_exhaustive()
    }
}

impl SelectionController {
    /// Create controller over a gateway with a fresh surface
    #[must_use]
    pub fn new(gateway: Arc<dyn DataGateway>, config: ControllerConfig) -> Self {
        let markers = ValidationMarkers::new(config.error_marker_ttl());
        Self {
            gateway,
            config,
            surface: Arc::new(Mutex::new(Surface::new())),
            state: Mutex::new(ControllerState::default()),
            tokens: TokenIssuer::new(),
            bindings: Mutex::new(EventBindings::startup()),
            pane_ready: PaneReady::new(),
            markers,
        }
    }

    /// Get configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    // ----- snapshots -----

    /// Current selection
    #[must_use]
    pub fn selection(&self) -> SelectionState {
        self.state.lock().selection
    }

    /// Copy of the rendered document
    #[must_use]
    pub fn surface(&self) -> Surface {
        self.surface.lock().clone()
    }

    /// Rendered document as HTML
    #[must_use]
    pub fn html(&self) -> String {
        self.surface.lock().to_html()
    }

    /// Stores as last rendered
    #[must_use]
    pub fn stores(&self) -> Vec<Store> {
        self.state.lock().stores.clone()
    }

    /// Selected store record, if it is in the rendered list
    #[must_use]
    pub fn selected_store(&self) -> Option<Store> {
        let state = self.state.lock();
        let id = state.selection.store?;
        state.stores.iter().find(|s| s.id == id).cloned()
    }

    /// Products of the selected store, in fetch order
    #[must_use]
    pub fn products(&self) -> Vec<Product> {
        self.state.lock().products.clone()
    }

    /// Products passing the active status filter
    #[must_use]
    pub fn visible_products(&self) -> Vec<Product> {
        let state = self.state.lock();
        state
            .products
            .iter()
            .filter(|p| state.selection.filter.matches(p.status))
            .cloned()
            .collect()
    }

    /// Status counts of the selected store
    #[must_use]
    pub fn status_summary(&self) -> StatusSummary {
        StatusSummary::from_products(&self.state.lock().products)
    }

    /// Attached handlers
    #[must_use]
    pub fn bindings(&self) -> EventBindings {
        self.bindings.lock().clone()
    }

    /// Delete awaiting confirmation
    #[must_use]
    pub fn pending_delete(&self) -> Option<PendingDelete> {
        self.state.lock().pending_delete
    }

    /// Resolves once the details pane has been constructed
    pub async fn wait_for_details_pane(&self) {
        self.pane_ready.wait().await;
    }

    fn require(&self, affordance: Affordance) -> Result<()> {
        self.bindings.lock().require(affordance)
    }

    fn network_failure(&self, operation: &'static str, error: GatewayError) -> ControllerError {
        tracing::warn!(operation, error = %error, "gateway call failed");
        error.into()
    }

    // ----- store list -----

    /// Fetch and render the full store list
    pub async fn load_stores(&self) -> Result<Vec<Store>> {
        let stores = self
            .gateway
            .fetch_all_stores()
            .await
            .map_err(|e| self.network_failure("load stores", e))?;
        self.show_store_list(stores.clone())?;
        tracing::debug!(count = stores.len(), "store list rendered");
        Ok(stores)
    }

    /// Render `stores`, keeping the selection only if it is still listed
    fn show_store_list(&self, stores: Vec<Store>) -> Result<()> {
        let mut state = self.state.lock();
        let mut surface = self.surface.lock();
        surface.render_store_list(&stores)?;

        if let Some(selected) = state.selection.store {
            if stores.iter().any(|s| s.id == selected) {
                surface.mark_active_store(selected);
            } else {
                validate_transition(state.selection.phase(), SelectionEvent::Deselect)?;
                state.deselect(&mut surface)?;
                tracing::info!(store = %selected, "selected store no longer listed");
            }
        }
        state.stores = stores;
        Ok(())
    }

    /// Filter the store list by the search text
    pub async fn search(&self, query: &str) -> Result<Vec<Store>> {
        self.require(Affordance::Search)?;
        validate_transition(self.selection().phase(), SelectionEvent::Search)?;
        self.surface.lock().set_search_text(query)?;

        let stores = filter_stores_from(|| self.gateway.fetch_all_stores(), query)
            .await
            .map_err(|e| self.network_failure("search", e))?;
        self.show_store_list(stores.clone())?;
        tracing::info!(query, matches = stores.len(), "search applied");
        Ok(stores)
    }

    /// Clear the search text and show every store
    pub async fn clear_search(&self) -> Result<Vec<Store>> {
        self.require(Affordance::ClearSearch)?;
        validate_transition(self.selection().phase(), SelectionEvent::ClearSearch)?;
        self.surface.lock().set_search_text("")?;
        self.load_stores().await
    }

    // ----- selection -----

    /// Select a store and show its products
    ///
    /// Overlapping calls are allowed; only the newest one writes state.
    pub async fn select_store(&self, id: StoreId) -> Result<SelectionOutcome> {
        self.require(Affordance::StoreList)?;
        let token = self.tokens.issue();
        tracing::debug!(store = %id, token = token.get(), "selecting store");
        self.surface.lock().mark_active_store(id);

        let stores = match self.gateway.fetch_all_stores().await {
            Ok(stores) => stores,
            Err(e) => return self.selection_failed(token, e),
        };
        if !self.tokens.is_current(token) {
            return Ok(Self::superseded(token));
        }

        let found = stores.iter().find(|s| s.id == id).cloned();
        let Some(store) = found else {
            return self.store_missing(token, id, stores);
        };

        let products = match self.gateway.fetch_products_for_store(&store).await {
            Ok(products) => products,
            Err(e) => return self.selection_failed(token, e),
        };
        self.apply_selection(token, &store, stores, products)
    }

    fn superseded(token: SelectionToken) -> SelectionOutcome {
        tracing::debug!(token = token.get(), "stale selection discarded");
        SelectionOutcome::Superseded
    }

    fn selection_failed(&self, token: SelectionToken, error: GatewayError) -> Result<SelectionOutcome> {
        if !self.tokens.is_current(token) {
            return Ok(Self::superseded(token));
        }
        let state = self.state.lock();
        let mut surface = self.surface.lock();
        match state.selection.store {
            Some(previous) => {
                surface.mark_active_store(previous);
            }
            None => surface.clear_active_store(),
        }
        Err(self.network_failure("select store", error))
    }

    fn store_missing(
        &self,
        token: SelectionToken,
        id: StoreId,
        stores: Vec<Store>,
    ) -> Result<SelectionOutcome> {
        let mut state = self.state.lock();
        if !self.tokens.is_current(token) {
            return Ok(Self::superseded(token));
        }
        let mut surface = self.surface.lock();
        surface.render_store_list(&stores)?;
        state.deselect(&mut surface)?;
        state.stores = stores;
        tracing::info!(store = %id, "selected store not found");
        Ok(SelectionOutcome::StoreMissing(id))
    }

    fn apply_selection(
        &self,
        token: SelectionToken,
        store: &Store,
        stores: Vec<Store>,
        products: Vec<Product>,
    ) -> Result<SelectionOutcome> {
        let mut state = self.state.lock();
        if !self.tokens.is_current(token) {
            return Ok(Self::superseded(token));
        }
        let mut next = state.selection;
        next.select(store.id)?;

        let mut surface = self.surface.lock();
        surface.mark_active_store(store.id);
        if surface.details_pane_exists() {
            surface.render_product_rows(&products)?;
            surface.update_status_summary(&StatusSummary::from_products(&products))?;
            surface.update_contacts(store)?;
            surface.clear_status_highlight()?;
            surface.reveal_details()?;
        } else {
            surface.construct_details_pane(store, &products)?;
            let mut bindings = self.bindings.lock();
            bindings.bind_all(&Affordance::STATUS_FILTERS)?;
            if self.pane_ready.notify() {
                bindings.bind_all(&Affordance::DETAILS)?;
            }
            tracing::debug!("details pane constructed");
        }

        tracing::info!(store = %store.id, products = products.len(), "store selected");
        state.selection = next;
        state.stores = stores;
        state.products = products;
        Ok(SelectionOutcome::Applied(store.id))
    }

    /// Narrow the product table to one status, or show all
    pub fn apply_status_filter(&self, filter: StatusFilter) -> Result<()> {
        let mut state = self.state.lock();
        let mut next = state.selection;
        next.set_filter(filter)?;
        self.require(Affordance::StatusFilter(filter))?;

        let mut surface = self.surface.lock();
        match filter {
            StatusFilter::All => surface.clear_status_highlight()?,
            StatusFilter::Only(status) => surface.highlight_status(status)?,
        }
        surface.show_rows(filter)?;
        state.selection = next;
        tracing::debug!(%filter, "status filter applied");
        Ok(())
    }

    /// Re-fetch the selected store's products, keeping the active filter
    ///
    /// Dropped when a selection starts while the fetch is in flight.
    async fn refresh_products(&self) -> Result<()> {
        let selected = self.state.lock().selection.store;
        let Some(store) = selected else {
            return Ok(());
        };
        let token = self.tokens.current();
        let all = self
            .gateway
            .fetch_all_products()
            .await
            .map_err(|e| self.network_failure("refresh products", e))?;
        let products = storefront_gateway::join_products(store, all);

        let mut state = self.state.lock();
        if !self.tokens.is_current(token) {
            tracing::debug!(token = token.get(), "stale refresh discarded");
            return Ok(());
        }
        if !state.selection.is_selected(store) {
            return Ok(());
        }
        let filter = state.selection.filter;
        let mut surface = self.surface.lock();
        surface.render_product_rows(&products)?;
        surface.update_status_summary(&StatusSummary::from_products(&products))?;
        match filter {
            StatusFilter::All => surface.clear_status_highlight()?,
            StatusFilter::Only(status) => surface.highlight_status(status)?,
        }
        surface.show_rows(filter)?;
        state.products = products;
        Ok(())
    }

    // ----- create flows -----

    /// Open the create-store form
    pub fn open_create_store(&self) -> Result<()> {
        self.require(Affordance::CreateStore)?;
        self.surface.lock().open_modal(Modal::CreateStore)?;
        Ok(())
    }

    /// Validate and submit the create-store form
    ///
    /// Invalid fields are marked for the configured lifetime and the modal
    /// stays open. On success the modal closes, resets, and the store list
    /// is refreshed.
    pub async fn submit_store_form(&self, form: &StoreForm) -> Result<()> {
        {
            let mut surface = self.surface.lock();
            if !surface.modal_is_open(Modal::CreateStore) {
                return Err(ControllerError::ModalClosed(Modal::CreateStore));
            }
            surface.fill_store_form(form)?;
        }

        let draft = form.validate().map_err(|errors| self.reject(errors))?;
        self.gateway
            .create_store(&draft)
            .await
            .map_err(|e| self.network_failure("create store", e))?;
        tracing::info!(name = %draft.name, "store created");

        self.close_and_reset(Modal::CreateStore)?;
        self.load_stores().await?;
        Ok(())
    }

    /// Open the create-product form for the selected store
    pub fn open_create_product(&self) -> Result<()> {
        self.require(Affordance::CreateProduct)?;
        if self.selection().store.is_none() {
            return Err(ControllerError::NoStoreSelected);
        }
        self.surface.lock().open_modal(Modal::CreateProduct)?;
        Ok(())
    }

    /// Validate and submit the create-product form
    ///
    /// The product is stamped with the selected store's id. On success the
    /// modal closes, resets, and the product table is refreshed.
    pub async fn submit_product_form(&self, form: &ProductForm) -> Result<()> {
        let store = self
            .selection()
            .store
            .ok_or(ControllerError::NoStoreSelected)?;
        {
            let mut surface = self.surface.lock();
            if !surface.modal_is_open(Modal::CreateProduct) {
                return Err(ControllerError::ModalClosed(Modal::CreateProduct));
            }
            surface.fill_product_form(form)?;
        }

        let draft = form.validate(store).map_err(|errors| self.reject(errors))?;
        self.gateway
            .create_product(&draft)
            .await
            .map_err(|e| self.network_failure("create product", e))?;
        tracing::info!(store = %store, name = %draft.name, "product created");

        self.close_and_reset(Modal::CreateProduct)?;
        self.refresh_products().await
    }

    fn reject(&self, errors: storefront_model::ValidationErrors) -> ControllerError {
        let fields = errors.fields();
        tracing::info!(?fields, "form rejected");
        self.markers.mark(&self.surface, &fields);
        errors.into()
    }

    fn close_and_reset(&self, modal: Modal) -> Result<()> {
        let mut surface = self.surface.lock();
        surface.close_modal(modal)?;
        surface.reset_form(modal)?;
        Ok(())
    }

    // ----- delete flows -----

    /// Ask to delete the selected store
    pub fn request_store_delete(&self) -> Result<()> {
        self.require(Affordance::DeleteStore)?;
        let mut state = self.state.lock();
        let store = state.selection.store.ok_or(ControllerError::NoStoreSelected)?;
        self.surface.lock().open_modal(Modal::ConfirmStoreDelete)?;
        state.pending_delete = Some(PendingDelete::Store(store));
        Ok(())
    }

    /// Ask to delete a product row of the selected store
    pub fn request_product_delete(&self, id: ProductId) -> Result<()> {
        self.require(Affordance::DeleteProduct)?;
        let mut state = self.state.lock();
        if !state.products.iter().any(|p| p.id == id) {
            return Err(ControllerError::UnknownProduct(id));
        }
        self.surface.lock().open_modal(Modal::ConfirmProductDelete)?;
        state.pending_delete = Some(PendingDelete::Product(id));
        Ok(())
    }

    /// Carry out the pending delete
    ///
    /// On failure the confirmation stays open and the pending delete is kept.
    /// A failed refresh after a successful delete is logged, not returned.
    pub async fn confirm_delete(&self) -> Result<PendingDelete> {
        let pending = self
            .state
            .lock()
            .pending_delete
            .take()
            .ok_or(ControllerError::NoPendingDelete)?;

        let result = match pending {
            PendingDelete::Store(id) => self.gateway.delete_store(id).await,
            PendingDelete::Product(id) => self.gateway.delete_product(id).await,
        };
        if let Err(e) = result {
            self.state.lock().pending_delete.get_or_insert(pending);
            return Err(self.network_failure("delete", e));
        }

        self.surface.lock().close_modal(pending.modal())?;
        match pending {
            PendingDelete::Store(id) => {
                {
                    let mut state = self.state.lock();
                    if state.selection.is_selected(id) {
                        let mut surface = self.surface.lock();
                        state.deselect(&mut surface)?;
                    }
                }
                tracing::info!(store = %id, "store deleted");
            }
            PendingDelete::Product(id) => {
                tracing::info!(product = %id, "product deleted");
            }
        }

        let refreshed = match pending {
            PendingDelete::Store(_) => self.load_stores().await.map(drop),
            PendingDelete::Product(_) => self.refresh_products().await,
        };
        if let Err(e) = refreshed {
            tracing::warn!(error = %e, "delete applied but the refresh failed");
        }
        Ok(pending)
    }

    /// Dismiss the confirmation without deleting
    pub fn cancel_delete(&self) -> Result<PendingDelete> {
        let mut state = self.state.lock();
        let pending = state
            .pending_delete
            .take()
            .ok_or(ControllerError::NoPendingDelete)?;
        self.surface.lock().close_modal(pending.modal())?;
        Ok(pending)
    }

    /// Click outside a modal window: close it, resetting any form
    pub fn dismiss_modal(&self, modal: Modal) -> Result<()> {
        self.require(Affordance::DismissModal(modal))?;
        let mut state = self.state.lock();
        let mut surface = self.surface.lock();
        surface.close_modal(modal)?;
        surface.reset_form(modal)?;
        if state.pending_delete.is_some_and(|p| p.modal() == modal) {
            state.pending_delete = None;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_gateway::InMemoryGateway;
    use storefront_model::ProductStatus;

    fn controller() -> SelectionController {
        SelectionController::new(Arc::new(InMemoryGateway::seeded()), ControllerConfig::new())
    }

    #[test]
    fn pending_delete_maps_to_modal() {
        assert_eq!(PendingDelete::Store(StoreId(1)).modal(), Modal::ConfirmStoreDelete);
        assert_eq!(
            PendingDelete::Product(ProductId(1)).modal(),
            Modal::ConfirmProductDelete
        );
    }

    #[test]
    fn status_filter_needs_selection() {
        let controller = controller();
        let err = controller
            .apply_status_filter(StatusFilter::Only(ProductStatus::Ok))
            .unwrap_err();
        assert!(matches!(err, ControllerError::IllegalTransition { .. }));
    }

    #[test]
    fn details_affordances_start_unbound() {
        let controller = controller();
        assert!(matches!(
            controller.request_store_delete(),
            Err(ControllerError::NotBound(Affordance::DeleteStore))
        ));
        assert!(matches!(
            controller.open_create_product(),
            Err(ControllerError::NotBound(Affordance::CreateProduct))
        ));
    }

    #[tokio::test]
    async fn first_selection_constructs_pane() {
        let controller = controller();
        controller.load_stores().await.unwrap();

        let outcome = controller.select_store(StoreId(1)).await.unwrap();

        assert_eq!(outcome, SelectionOutcome::Applied(StoreId(1)));
        assert!(controller.surface().details_pane_exists());
        assert!(controller.bindings().is_bound(Affordance::DeleteStore));
        controller.wait_for_details_pane().await;
    }

    #[tokio::test]
    async fn submit_needs_open_modal() {
        let controller = controller();
        let err = controller
            .submit_store_form(&StoreForm::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ControllerError::ModalClosed(Modal::CreateStore)));
    }
}
