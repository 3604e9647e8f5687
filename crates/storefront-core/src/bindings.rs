//! Event bindings and pane readiness
//!
//! A handler is attached to an affordance at most once. Detail handlers
//! (create product, delete store, delete product) are attached when the
//! details pane first signals ready.

use crate::error::ControllerError;
use indexmap::IndexMap;
use storefront_model::StatusFilter;
use storefront_surface::Modal;
use tokio::sync::watch;

/// Something the user can act on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Affordance {
    /// Store list entries
    StoreList,
    /// Search button
    Search,
    /// Clear-search button
    ClearSearch,
    /// Create-store button
    CreateStore,
    /// Status filter affordance
    StatusFilter(StatusFilter),
    /// Create-product button in the details footer
    CreateProduct,
    /// Delete-store button in the details footer
    DeleteStore,
    /// Row delete cross
    DeleteProduct,
    /// Click outside a modal window
    DismissModal(Modal),
}

impl Affordance {
    /// Bound when the controller starts
    pub const STARTUP: [Affordance; 8] = [
        Self::StoreList,
        Self::Search,
        Self::ClearSearch,
        Self::CreateStore,
        Self::DismissModal(Modal::CreateStore),
        Self::DismissModal(Modal::CreateProduct),
        Self::DismissModal(Modal::ConfirmStoreDelete),
        Self::DismissModal(Modal::ConfirmProductDelete),
    ];

    /// Bound when the details pane is constructed
    pub const STATUS_FILTERS: [Affordance; 4] = [
        Self::StatusFilter(StatusFilter::All),
        Self::StatusFilter(StatusFilter::Only(storefront_model::ProductStatus::Ok)),
        Self::StatusFilter(StatusFilter::Only(storefront_model::ProductStatus::Storage)),
        Self::StatusFilter(StatusFilter::Only(storefront_model::ProductStatus::OutOfStock)),
    ];

    /// Bound once the details pane is ready
    pub const DETAILS: [Affordance; 3] = [Self::CreateProduct, Self::DeleteStore, Self::DeleteProduct];
}

/// Record of attached handlers
#[derive(Debug, Clone, Default)]
pub struct EventBindings {
    attached: IndexMap<Affordance, usize>,
}

impl EventBindings {
    /// Nothing bound yet
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bindings with the startup affordances attached
    #[must_use]
    pub fn startup() -> Self {
        Self {
            attached: Affordance::STARTUP.iter().map(|a| (*a, 1)).collect(),
        }
    }

    /// Attach a handler
    ///
    /// # Errors
    /// - `ControllerError::AlreadyBound` if the affordance has one
    pub fn bind(&mut self, affordance: Affordance) -> Result<(), ControllerError> {
        let count = self.attached.entry(affordance).or_insert(0);
        if *count > 0 {
            return Err(ControllerError::AlreadyBound(affordance));
        }
        *count += 1;
        tracing::trace!(?affordance, "handler bound");
        Ok(())
    }

    /// Attach handlers to every affordance in `affordances`
    pub fn bind_all(&mut self, affordances: &[Affordance]) -> Result<(), ControllerError> {
        affordances.iter().try_for_each(|a| self.bind(*a))
    }

    /// Whether the affordance has a handler
    #[inline]
    #[must_use]
    pub fn is_bound(&self, affordance: Affordance) -> bool {
        self.bind_count(affordance) > 0
    }

    /// Number of attached handlers (0 or 1)
    #[inline]
    #[must_use]
    pub fn bind_count(&self, affordance: Affordance) -> usize {
        self.attached.get(&affordance).copied().unwrap_or(0)
    }

    /// Fail unless the affordance has a handler
    pub fn require(&self, affordance: Affordance) -> Result<(), ControllerError> {
        if self.is_bound(affordance) {
            Ok(())
        } else {
            Err(ControllerError::NotBound(affordance))
        }
    }

    /// Bound affordances in binding order
    #[must_use]
    pub fn bound(&self) -> Vec<Affordance> {
        self.attached
            .iter()
            .filter(|(_, count)| **count > 0)
            .map(|(a, _)| *a)
            .collect()
    }
}

/// One-shot notification that the details pane exists
#[derive(Debug)]
pub struct PaneReady {
    sender: watch::Sender<bool>,
}

impl Default for PaneReady {
    fn default() -> Self {
        Self::new()
    }
}

impl PaneReady {
    /// Not yet signalled
    #[must_use]
    pub fn new() -> Self {
        let (sender, _) = watch::channel(false);
        Self { sender }
    }

    /// Signal readiness; returns `true` only for the first call
    pub fn notify(&self) -> bool {
        self.sender.send_if_modified(|ready| {
            if *ready {
                false
            } else {
                *ready = true;
                true
            }
        })
    }

    /// Whether readiness was signalled
    #[must_use]
    pub fn is_ready(&self) -> bool {
        *self.sender.borrow()
    }

    /// Wait until readiness is signalled
    pub async fn wait(&self) {
        let mut receiver = self.sender.subscribe();
        // The sender lives as long as `self`, so this cannot fail while borrowed
        let _ = receiver.wait_for(|ready| *ready).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn bind_is_exactly_once() {
        let mut bindings = EventBindings::new();
        bindings.bind(Affordance::DeleteStore).unwrap();
        let err = bindings.bind(Affordance::DeleteStore).unwrap_err();
        assert!(matches!(err, ControllerError::AlreadyBound(Affordance::DeleteStore)));
        assert_eq!(bindings.bind_count(Affordance::DeleteStore), 1);
    }

    #[test]
    fn require_reports_unbound() {
        let bindings = EventBindings::new();
        assert!(matches!(
            bindings.require(Affordance::CreateProduct),
            Err(ControllerError::NotBound(Affordance::CreateProduct))
        ));
    }

    #[test]
    fn startup_set_binds_cleanly() {
        let mut bindings = EventBindings::new();
        bindings.bind_all(&Affordance::STARTUP).unwrap();
        assert_eq!(bindings.bound(), EventBindings::startup().bound());
        assert!(!bindings.is_bound(Affordance::DeleteStore));
    }

    #[test]
    fn pane_ready_notifies_once() {
        let ready = PaneReady::new();
        assert!(!ready.is_ready());
        assert!(ready.notify());
        assert!(!ready.notify());
        assert!(ready.is_ready());
    }

    #[tokio::test]
    async fn waiter_wakes_on_notify() {
        let ready = Arc::new(PaneReady::new());
        let waiter = {
            let ready = Arc::clone(&ready);
            tokio::spawn(async move { ready.wait().await })
        };
        tokio::task::yield_now().await;
        ready.notify();
        waiter.await.unwrap();
    }

    #[tokio::test]
    async fn wait_after_notify_returns_immediately() {
        let ready = PaneReady::new();
        ready.notify();
        ready.wait().await;
    }
}
