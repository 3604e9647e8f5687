//! Selection state machine
//!
//! Three phases: nothing selected, a store selected with every status shown,
//! and a store selected with the table narrowed to one status. Status
//! filtering is only meaningful once a store is selected.

use crate::error::ControllerError;
use serde::{Deserialize, Serialize};
use storefront_model::{StatusFilter, StoreId};

/// Coarse phase of the selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SelectionPhase {
    /// Initial phase, details pane empty or absent
    NoStoreSelected,
    /// Store selected, filter `all`
    AllStatuses,
    /// Store selected, one status highlighted
    StatusFiltered,
}

/// User-driven events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SelectionEvent {
    /// A store entry was chosen
    SelectStore,
    /// A specific status affordance was chosen
    SelectStatus,
    /// The `all` affordance was chosen
    SelectAll,
    /// Search submitted
    Search,
    /// Search cleared
    ClearSearch,
    /// The selected store went away (deleted or filtered out)
    Deselect,
}

/// Validates an event against the current phase, returning the next phase.
pub fn validate_transition(
    from: SelectionPhase,
    event: SelectionEvent,
) -> Result<SelectionPhase, ControllerError> {
    if !allowed_events(from).contains(&event) {
        return Err(ControllerError::IllegalTransition { phase: from, event });
    }
    use SelectionEvent::*;
    use SelectionPhase::*;
    Ok(match event {
        SelectStore | SelectAll => AllStatuses,
        SelectStatus => StatusFiltered,
        Search | ClearSearch => from,
        Deselect => NoStoreSelected,
    })
}

/// Events accepted in phase `from`
pub fn allowed_events(from: SelectionPhase) -> Vec<SelectionEvent> {
    use SelectionEvent::*;
    use SelectionPhase::*;
    match from {
        NoStoreSelected => vec![SelectStore, Search, ClearSearch, Deselect],
        AllStatuses | StatusFiltered => {
            vec![SelectStore, SelectStatus, SelectAll, Search, ClearSearch, Deselect]
        }
    }
}

/// Explicit selection owned by the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SelectionState {
    /// Selected store, if any
    pub store: Option<StoreId>,
    /// Active status filter; `All` whenever no store is selected
    pub filter: StatusFilter,
}

impl SelectionState {
    /// Current phase
    #[must_use]
    pub fn phase(&self) -> SelectionPhase {
        match (self.store, self.filter) {
            (None, _) => SelectionPhase::NoStoreSelected,
            (Some(_), StatusFilter::All) => SelectionPhase::AllStatuses,
            (Some(_), StatusFilter::Only(_)) => SelectionPhase::StatusFiltered,
        }
    }

    /// Select a store, resetting the filter
    pub fn select(&mut self, store: StoreId) -> Result<(), ControllerError> {
        validate_transition(self.phase(), SelectionEvent::SelectStore)?;
        self.store = Some(store);
        self.filter = StatusFilter::All;
        Ok(())
    }

    /// Change the status filter of the selected store
    pub fn set_filter(&mut self, filter: StatusFilter) -> Result<(), ControllerError> {
        let event = match filter {
            StatusFilter::All => SelectionEvent::SelectAll,
            StatusFilter::Only(_) => SelectionEvent::SelectStatus,
        };
        validate_transition(self.phase(), event)?;
        self.filter = filter;
        Ok(())
    }

    /// Drop the selection
    pub fn deselect(&mut self) {
        self.store = None;
        self.filter = StatusFilter::All;
    }

    /// Whether `store` is the selected one
    #[inline]
    #[must_use]
    pub fn is_selected(&self, store: StoreId) -> bool {
        self.store == Some(store)
    }
}
