//! Contracts of the UI-side collaborators the controller drives.
//!
//! The controller only holds references to these; DOM work, templating, focus
//! management and animation all live behind them.

use std::sync::Arc;

use results_core::{
    DropdownState, FilterState, PaginationState, ResultPayload, ViewState, VisualState,
};

/// Address bar / history.
pub trait Navigation: Send + Sync {
    /// Pushes a new history entry.
    fn set_page_url(&self, url: &str, state: &ViewState);
    /// Replaces the current history entry; used once at start-up.
    fn replace_page_url(&self, url: &str, state: &ViewState);
}

pub trait FilterControls: Send + Sync {
    fn update_selected_options(&self, filter: &FilterState);
    fn update_disabled_options(&self, dropdowns: &[DropdownState]);
    fn return_focus(&self);
}

/// After `reset` the pagination UI must report page one back as a `RESET` change.
pub trait PaginationControls: Send + Sync {
    fn reset(&self);
    fn set_pagination_state(&self, pagination: &PaginationState);
}

/// Shared display capability of the results area.
pub trait ResultsView: Send + Sync {
    fn show(&self, state: VisualState, visible: bool);
    fn render(&self, payload: &ResultPayload, pagination: &PaginationState);
    fn scroll_to_top(&self);
    fn focus_first_result(&self);
}

pub trait LoadingIndicator: Send + Sync {
    fn start(&self);
    fn stop(&self);
}

#[derive(Clone)]
pub struct Collaborators {
    pub navigation: Arc<dyn Navigation>,
    pub filters: Arc<dyn FilterControls>,
    pub pagination: Arc<dyn PaginationControls>,
    pub view: Arc<dyn ResultsView>,
    pub loading: Arc<dyn LoadingIndicator>,
}
