//! Console stand-ins for the page collaborators: history is an in-memory stack,
//! rendering prints a summary to stdout.

use std::sync::{Arc, Mutex, PoisonError};

use results_core::{
    DropdownState, FilterState, PaginationData, PaginationState, ResultPayload, ViewState,
    VisualState,
};
use results_engine::{
    Collaborators, ControllerClosed, FilterControls, LoadingIndicator, Navigation,
    PaginationControls, ResultsView, WeakPaginationEvents,
};
use results_logging::results_warn;

use crate::commands::{describe_selection, move_page, PageMove};

/// History stack shared between the controller side and the `back` command.
#[derive(Default)]
pub struct ConsoleHistory {
    entries: Mutex<Vec<(String, ViewState)>>,
}

impl ConsoleHistory {
    /// Drops the current entry and returns the one before it.
    pub fn go_back(&self) -> Option<ViewState> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        if entries.len() < 2 {
            return None;
        }
        entries.pop();
        entries.last().map(|(url, state)| {
            println!("<- {url}");
            state.clone()
        })
    }
}

impl Navigation for ConsoleHistory {
    fn set_page_url(&self, url: &str, state: &ViewState) {
        println!("-> {url}");
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((url.to_string(), state.clone()));
    }

    fn replace_page_url(&self, url: &str, state: &ViewState) {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.pop();
        entries.push((url.to_string(), state.clone()));
    }
}

/// Position of the pagination widget. Moves apply to it at once, so back-to-back
/// commands step from the page last sent rather than the last one rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pager {
    data: PaginationData,
}

impl Pager {
    pub fn new(initial: PaginationData) -> Self {
        Self { data: initial }
    }

    pub fn advance(&mut self, page_move: &PageMove) -> PaginationData {
        self.data = move_page(&self.data, page_move).clamped();
        self.data.clone()
    }

    pub fn sync(&mut self, pagination: &PaginationState) {
        self.data = pagination.data.clone();
    }
}

/// Pagination, filter, view and loading UI printed to the console.
pub struct ConsoleView {
    pagination: WeakPaginationEvents,
    pager: Mutex<Pager>,
}

impl ConsoleView {
    pub fn new(pagination: WeakPaginationEvents, initial: &PaginationData) -> Self {
        Self {
            pagination,
            pager: Mutex::new(Pager::new(initial.clone())),
        }
    }

    /// Moves the widget and reports the change to the controller.
    pub fn move_page(&self, page_move: &PageMove) -> Result<(), ControllerClosed> {
        let data = self
            .pager
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .advance(page_move);
        self.pagination.emit(data)
    }
}

impl FilterControls for ConsoleView {
    fn update_selected_options(&self, filter: &FilterState) {
        println!("filters: {}", describe_selection(&filter.data));
    }

    fn update_disabled_options(&self, dropdowns: &[DropdownState]) {
        for dropdown in dropdowns.iter().filter(|d| !d.disabled_options.is_empty()) {
            println!(
                "  {} unavailable: {}",
                dropdown.id,
                dropdown.disabled_options.join(", ")
            );
        }
    }

    fn return_focus(&self) {}
}

impl PaginationControls for ConsoleView {
    fn reset(&self) {
        if let Err(err) = self.move_page(&PageMove::Reset) {
            results_warn!("pagination reset not delivered: {}", err);
        }
    }

    fn set_pagination_state(&self, pagination: &PaginationState) {
        self.pager
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .sync(pagination);
    }
}

impl ResultsView for ConsoleView {
    fn show(&self, state: VisualState, visible: bool) {
        if state == VisualState::Loading && visible {
            println!("loading...");
        }
    }

    fn render(&self, payload: &ResultPayload, pagination: &PaginationState) {
        println!(
            "{} | {} results | page {}/{}",
            payload.title.as_deref().unwrap_or("(untitled)"),
            payload.results.len(),
            pagination.data.current,
            pagination.data.total
        );
        for result in &payload.results {
            println!("  {result}");
        }
    }

    fn scroll_to_top(&self) {}

    fn focus_first_result(&self) {}
}

impl LoadingIndicator for ConsoleView {
    fn start(&self) {}

    fn stop(&self) {}
}

pub fn collaborators(history: Arc<ConsoleHistory>, view: Arc<ConsoleView>) -> Collaborators {
    Collaborators {
        navigation: history,
        filters: view.clone(),
        pagination: view.clone(),
        view: view.clone(),
        loading: view,
    }
}
