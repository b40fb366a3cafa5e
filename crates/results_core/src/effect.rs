use crate::{CycleId, DropdownState, FilterState, PaginationState, ResultPayload, ViewState};

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Ask the pagination collaborator to go back to page one and report it.
    ResetPagination,
    /// Push a new history entry; `path` is relative to the listing base path.
    SetPageUrl { path: String, state: ViewState },
    Show { state: VisualState, visible: bool },
    StartLoadingIndicator,
    StopLoadingIndicator,
    RequestContent { cycle: CycleId, path: String },
    /// (Re)arm the render timer; a pending render of the same controller is replaced.
    ScheduleRender { cycle: CycleId },
    Render {
        payload: ResultPayload,
        pagination: PaginationState,
    },
    UpdateSelectedOptions(FilterState),
    UpdateDisabledOptions(Vec<DropdownState>),
    SetPaginationState(PaginationState),
    ScrollToTop,
    Focus(FocusTarget),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisualState {
    Loading,
    Rendering,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusTarget {
    FirstResult,
    FilterControl,
}
