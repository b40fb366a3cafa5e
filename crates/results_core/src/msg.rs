use crate::{CycleId, FilterSelection, PaginationData, ResultPayload, ViewState};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// Filter UI reported a new selection.
    FilterChanged(FilterSelection),
    /// Pagination UI reported a new position (including its reset confirmation).
    PaginationChanged(PaginationData),
    /// Back/forward navigation handed back a pushed state; `None` reloads the current one.
    HistoryNavigated(Option<ViewState>),
    /// Request for `cycle` produced a payload.
    ContentLoaded {
        cycle: CycleId,
        payload: ResultPayload,
    },
    /// Request for `cycle` failed (network, timeout or parse).
    ContentFailed { cycle: CycleId, reason: String },
    /// Render timer for `cycle` elapsed.
    RenderDue { cycle: CycleId },
    NoOp,
}
