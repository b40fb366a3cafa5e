use crate::{
    ActionKind, FilterSelection, FilterState, PaginationData, PaginationState, ResultPayload,
    ViewState,
};

/// Marker returned by a filter change. The reset it stands for is only confirmed by a
/// `RESET` pagination change coming back from the pagination collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingReset {
    generation: u64,
}

impl PendingReset {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchSignal {
    FetchNow,
    /// Pagination was applied but still carries the page of the previous filter.
    AwaitingReset(PendingReset),
}

/// Holds the [`ViewState`] and enforces the filter -> pagination reset rule.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StateStore {
    view: ViewState,
    pending_reset: Option<PendingReset>,
    resets_issued: u64,
}

impl StateStore {
    pub fn new(initial: ViewState) -> Self {
        Self {
            view: initial,
            pending_reset: None,
            resets_issued: 0,
        }
    }

    pub fn view_state(&self) -> &ViewState {
        &self.view
    }

    pub fn pending_reset(&self) -> Option<PendingReset> {
        self.pending_reset
    }

    /// Never fetches: the page count of the old filter is meaningless for the new one.
    pub fn apply_filter_change(&mut self, selection: FilterSelection) -> PendingReset {
        self.view.filter = FilterState {
            is_initial: false,
            data: selection,
        };
        self.resets_issued += 1;
        let pending = PendingReset {
            generation: self.resets_issued,
        };
        self.pending_reset = Some(pending);
        pending
    }

    pub fn apply_pagination_change(&mut self, data: PaginationData) -> FetchSignal {
        let confirms_reset = data.last_action == Some(ActionKind::Reset);
        self.view.pagination = PaginationState {
            is_initial: false,
            data: data.clamped(),
        };
        match self.pending_reset {
            Some(pending) if !confirms_reset => FetchSignal::AwaitingReset(pending),
            _ => {
                self.pending_reset = None;
                FetchSignal::FetchNow
            }
        }
    }

    /// Only the page count follows the data; the position stays where the pagination UI put it.
    pub fn merge_result(&mut self, payload: &ResultPayload) {
        self.view.pagination.data.total = payload.total_pages;
    }

    pub fn replace(&mut self, state: ViewState) {
        self.view = state;
        self.pending_reset = None;
    }
}
