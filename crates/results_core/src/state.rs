use crate::view_model::AppViewModel;
use crate::{ResultPayload, StateStore, ViewState};

pub type CycleId = u64;

/// Content-update cycle: `Idle -> Loading -> (Rendering -> Idle) | Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Rendering,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    store: StateStore,
    phase: Phase,
    cycle: CycleId,
    pending_payload: Option<ResultPayload>,
    dirty: bool,
}

impl AppState {
    pub fn new(initial: ViewState) -> Self {
        Self {
            store: StateStore::new(initial),
            ..Self::default()
        }
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            phase: self.phase,
            loading: self.is_loading(),
            rendering: self.is_rendering(),
            cycle: self.cycle,
            awaiting_reset: self.store.pending_reset().is_some(),
            view_state: self.store.view_state().clone(),
        }
    }

    pub fn view_state(&self) -> &ViewState {
        self.store.view_state()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn cycle(&self) -> CycleId {
        self.cycle
    }

    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Loading
    }

    pub fn is_rendering(&self) -> bool {
        self.phase == Phase::Rendering
    }

    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn store_mut(&mut self) -> &mut StateStore {
        &mut self.store
    }

    /// Starts a fresh cycle; anything still pending for the previous one is dropped.
    pub(crate) fn begin_cycle(&mut self) -> CycleId {
        self.cycle += 1;
        self.phase = Phase::Loading;
        self.pending_payload = None;
        self.dirty = true;
        self.cycle
    }

    pub(crate) fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
        self.dirty = true;
    }

    /// Most recent payload wins.
    pub(crate) fn stash_payload(&mut self, payload: ResultPayload) {
        self.pending_payload = Some(payload);
    }

    pub(crate) fn take_payload(&mut self) -> Option<ResultPayload> {
        self.pending_payload.take()
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}
