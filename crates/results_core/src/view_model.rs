use crate::{CycleId, Phase, ViewState};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub phase: Phase,
    pub loading: bool,
    pub rendering: bool,
    pub cycle: CycleId,
    pub awaiting_reset: bool,
    pub view_state: ViewState,
}
