//! Results core: view state, URL codec and the pure content-update state machine.
mod effect;
mod model;
mod msg;
mod payload;
mod state;
mod store;
mod update;
pub mod url_codec;
mod view_model;

pub use effect::{Effect, FocusTarget, VisualState};
pub use model::{
    ActionKind, FilterSelection, FilterState, PaginationData, PaginationState, ViewState,
    FIRST_PAGE, NO_FILTER,
};
pub use msg::Msg;
pub use payload::{DropdownState, ResultPayload};
pub use state::{AppState, CycleId, Phase};
pub use store::{FetchSignal, PendingReset, StateStore};
pub use update::update;
pub use url_codec::UrlSegment;
pub use view_model::AppViewModel;
