//! Results engine: network fetch, request orchestration and the content update controller.
mod collaborators;
mod config;
mod controller;
mod debounce;
mod fetch;
mod fixtures;
mod request;
mod types;

pub use collaborators::{
    Collaborators, FilterControls, LoadingIndicator, Navigation, PaginationControls, ResultsView,
};
pub use config::{ResultsConfig, CONTENT_REQUEST_TIMEOUT, FIXTURE_DELAY, RENDER_DELAY};
pub use controller::{
    controller_channel, ContentUpdateController, ControllerClosed, ControllerHandle,
    ControllerInbox, FilterEvents, HistoryEvents, PaginationEvents, WeakPaginationEvents,
};
pub use debounce::DebounceTimer;
pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher};
pub use fixtures::{FixtureBucket, FixtureError, FixtureSet, DEFAULT_BUCKET};
pub use request::{RequestCallbacks, RequestId, RequestOrchestrator};
pub use types::{FailureKind, FetchError, FetchMetadata, FetchOutput};
