#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use bytes::Bytes;
use results_core::{
    ActionKind, DropdownState, FilterState, PaginationData, PaginationState, ResultPayload,
    ViewState, VisualState,
};
use results_engine::{
    Collaborators, FailureKind, FetchError, FetchMetadata, FetchOutput, Fetcher, FilterControls,
    LoadingIndicator, Navigation, PaginationControls, ResultsView, WeakPaginationEvents,
};

#[derive(Clone)]
struct Route {
    delay: Duration,
    result: Result<String, FetchError>,
}

/// Fetcher answering from a per-URL script after a per-URL delay.
#[derive(Default)]
pub struct ScriptedFetcher {
    routes: Mutex<HashMap<String, Route>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedFetcher {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn respond(&self, url: &str, delay: Duration, body: serde_json::Value) {
        self.route(url, delay, Ok(body.to_string()));
    }

    pub fn respond_raw(&self, url: &str, delay: Duration, body: &str) {
        self.route(url, delay, Ok(body.to_string()));
    }

    pub fn fail(&self, url: &str, delay: Duration, kind: FailureKind) {
        self.route(url, delay, Err(FetchError::new(kind, "scripted failure")));
    }

    fn route(&self, url: &str, delay: Duration, result: Result<String, FetchError>) {
        self.routes
            .lock()
            .unwrap()
            .insert(url.to_string(), Route { delay, result });
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl Fetcher for ScriptedFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchOutput, FetchError> {
        self.calls.lock().unwrap().push(url.to_string());
        let route = self.routes.lock().unwrap().get(url).cloned();
        let Some(route) = route else {
            return Err(FetchError::new(FailureKind::HttpStatus(404), "no route"));
        };
        tokio::time::sleep(route.delay).await;
        let body = route.result?;
        Ok(FetchOutput {
            metadata: FetchMetadata {
                url: url.to_string(),
                status: 200,
                content_type: Some("application/json".to_string()),
                byte_len: body.len() as u64,
            },
            body: Bytes::from(body),
        })
    }
}

pub fn payload_json(title: &str, total_pages: u32) -> serde_json::Value {
    serde_json::json!({
        "title": title,
        "results": [{"id": 1}, {"id": 2}],
        "totalPages": total_pages,
    })
}

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    PushUrl(String),
    ReplaceUrl(String),
    SelectedOptions(FilterState),
    DisabledOptions(Vec<DropdownState>),
    ReturnFocus,
    ResetPagination,
    SetPagination(PaginationState),
    Show(VisualState, bool),
    Render { title: Option<String>, page: u32, total: u32 },
    ScrollToTop,
    FocusFirstResult,
    LoadingStart,
    LoadingStop,
}

/// Records every collaborator call. On `reset` it reports page one back the way
/// the pagination UI does.
#[derive(Default)]
pub struct Recorder {
    calls: Mutex<Vec<Call>>,
    pagination_events: Mutex<Option<WeakPaginationEvents>>,
    history: Mutex<Vec<ViewState>>,
}

impl Recorder {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn confirm_resets_with(&self, events: WeakPaginationEvents) {
        *self.pagination_events.lock().unwrap() = Some(events);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn renders(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|call| matches!(call, Call::Render { .. }))
            .collect()
    }

    pub fn pushed_states(&self) -> Vec<ViewState> {
        self.history.lock().unwrap().clone()
    }

    pub fn collaborators(self: &Arc<Self>) -> Collaborators {
        Collaborators {
            navigation: self.clone(),
            filters: self.clone(),
            pagination: self.clone(),
            view: self.clone(),
            loading: self.clone(),
        }
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

impl Navigation for Recorder {
    fn set_page_url(&self, url: &str, state: &ViewState) {
        self.history.lock().unwrap().push(state.clone());
        self.record(Call::PushUrl(url.to_string()));
    }

    fn replace_page_url(&self, url: &str, _state: &ViewState) {
        self.record(Call::ReplaceUrl(url.to_string()));
    }
}

impl FilterControls for Recorder {
    fn update_selected_options(&self, filter: &FilterState) {
        self.record(Call::SelectedOptions(filter.clone()));
    }

    fn update_disabled_options(&self, dropdowns: &[DropdownState]) {
        self.record(Call::DisabledOptions(dropdowns.to_vec()));
    }

    fn return_focus(&self) {
        self.record(Call::ReturnFocus);
    }
}

impl PaginationControls for Recorder {
    fn reset(&self) {
        self.record(Call::ResetPagination);
        if let Some(events) = self.pagination_events.lock().unwrap().as_ref() {
            let _ = events.emit(PaginationData::new(1, 1).with_action(ActionKind::Reset));
        }
    }

    fn set_pagination_state(&self, pagination: &PaginationState) {
        self.record(Call::SetPagination(pagination.clone()));
    }
}

impl ResultsView for Recorder {
    fn show(&self, state: VisualState, visible: bool) {
        self.record(Call::Show(state, visible));
    }

    fn render(&self, payload: &ResultPayload, pagination: &PaginationState) {
        self.record(Call::Render {
            title: payload.title.clone(),
            page: pagination.data.current,
            total: pagination.data.total,
        });
    }

    fn scroll_to_top(&self) {
        self.record(Call::ScrollToTop);
    }

    fn focus_first_result(&self) {
        self.record(Call::FocusFirstResult);
    }
}

impl LoadingIndicator for Recorder {
    fn start(&self) {
        self.record(Call::LoadingStart);
    }

    fn stop(&self) {
        self.record(Call::LoadingStop);
    }
}
