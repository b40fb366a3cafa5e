//! Content update controller: executes core effects against collaborators, the
//! request orchestrator and the render timer, one message at a time.

use std::sync::Arc;

use results_core::{
    update, url_codec, AppState, AppViewModel, Effect, FilterSelection, FocusTarget, Msg,
    PaginationData, ResultPayload, ViewState,
};
use results_logging::{results_debug, results_info, results_warn};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use crate::collaborators::Collaborators;
use crate::config::ResultsConfig;
use crate::debounce::DebounceTimer;
use crate::fetch::Fetcher;
use crate::request::{RequestCallbacks, RequestOrchestrator};
use crate::FetchError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("content update controller has stopped")]
pub struct ControllerClosed;

#[derive(Debug)]
enum ControllerEvent {
    Filter(FilterSelection),
    Pagination(PaginationData),
    History(Option<ViewState>),
    Shutdown,
}

/// Creates the event channel shared by a controller and its handles.
pub fn controller_channel() -> (ControllerHandle, ControllerInbox) {
    let (tx, rx) = mpsc::unbounded_channel();
    let (view_tx, view_rx) = watch::channel(AppViewModel::default());
    (
        ControllerHandle { tx, view_rx },
        ControllerInbox { rx, view_tx },
    )
}

/// Receiving side of [`controller_channel`], consumed by [`ContentUpdateController::new`].
pub struct ControllerInbox {
    rx: mpsc::UnboundedReceiver<ControllerEvent>,
    view_tx: watch::Sender<AppViewModel>,
}

/// Entry point for UI collaborators. Dropping every handle and event sender
/// unsubscribes them and lets the controller stop. Collaborators owned by the
/// controller must hold a [`WeakPaginationEvents`] instead, or they keep it alive.
#[derive(Clone)]
pub struct ControllerHandle {
    tx: mpsc::UnboundedSender<ControllerEvent>,
    view_rx: watch::Receiver<AppViewModel>,
}

impl ControllerHandle {
    pub fn filter_events(&self) -> FilterEvents {
        FilterEvents {
            tx: self.tx.clone(),
        }
    }

    pub fn pagination_events(&self) -> PaginationEvents {
        PaginationEvents {
            tx: self.tx.clone(),
        }
    }

    pub fn history_events(&self) -> HistoryEvents {
        HistoryEvents {
            tx: self.tx.clone(),
        }
    }

    /// Latest published view model.
    pub fn view(&self) -> AppViewModel {
        self.view_rx.borrow().clone()
    }

    pub fn watch(&self) -> watch::Receiver<AppViewModel> {
        self.view_rx.clone()
    }

    /// Asks the controller to stop once queued events are handled; live requests
    /// and pending renders are dropped.
    pub fn shutdown(&self) -> Result<(), ControllerClosed> {
        send(&self.tx, ControllerEvent::Shutdown)
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

#[derive(Clone)]
pub struct FilterEvents {
    tx: mpsc::UnboundedSender<ControllerEvent>,
}

impl FilterEvents {
    pub fn emit(&self, selection: FilterSelection) -> Result<(), ControllerClosed> {
        send(&self.tx, ControllerEvent::Filter(selection))
    }
}

#[derive(Clone)]
pub struct PaginationEvents {
    tx: mpsc::UnboundedSender<ControllerEvent>,
}

impl PaginationEvents {
    pub fn emit(&self, data: PaginationData) -> Result<(), ControllerClosed> {
        send(&self.tx, ControllerEvent::Pagination(data))
    }

    pub fn downgrade(&self) -> WeakPaginationEvents {
        WeakPaginationEvents {
            tx: self.tx.downgrade(),
        }
    }
}

/// Pagination sender that does not count as a subscriber.
#[derive(Clone)]
pub struct WeakPaginationEvents {
    tx: mpsc::WeakUnboundedSender<ControllerEvent>,
}

impl WeakPaginationEvents {
    pub fn emit(&self, data: PaginationData) -> Result<(), ControllerClosed> {
        let tx = self.tx.upgrade().ok_or(ControllerClosed)?;
        send(&tx, ControllerEvent::Pagination(data))
    }
}

#[derive(Clone)]
pub struct HistoryEvents {
    tx: mpsc::UnboundedSender<ControllerEvent>,
}

impl HistoryEvents {
    /// Back/forward navigation; `None` re-requests content for the current state.
    pub fn emit(&self, state: Option<ViewState>) -> Result<(), ControllerClosed> {
        send(&self.tx, ControllerEvent::History(state))
    }
}

fn send(
    tx: &mpsc::UnboundedSender<ControllerEvent>,
    event: ControllerEvent,
) -> Result<(), ControllerClosed> {
    tx.send(event).map_err(|_| ControllerClosed)
}

pub struct ContentUpdateController {
    config: ResultsConfig,
    collaborators: Collaborators,
    state: AppState,
    requests: RequestOrchestrator,
    render_timer: DebounceTimer,
    events: mpsc::UnboundedReceiver<ControllerEvent>,
    internal_tx: mpsc::UnboundedSender<Msg>,
    internal_rx: mpsc::UnboundedReceiver<Msg>,
    view_tx: watch::Sender<AppViewModel>,
}

impl ContentUpdateController {
    pub fn new(
        config: ResultsConfig,
        collaborators: Collaborators,
        fetcher: Arc<dyn Fetcher>,
        initial: ViewState,
        inbox: ControllerInbox,
    ) -> Self {
        let (internal_tx, internal_rx) = mpsc::unbounded_channel();
        let requests = RequestOrchestrator::new(fetcher, config.fixture_seed);
        let render_timer = DebounceTimer::new(config.render_delay);
        Self {
            config,
            collaborators,
            state: AppState::new(initial),
            requests,
            render_timer,
            events: inbox.rx,
            internal_tx,
            internal_rx,
            view_tx: inbox.view_tx,
        }
    }

    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }

    /// Handles events until shutdown or until every sender is gone.
    pub async fn run(mut self) {
        self.replace_initial_entry();

        loop {
            let msg = tokio::select! {
                event = self.events.recv() => match event {
                    Some(ControllerEvent::Filter(selection)) => Msg::FilterChanged(selection),
                    Some(ControllerEvent::Pagination(data)) => Msg::PaginationChanged(data),
                    Some(ControllerEvent::History(state)) => Msg::HistoryNavigated(state),
                    Some(ControllerEvent::Shutdown) | None => break,
                },
                Some(msg) = self.internal_rx.recv() => msg,
            };
            self.dispatch(msg);
        }

        self.requests.cancel();
        self.render_timer.cancel();
        results_info!("content update controller stopped");
    }

    fn replace_initial_entry(&mut self) {
        let view = self.state.view_state().clone();
        let url = self.config.page_url(&url_codec::encode(&view));
        self.collaborators.navigation.replace_page_url(&url, &view);
        self.view_tx.send_replace(self.state.view());
    }

    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        results_logging::set_cycle(self.state.cycle());

        for effect in effects {
            self.run_effect(effect);
        }
        if self.state.consume_dirty() {
            self.view_tx.send_replace(self.state.view());
        }
    }

    fn run_effect(&mut self, effect: Effect) {
        let collaborators = &self.collaborators;
        match effect {
            Effect::ResetPagination => {
                results_debug!("filter changed, waiting for pagination reset");
                collaborators.pagination.reset();
            }
            Effect::SetPageUrl { path, state } => {
                let url = self.config.page_url(&path);
                results_debug!("page url {}", url);
                collaborators.navigation.set_page_url(&url, &state);
            }
            Effect::Show { state, visible } => collaborators.view.show(state, visible),
            Effect::StartLoadingIndicator => collaborators.loading.start(),
            Effect::StopLoadingIndicator => collaborators.loading.stop(),
            Effect::RequestContent { cycle, path } => self.request_content(cycle, &path),
            Effect::ScheduleRender { cycle } => {
                let tx = self.internal_tx.clone();
                self.render_timer.schedule(move || {
                    let _ = tx.send(Msg::RenderDue { cycle });
                });
            }
            Effect::Render {
                payload,
                pagination,
            } => {
                results_info!(
                    "rendering {} results, page {}/{}",
                    payload.results.len(),
                    pagination.data.current,
                    pagination.data.total
                );
                collaborators.view.render(&payload, &pagination);
            }
            Effect::UpdateSelectedOptions(filter) => {
                collaborators.filters.update_selected_options(&filter)
            }
            Effect::UpdateDisabledOptions(dropdowns) => {
                collaborators.filters.update_disabled_options(&dropdowns)
            }
            Effect::SetPaginationState(pagination) => {
                collaborators.pagination.set_pagination_state(&pagination)
            }
            Effect::ScrollToTop => collaborators.view.scroll_to_top(),
            Effect::Focus(FocusTarget::FirstResult) => collaborators.view.focus_first_result(),
            Effect::Focus(FocusTarget::FilterControl) => collaborators.filters.return_focus(),
        }
    }

    fn request_content(&mut self, cycle: u64, path: &str) {
        let success_tx = self.internal_tx.clone();
        let on_success = move |payload: ResultPayload| {
            let _ = success_tx.send(Msg::ContentLoaded { cycle, payload });
        };

        if let Some(fixtures) = self.config.fixture_source() {
            results_info!("requesting fixture content for {}", path);
            self.requests
                .request_fixture(fixtures, path, on_success, self.config.fixture_delay);
            return;
        }

        let url = self.config.content_url(path);
        results_info!("requesting content from {}", url);
        let error_tx = self.internal_tx.clone();
        let callbacks = RequestCallbacks::new(on_success, move |err: FetchError| {
            results_warn!("content request failed: {}", err);
            let _ = error_tx.send(Msg::ContentFailed {
                cycle,
                reason: err.reason(),
            });
        });
        self.requests
            .request(url, callbacks, self.config.request_timeout);
    }
}
