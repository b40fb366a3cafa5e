use std::sync::Once;

use pretty_assertions::assert_eq;
use results_core::{
    update, ActionKind, AppState, DropdownState, Effect, FilterSelection, FocusTarget, Msg,
    PaginationData, Phase, ResultPayload, ViewState, VisualState,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(results_logging::initialize_for_tests);
}

fn payload(total_pages: u32) -> ResultPayload {
    ResultPayload {
        title: Some("Archive".to_string()),
        results: vec![serde_json::json!({"id": total_pages})],
        total_pages,
        filter_state: None,
    }
}

fn start_state() -> AppState {
    AppState::new(ViewState::initial(
        FilterSelection::new(),
        PaginationData::new(1, 5),
    ))
}

fn show(state: VisualState, visible: bool) -> Effect {
    Effect::Show { state, visible }
}

fn page_change(current: u32, action: ActionKind) -> Msg {
    Msg::PaginationChanged(PaginationData::new(current, 5).with_action(action))
}

#[test]
fn filter_change_only_resets_pagination() {
    init_logging();
    let (mut state, effects) = update(
        start_state(),
        Msg::FilterChanged(FilterSelection::new().with("year", "2020")),
    );

    assert_eq!(effects, vec![Effect::ResetPagination]);
    assert_eq!(state.phase(), Phase::Idle);
    assert!(state.view().awaiting_reset);
    assert!(state.consume_dirty());
}

#[test]
fn pagination_change_pushes_url_and_requests_content() {
    init_logging();
    let (state, effects) = update(start_state(), page_change(2, ActionKind::Next));
    let view = state.view_state().clone();

    assert_eq!(
        effects,
        vec![
            Effect::SetPageUrl {
                path: "?page=2".to_string(),
                state: view,
            },
            show(VisualState::Loading, true),
            Effect::StartLoadingIndicator,
            Effect::RequestContent {
                cycle: 1,
                path: "?page=2".to_string(),
            },
        ]
    );
    assert!(state.is_loading());
    assert_eq!(state.cycle(), 1);
}

#[test]
fn reset_after_filter_change_fetches_page_one() {
    init_logging();
    let (state, _) = update(
        start_state(),
        Msg::FilterChanged(FilterSelection::new().with("year", "2020")),
    );
    let (state, effects) = update(state, page_change(1, ActionKind::Reset));

    assert!(matches!(
        &effects[0],
        Effect::SetPageUrl { path, .. } if path == "2020/"
    ));
    assert!(effects.contains(&Effect::RequestContent {
        cycle: 1,
        path: "2020/".to_string(),
    }));
    assert!(!state.view().awaiting_reset);
}

#[test]
fn stale_page_while_reset_pending_does_not_fetch() {
    init_logging();
    let (state, _) = update(
        start_state(),
        Msg::FilterChanged(FilterSelection::new().with("topic", "design")),
    );
    let (state, effects) = update(state, page_change(3, ActionKind::Jump));

    assert!(effects.is_empty());
    assert_eq!(state.phase(), Phase::Idle);
    assert!(state.view().awaiting_reset);
}

#[test]
fn success_schedules_render_and_render_hands_off_payload() {
    init_logging();
    let (state, _) = update(start_state(), page_change(2, ActionKind::Next));
    let (state, effects) = update(
        state,
        Msg::ContentLoaded {
            cycle: 1,
            payload: payload(7),
        },
    );

    assert_eq!(
        effects,
        vec![
            show(VisualState::Loading, false),
            show(VisualState::Rendering, true),
            Effect::ScheduleRender { cycle: 1 },
        ]
    );
    assert!(state.is_rendering());

    let (state, effects) = update(state, Msg::RenderDue { cycle: 1 });
    let pagination = state.view_state().pagination.clone();
    assert_eq!(pagination.data.total, 7);
    assert_eq!(pagination.data.current, 2);
    assert_eq!(
        effects,
        vec![
            Effect::Render {
                payload: payload(7),
                pagination: pagination.clone(),
            },
            Effect::SetPaginationState(pagination),
            show(VisualState::Rendering, false),
            Effect::StopLoadingIndicator,
            Effect::ScrollToTop,
            Effect::Focus(FocusTarget::FirstResult),
        ]
    );
    assert_eq!(state.phase(), Phase::Idle);
}

#[test]
fn render_after_reset_returns_focus_to_filters() {
    init_logging();
    let (state, _) = update(
        start_state(),
        Msg::FilterChanged(FilterSelection::new().with("year", "2020")),
    );
    let (state, _) = update(state, page_change(1, ActionKind::Reset));
    let mut body = payload(2);
    body.filter_state = Some(vec![DropdownState {
        id: "month".to_string(),
        disabled_options: vec!["01".to_string()],
    }]);
    let (state, _) = update(
        state,
        Msg::ContentLoaded {
            cycle: 1,
            payload: body.clone(),
        },
    );
    let (_state, effects) = update(state, Msg::RenderDue { cycle: 1 });

    assert!(effects.contains(&Effect::UpdateDisabledOptions(
        body.filter_state.clone().unwrap()
    )));
    assert_eq!(
        effects.last(),
        Some(&Effect::Focus(FocusTarget::FilterControl))
    );
}

#[test]
fn later_payload_replaces_pending_one() {
    init_logging();
    let (state, _) = update(start_state(), page_change(2, ActionKind::Next));
    let (state, _) = update(
        state,
        Msg::ContentLoaded {
            cycle: 1,
            payload: payload(3),
        },
    );
    let (state, _) = update(
        state,
        Msg::ContentLoaded {
            cycle: 1,
            payload: payload(9),
        },
    );
    let (_state, effects) = update(state, Msg::RenderDue { cycle: 1 });

    let rendered: Vec<_> = effects
        .iter()
        .filter_map(|effect| match effect {
            Effect::Render { payload, .. } => Some(payload.total_pages),
            _ => None,
        })
        .collect();
    assert_eq!(rendered, vec![9]);
}

#[test]
fn failure_clears_loading_without_render() {
    init_logging();
    let (state, _) = update(start_state(), page_change(2, ActionKind::Next));
    let (state, effects) = update(
        state,
        Msg::ContentFailed {
            cycle: 1,
            reason: "timeout".to_string(),
        },
    );

    assert_eq!(
        effects,
        vec![
            show(VisualState::Loading, false),
            Effect::StopLoadingIndicator
        ]
    );
    assert_eq!(state.phase(), Phase::Idle);

    let (_state, effects) = update(state, Msg::RenderDue { cycle: 1 });
    assert!(effects.is_empty());
}

#[test]
fn new_cycle_while_rendering_drops_previous_render() {
    init_logging();
    let (state, _) = update(start_state(), page_change(2, ActionKind::Next));
    let (state, _) = update(
        state,
        Msg::ContentLoaded {
            cycle: 1,
            payload: payload(5),
        },
    );
    let (state, effects) = update(state, page_change(3, ActionKind::Next));

    // The indicator is still running from cycle 1, so it is not started again.
    assert!(!effects.contains(&Effect::StartLoadingIndicator));
    assert!(effects.contains(&show(VisualState::Rendering, false)));
    assert_eq!(state.cycle(), 2);

    let (state, effects) = update(state, Msg::RenderDue { cycle: 1 });
    assert!(effects.is_empty());
    let (state, effects) = update(
        state,
        Msg::ContentLoaded {
            cycle: 1,
            payload: payload(5),
        },
    );
    assert!(effects.is_empty());
    assert!(state.is_loading());
}

#[test]
fn history_navigation_restores_state_without_pushing_url() {
    init_logging();
    let restored = ViewState::initial(
        FilterSelection::new().with("month", "04"),
        PaginationData::new(2, 4),
    );
    let (state, effects) = update(start_state(), Msg::HistoryNavigated(Some(restored.clone())));

    assert_eq!(state.view_state(), &restored);
    assert_eq!(
        effects,
        vec![
            Effect::UpdateSelectedOptions(restored.filter.clone()),
            Effect::SetPaginationState(restored.pagination.clone()),
            show(VisualState::Loading, true),
            Effect::StartLoadingIndicator,
            Effect::RequestContent {
                cycle: 1,
                path: "04/?page=2".to_string(),
            },
        ]
    );
}

#[test]
fn history_navigation_without_state_reloads_current() {
    init_logging();
    let (state, effects) = update(start_state(), Msg::HistoryNavigated(None));
    assert_eq!(state.view_state(), start_state().view_state());
    assert!(effects.contains(&Effect::RequestContent {
        cycle: 1,
        path: "/".to_string(),
    }));
}
