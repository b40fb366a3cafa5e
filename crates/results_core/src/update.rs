use crate::{
    url_codec, ActionKind, AppState, Effect, FetchSignal, FocusTarget, Msg, Phase, VisualState,
};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::FilterChanged(selection) => {
            // The fetch waits for the pagination collaborator to confirm page one.
            state.store_mut().apply_filter_change(selection);
            state.mark_dirty();
            vec![Effect::ResetPagination]
        }
        Msg::PaginationChanged(data) => {
            let signal = state.store_mut().apply_pagination_change(data);
            state.mark_dirty();
            match signal {
                FetchSignal::AwaitingReset(_) => Vec::new(),
                FetchSignal::FetchNow => {
                    let view = state.view_state().clone();
                    let mut effects = vec![Effect::SetPageUrl {
                        path: url_codec::encode(&view),
                        state: view,
                    }];
                    effects.extend(begin_content_update(&mut state));
                    effects
                }
            }
        }
        Msg::HistoryNavigated(restored) => {
            if let Some(view) = restored {
                state.store_mut().replace(view);
            }
            let view = state.view_state().clone();
            let mut effects = vec![
                Effect::UpdateSelectedOptions(view.filter),
                Effect::SetPaginationState(view.pagination),
            ];
            effects.extend(begin_content_update(&mut state));
            effects
        }
        Msg::ContentLoaded { cycle, payload } => {
            if cycle != state.cycle() || state.phase() == Phase::Idle {
                return (state, Vec::new());
            }
            state.stash_payload(payload);
            state.set_phase(Phase::Rendering);
            vec![
                Effect::Show {
                    state: VisualState::Loading,
                    visible: false,
                },
                Effect::Show {
                    state: VisualState::Rendering,
                    visible: true,
                },
                Effect::ScheduleRender { cycle },
            ]
        }
        Msg::ContentFailed { cycle, .. } => {
            if cycle != state.cycle() || state.phase() != Phase::Loading {
                return (state, Vec::new());
            }
            state.set_phase(Phase::Idle);
            vec![
                Effect::Show {
                    state: VisualState::Loading,
                    visible: false,
                },
                Effect::StopLoadingIndicator,
            ]
        }
        Msg::RenderDue { cycle } => {
            if cycle != state.cycle() || state.phase() != Phase::Rendering {
                return (state, Vec::new());
            }
            match state.take_payload() {
                Some(payload) => finish_render(&mut state, payload),
                None => Vec::new(),
            }
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn begin_content_update(state: &mut AppState) -> Vec<Effect> {
    let previous = state.phase();
    let cycle = state.begin_cycle();

    let mut effects = Vec::with_capacity(4);
    if previous == Phase::Rendering {
        effects.push(Effect::Show {
            state: VisualState::Rendering,
            visible: false,
        });
    }
    effects.push(Effect::Show {
        state: VisualState::Loading,
        visible: true,
    });
    if previous == Phase::Idle {
        effects.push(Effect::StartLoadingIndicator);
    }
    effects.push(Effect::RequestContent {
        cycle,
        path: url_codec::encode(state.view_state()),
    });
    effects
}

fn finish_render(state: &mut AppState, payload: crate::ResultPayload) -> Vec<Effect> {
    state.store_mut().merge_result(&payload);
    state.set_phase(Phase::Idle);

    let pagination = state.view_state().pagination.clone();
    let focus = if pagination.data.last_action == Some(ActionKind::Reset) {
        FocusTarget::FilterControl
    } else {
        FocusTarget::FirstResult
    };
    let disabled = payload.filter_state.clone();

    let mut effects = Vec::with_capacity(7);
    effects.push(Effect::Render {
        payload,
        pagination: pagination.clone(),
    });
    if let Some(dropdowns) = disabled {
        effects.push(Effect::UpdateDisabledOptions(dropdowns));
    }
    effects.push(Effect::SetPaginationState(pagination));
    effects.push(Effect::Show {
        state: VisualState::Rendering,
        visible: false,
    });
    effects.push(Effect::StopLoadingIndicator);
    effects.push(Effect::ScrollToTop);
    effects.push(Effect::Focus(focus));
    effects
}
