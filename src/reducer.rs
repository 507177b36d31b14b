//! Reducer - pure function: (state, action) -> DispatchResult

use tui_dispatch::{DataResource, DispatchResult};

use crate::action::Action;
use crate::effect::Effect;
use crate::state::{AppState, MIN_QUERY_LEN, REPORT_ERROR_MESSAGE};

/// The reducer handles all state transitions
pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        // ===== Query actions =====
        Action::QueryChange(query) => {
            state.query = query;
            if state.query.chars().count() < MIN_QUERY_LEN {
                clear_suggestions(state);
                return DispatchResult::changed();
            }
            state.suggest_seq += 1;
            DispatchResult::changed_with(Effect::SearchCities {
                seq: state.suggest_seq,
                query: state.query.clone(),
            })
        }

        // ===== Suggest actions =====
        Action::SuggestDidLoad { seq, cities } => {
            if seq != state.suggest_seq {
                tracing::debug!(seq, latest = state.suggest_seq, "dropping stale suggestions");
                return DispatchResult::unchanged();
            }
            state.suggestions = cities;
            state.suggestion_selected = 0;
            DispatchResult::changed()
        }

        Action::SuggestDidError { seq, .. } => {
            if seq != state.suggest_seq {
                return DispatchResult::unchanged();
            }
            state.suggestions.clear();
            state.suggestion_selected = 0;
            DispatchResult::changed()
        }

        Action::SuggestSelect(index) => {
            if index < state.suggestions.len() && index != state.suggestion_selected {
                state.suggestion_selected = index;
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::SuggestPick => {
            let Some(name) = state.highlighted_suggestion().map(|s| s.name.clone()) else {
                return DispatchResult::unchanged();
            };
            state.query = name;
            clear_suggestions(state);
            DispatchResult::changed()
        }

        Action::SuggestDismiss => {
            if !state.dropdown_open() {
                return DispatchResult::unchanged();
            }
            clear_suggestions(state);
            DispatchResult::changed()
        }

        // ===== Report actions =====
        Action::ReportFetch => {
            if state.query.is_empty() {
                return DispatchResult::unchanged();
            }
            state.report = DataResource::Loading;
            state.report_seq += 1;
            state.tick_count = 0;
            clear_suggestions(state);
            DispatchResult::changed_with(Effect::FetchReport {
                seq: state.report_seq,
                city: state.query.clone(),
            })
        }

        Action::ReportDidLoad { seq, report } => {
            if seq != state.report_seq {
                tracing::debug!(seq, latest = state.report_seq, "dropping stale report");
                return DispatchResult::unchanged();
            }
            state.report = DataResource::Loaded(report);
            DispatchResult::changed()
        }

        Action::ReportDidError { seq, .. } => {
            if seq != state.report_seq {
                tracing::debug!(seq, latest = state.report_seq, "dropping stale report error");
                return DispatchResult::unchanged();
            }
            state.report = DataResource::Failed(REPORT_ERROR_MESSAGE.to_string());
            DispatchResult::changed()
        }

        Action::Render => DispatchResult::changed(),

        // ===== Global actions =====
        Action::Tick => {
            if state.loading_anim_active() {
                state.tick_count = state.tick_count.wrapping_add(1);
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::Quit => DispatchResult::unchanged(),
    }
}

/// Empty the dropdown and invalidate any autocomplete still in flight.
fn clear_suggestions(state: &mut AppState) {
    state.suggestions.clear();
    state.suggestion_selected = 0;
    state.suggest_seq += 1;
}
