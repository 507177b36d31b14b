//! Action and state tests using EffectStore and TestHarness

use tui_dispatch::testing::*;
use tui_dispatch::{EffectStore, NumericComponentId, assert_emitted, assert_not_emitted};
use dailyweather::{
    action::Action,
    components::{CityWeatherSearch, CityWeatherSearchProps, Component},
    effect::Effect,
    reducer::reducer,
    state::{AppState, CityReport, MIN_QUERY_LEN, Suggestion},
};

fn delhi() -> Suggestion {
    Suggestion {
        name: "Delhi".into(),
        country: "India".into(),
    }
}

#[test]
fn test_short_queries_never_search() {
    let mut store = EffectStore::new(AppState::default(), reducer);

    for query in ["", "D", "é", " "] {
        assert!(query.chars().count() < MIN_QUERY_LEN);
        let result = store.dispatch(Action::QueryChange(query.into()));
        assert!(result.effects.is_empty(), "no search for {query:?}");
        assert!(store.state().suggestions.is_empty());
    }
}

#[test]
fn test_one_search_per_keystroke() {
    let mut store = EffectStore::new(AppState::default(), reducer);

    let mut seqs = Vec::new();
    for query in ["De", "Del", "Delh", "Delhi"] {
        let result = store.dispatch(Action::QueryChange(query.into()));
        assert_eq!(result.effects.len(), 1);
        match &result.effects[0] {
            Effect::SearchCities { seq, query: q } => {
                assert_eq!(q, query);
                seqs.push(*seq);
            }
            other => panic!("unexpected effect {other:?}"),
        }
    }

    assert!(seqs.windows(2).all(|w| w[0] < w[1]), "tags increase: {seqs:?}");
}

#[test]
fn test_suggestions_load_for_latest_request() {
    let mut store = EffectStore::new(AppState::default(), reducer);

    store.dispatch(Action::QueryChange("Del".into()));
    let seq = store.state().suggest_seq;
    store.dispatch(Action::SuggestDidLoad {
        seq,
        cities: vec![delhi()],
    });

    assert_eq!(store.state().suggestions, vec![delhi()]);
    assert_eq!(store.state().suggestions[0].label(), "Delhi, India");
}

#[test]
fn test_suggest_error_empties_list_silently() {
    let mut store = EffectStore::new(AppState::default(), reducer);

    store.dispatch(Action::QueryChange("Del".into()));
    let seq = store.state().suggest_seq;
    store.dispatch(Action::SuggestDidLoad {
        seq,
        cities: vec![delhi()],
    });
    store.dispatch(Action::QueryChange("Delx".into()));
    let seq = store.state().suggest_seq;
    store.dispatch(Action::SuggestDidError {
        seq,
        error: "backend returned 500".into(),
    });

    assert!(store.state().suggestions.is_empty());
    assert!(store.state().report.is_empty(), "no user-facing error");
}

#[test]
fn test_backspace_below_threshold_drops_in_flight_results() {
    let mut store = EffectStore::new(AppState::default(), reducer);

    store.dispatch(Action::QueryChange("De".into()));
    let in_flight = store.state().suggest_seq;
    store.dispatch(Action::QueryChange("D".into()));

    let result = store.dispatch(Action::SuggestDidLoad {
        seq: in_flight,
        cities: vec![delhi()],
    });

    assert!(!result.changed);
    assert!(store.state().suggestions.is_empty());
}

#[test]
fn test_select_moves_highlight_within_bounds() {
    let mut store = EffectStore::new(
        AppState {
            suggestions: vec![
                delhi(),
                Suggestion {
                    name: "Delft".into(),
                    country: "Netherlands".into(),
                },
            ],
            ..Default::default()
        },
        reducer,
    );

    assert!(store.dispatch(Action::SuggestSelect(1)).changed);
    assert_eq!(store.state().suggestion_selected, 1);
    assert!(!store.dispatch(Action::SuggestSelect(5)).changed);
    assert_eq!(store.state().suggestion_selected, 1);

    store.dispatch(Action::SuggestPick);
    assert_eq!(store.state().query, "Delft");
}

#[test]
fn test_dismiss_closes_dropdown_keeps_query() {
    let mut store = EffectStore::new(
        AppState {
            query: "Del".into(),
            suggestions: vec![delhi()],
            ..Default::default()
        },
        reducer,
    );

    assert!(store.dispatch(Action::SuggestDismiss).changed);
    assert!(store.state().suggestions.is_empty());
    assert_eq!(store.state().query, "Del");

    assert!(!store.dispatch(Action::SuggestDismiss).changed);
}

#[test]
fn test_pick_without_suggestions_is_noop() {
    let mut store = EffectStore::new(AppState::with_query("Del"), reducer);
    let result = store.dispatch(Action::SuggestPick);
    assert!(!result.changed);
    assert_eq!(store.state().query, "Del");
}

#[test]
fn test_submit_clears_suggestions_and_emits_fetch() {
    let mut store = EffectStore::new(
        AppState {
            query: "Delhi".into(),
            suggestions: vec![delhi()],
            ..Default::default()
        },
        reducer,
    );

    let result = store.dispatch(Action::ReportFetch);

    assert!(result.changed);
    assert!(store.state().report.is_loading());
    assert!(store.state().suggestions.is_empty());
    assert_eq!(
        result.effects,
        vec![Effect::FetchReport {
            seq: store.state().report_seq,
            city: "Delhi".into()
        }]
    );
}

#[test]
fn test_component_typing_emits_query_change() {
    let mut harness = TestHarness::<AppState, Action>::default();
    let mut component = CityWeatherSearch::new();

    let actions = harness.send_keys::<NumericComponentId, _, _>("d", |state, event| {
        let props = CityWeatherSearchProps {
            state,
            is_focused: true,
        };
        component
            .handle_event(&event.kind, props)
            .into_iter()
            .collect::<Vec<_>>()
    });

    assert_emitted!(actions, Action::QueryChange(_));
    assert_not_emitted!(actions, Action::ReportFetch);
}

#[test]
fn test_component_ignores_when_unfocused() {
    let mut harness = TestHarness::<AppState, Action>::default();
    let mut component = CityWeatherSearch::new();

    let actions = harness.send_keys::<NumericComponentId, _, _>("a b c", |state, event| {
        let props = CityWeatherSearchProps {
            state,
            is_focused: false,
        };
        component
            .handle_event(&event.kind, props)
            .into_iter()
            .collect::<Vec<_>>()
    });

    actions.assert_empty();
}

#[test]
fn test_action_categories() {
    let did_load = Action::ReportDidLoad {
        seq: 1,
        report: CityReport::default(),
    };
    let tick = Action::Tick;

    assert_eq!(did_load.category(), Some("report_did"));
    assert_eq!(tick.category(), None);
    assert!(did_load.is_report_did());
}

#[test]
fn test_assert_emitted_macro() {
    let actions = vec![
        Action::ReportFetch,
        Action::ReportDidLoad {
            seq: 1,
            report: CityReport::default(),
        },
    ];

    assert_emitted!(actions, Action::ReportFetch);
    assert_emitted!(actions, Action::ReportDidLoad { .. });
    assert_not_emitted!(actions, Action::Quit);
    assert_not_emitted!(actions, Action::ReportDidError { .. });
}
