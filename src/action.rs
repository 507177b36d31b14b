//! Actions - everything that can happen to the search screen

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::state::{CityReport, Suggestion};

/// Application actions with automatic category inference
#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[action(infer_categories)]
pub enum Action {
    // ===== Query category =====
    /// Search box text changed (one per keystroke)
    QueryChange(String),

    // ===== Suggest category =====
    /// Result: autocomplete candidates for request `seq`
    SuggestDidLoad { seq: u64, cities: Vec<Suggestion> },

    /// Result: autocomplete request `seq` failed
    SuggestDidError { seq: u64, error: String },

    /// Highlight a dropdown entry (by index)
    SuggestSelect(usize),

    /// Take the highlighted suggestion as the query
    SuggestPick,

    /// Close the dropdown without picking
    SuggestDismiss,

    // ===== Report category =====
    /// Intent: fetch the full report for the current query (triggers async task)
    ReportFetch,

    /// Result: report for request `seq` loaded
    ReportDidLoad { seq: u64, report: CityReport },

    /// Result: report request `seq` failed
    ReportDidError { seq: u64, error: String },

    // ===== Uncategorized (global) =====
    /// Force a re-render (cursor movement)
    Render,

    /// Periodic tick for the loading animation
    Tick,

    /// Exit the application
    Quit,
}
