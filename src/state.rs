//! Application state - single source of truth

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tui_dispatch::DataResource;

/// Minimum query length (in characters) before autocomplete hits the backend.
pub const MIN_QUERY_LEN: usize = 2;

/// The one message shown for every failed report fetch.
pub const REPORT_ERROR_MESSAGE: &str = "Failed to fetch data. Please try another city.";

/// A candidate city returned by `/cities`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Suggestion {
    pub name: String,
    pub country: String,
}

impl Suggestion {
    /// Dropdown label, e.g. "Delhi, India"
    pub fn label(&self) -> String {
        format!("{}, {}", self.name, self.country)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CurrentWeather {
    pub temp: f64,
    pub feels_like: f64,
    pub condition: String,
    pub humidity: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AirQuality {
    pub aqi: f64,
    pub category: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct UvIndex {
    pub value: f64,
    pub risk: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Traffic {
    pub level: String,
    pub note: String,
}

/// Aggregated payload from `/city-info`. Every field is required.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CityReport {
    pub city: String,
    pub country: String,
    pub weather: CurrentWeather,
    pub air_quality: AirQuality,
    pub uv_index: UvIndex,
    pub traffic: Traffic,
}

/// Animation timing for the title gradient while a report is loading.
pub const LOADING_ANIM_TICK_MS: u64 = 15;
pub const LOADING_ANIM_CYCLE_TICKS: u32 = 60;

/// Application state - everything the UI needs to render
#[derive(Clone, Debug, tui_dispatch::DebugState, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppState {
    /// Text in the search box. Never cleared by the app.
    #[debug(section = "Search", label = "Query")]
    pub query: String,

    /// Dropdown contents for the current query
    #[debug(section = "Search", label = "Suggestions", debug_fmt)]
    pub suggestions: Vec<Suggestion>,

    /// Highlighted dropdown entry
    #[debug(section = "Search", label = "Highlighted")]
    pub suggestion_selected: usize,

    /// Report lifecycle: Empty → Loading → Loaded/Failed
    #[debug(section = "Report", label = "Data", debug_fmt)]
    pub report: DataResource<CityReport>,

    /// Tag of the latest autocomplete request; older completions are dropped
    #[debug(section = "Requests", label = "Suggest seq")]
    pub suggest_seq: u64,

    /// Tag of the latest report request
    #[debug(section = "Requests", label = "Report seq")]
    pub report_seq: u64,

    #[debug(skip)]
    pub tick_count: u32,
}

impl AppState {
    /// State with a pre-filled query (nothing fetched yet)
    pub fn with_query(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    pub fn dropdown_open(&self) -> bool {
        !self.suggestions.is_empty()
    }

    pub fn highlighted_suggestion(&self) -> Option<&Suggestion> {
        self.suggestions.get(self.suggestion_selected)
    }

    pub fn loading_anim_active(&self) -> bool {
        self.report.is_loading()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            query: String::new(),
            suggestions: Vec::new(),
            suggestion_selected: 0,
            report: DataResource::Empty,
            suggest_seq: 0,
            report_seq: 0,
            tick_count: 0,
        }
    }
}
