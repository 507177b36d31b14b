//! Effects - side effects declared by the reducer

use crate::action::Action;
use crate::api::BackendClient;

/// Side effects that can be triggered by actions
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Look up autocomplete candidates for `query`
    SearchCities { seq: u64, query: String },
    /// Fetch the aggregated report for `city`
    FetchReport { seq: u64, city: String },
}

impl Effect {
    /// Task key; a newer effect of the same kind reuses it.
    pub fn task_key(&self) -> &'static str {
        match self {
            Effect::SearchCities { .. } => "city_search",
            Effect::FetchReport { .. } => "city_info",
        }
    }

    /// Perform the request and turn the outcome into the completion action,
    /// carrying the effect's sequence tag.
    pub async fn run(self, client: &BackendClient) -> Action {
        match self {
            Effect::SearchCities { seq, query } => match client.search_cities(&query).await {
                Ok(cities) => Action::SuggestDidLoad { seq, cities },
                Err(e) => {
                    tracing::warn!(seq, %query, error = %e, "city search failed");
                    Action::SuggestDidError {
                        seq,
                        error: e.to_string(),
                    }
                }
            },
            Effect::FetchReport { seq, city } => match client.fetch_city_info(&city).await {
                Ok(report) => Action::ReportDidLoad { seq, report },
                Err(e) => {
                    tracing::warn!(seq, %city, error = %e, "report fetch failed");
                    Action::ReportDidError {
                        seq,
                        error: e.to_string(),
                    }
                }
            },
        }
    }
}
