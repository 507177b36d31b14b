//! DailyWeather backend client

use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use crate::state::{CityReport, Suggestion};

/// Public backend used when no `--base-url` is given
pub const DEFAULT_BACKEND_URL: &str = "https://helloworldapi-0684.onrender.com";

#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("backend returned {0}")]
    Status(StatusCode),
    #[error("response parse error: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Thin client over the two backend endpoints. Cheap to clone.
#[derive(Clone, Debug)]
pub struct BackendClient {
    client: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /cities?q=<query>` - autocomplete candidates
    pub async fn search_cities(&self, query: &str) -> Result<Vec<Suggestion>, ApiError> {
        let url = format!("{}/cities?q={}", self.base_url, urlencoding::encode(query));
        self.get_json(&url).await
    }

    /// `GET /city-info?city=<city>` - the aggregated report
    pub async fn fetch_city_info(&self, city: &str) -> Result<CityReport, ApiError> {
        let url = format!(
            "{}/city-info?city={}",
            self.base_url,
            urlencoding::encode(city)
        );
        self.get_json(&url).await
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        tracing::debug!(%url, "GET");
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status));
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

impl Default for BackendClient {
    fn default() -> Self {
        Self::new(DEFAULT_BACKEND_URL)
    }
}
