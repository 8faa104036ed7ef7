use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::config::SearchConfig;
use crate::credentials::CredentialSource;
use crate::error::SearchError;
use crate::models::JobRecord;
use crate::search::normalize::{normalize_results, RawSearchResponse};
use crate::search::params::{build_request, RequestSpec};
use crate::search::traits::JobSource;
use crate::search::types::SearchFilters;
use crate::search::SearchOutcome;

/// Error bodies that are not JSON are cut to this many characters.
const MAX_ERROR_BODY_CHARS: usize = 500;

/// Adzuna job search client
pub struct AdzunaClient {
    client: Client,
    config: SearchConfig,
    credentials: Arc<dyn CredentialSource>,
}

impl AdzunaClient {
    /// Create a client that asks `credentials` for app id / key on every call
    pub fn new(config: SearchConfig, credentials: impl CredentialSource + 'static) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            config,
            credentials: Arc::new(credentials),
        })
    }

    /// Build the exact request a search would send, without sending it
    pub fn build_request(&self, filters: &SearchFilters) -> Result<RequestSpec, SearchError> {
        let credentials = self
            .credentials
            .resolve()
            .ok_or(SearchError::MissingCredentials)?;
        Ok(build_request(&self.config.base_url, filters, &credentials))
    }

    /// Lightweight connectivity and credential check
    pub async fn ping(&self, country_code: &str) -> PingReport {
        let filters = SearchFilters {
            country_code: country_code.to_string(),
            results_per_page: Some(1),
            ..SearchFilters::default()
        };

        let spec = match self.build_request(&filters) {
            Ok(spec) => spec,
            Err(e) => return PingReport::error(String::new(), &e),
        };

        match self.fetch(&spec).await {
            Ok(body) => PingReport {
                status: PingStatus::Ok,
                url: spec.url,
                result_count: Some(body.results.map(|r| r.len()).unwrap_or(0)),
                total_available: body.count,
                error: None,
            },
            Err(e) => PingReport::error(spec.url, &e),
        }
    }

    async fn try_search(&self, filters: &SearchFilters) -> Result<Vec<JobRecord>, SearchError> {
        let spec = self.build_request(filters)?;
        info!(
            "Searching {} for '{}' in '{}' (page {})",
            self.source_name(),
            filters.query,
            filters.location,
            filters.effective_page()
        );

        let body = self.fetch(&spec).await?;
        let raw_results = body.results.unwrap_or_default();
        debug!("Decoded {} raw results", raw_results.len());

        let jobs: Vec<_> = normalize_results(raw_results)
            .into_iter()
            .filter(|job| filters.remote.accepts(job))
            .collect();

        info!("Found {} jobs", jobs.len());
        Ok(jobs)
    }

    async fn fetch(&self, spec: &RequestSpec) -> Result<RawSearchResponse, SearchError> {
        debug!("Fetching URL: {}", spec.url);

        let response = self
            .client
            .get(&spec.url)
            .query(&spec.params)
            .send()
            .await
            .map_err(|e| SearchError::from_reqwest(e, self.config.timeout))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("{} returned status: {}", self.source_name(), status);
            return Err(SearchError::Http {
                status: status.as_u16(),
                body: summarize_error_body(&body),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| SearchError::from_reqwest(e, self.config.timeout))?;
        debug!("Downloaded {} bytes of JSON", body.len());

        serde_json::from_str(&body).map_err(|e| SearchError::Decode(e.to_string()))
    }
}

#[async_trait]
impl JobSource for AdzunaClient {
    async fn search(&self, filters: &SearchFilters) -> SearchOutcome {
        match self.try_search(filters).await {
            Ok(jobs) => SearchOutcome::found(jobs),
            Err(e) => {
                warn!(kind = e.kind(), "Search failed, showing no results: {}", e);
                SearchOutcome::failed(e)
            }
        }
    }

    fn source_name(&self) -> &'static str {
        "Adzuna"
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PingStatus {
    Ok,
    Error,
}

/// Outcome of [`AdzunaClient::ping`]
#[derive(Debug, Clone, Serialize)]
pub struct PingReport {
    pub status: PingStatus,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_available: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PingReport {
    fn error(url: String, err: &SearchError) -> Self {
        Self {
            status: PingStatus::Error,
            url,
            result_count: None,
            total_available: None,
            error: Some(err.to_string()),
        }
    }
}

/// Compact JSON when the body parses, otherwise the first few hundred chars.
fn summarize_error_body(body: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(json) => json.to_string(),
        Err(_) => body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::Credentials;

    #[test]
    fn test_summarize_json_body() {
        let body = "{\n  \"exception\": \"AUTH_FAIL\"\n}";
        assert_eq!(summarize_error_body(body), "{\"exception\":\"AUTH_FAIL\"}");
    }

    #[test]
    fn test_summarize_text_body_truncates() {
        let body = "x".repeat(2_000);
        assert_eq!(summarize_error_body(&body).chars().count(), MAX_ERROR_BODY_CHARS);
    }

    #[test]
    fn test_build_request_without_credentials() {
        let client = AdzunaClient::new(SearchConfig::default(), Credentials::new("", "")).unwrap();
        let err = client.build_request(&SearchFilters::default()).unwrap_err();
        assert!(matches!(err, SearchError::MissingCredentials));
    }

    #[test]
    fn test_build_request_uses_configured_base() {
        let config = SearchConfig {
            base_url: "http://localhost:1234/jobs".to_string(),
            ..SearchConfig::default()
        };
        let client = AdzunaClient::new(config, Credentials::new("id", "key")).unwrap();
        let spec = client.build_request(&SearchFilters::default()).unwrap();
        assert_eq!(spec.url, "http://localhost:1234/jobs/us/search/1");
    }

    #[tokio::test]
    async fn test_search_without_credentials_is_empty() {
        let client = AdzunaClient::new(SearchConfig::default(), Credentials::new("", "")).unwrap();
        let outcome = client.search(&SearchFilters::new("Data Analyst", "Texas")).await;
        assert!(outcome.jobs.is_empty());
        assert!(matches!(outcome.diagnostic, Some(SearchError::MissingCredentials)));
    }
}
