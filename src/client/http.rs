//! Analytics REST API Client
//!
//! `reqwest`-backed implementation of [`AnomalyApi`].

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

use super::error::{ClientError, ClientResult};
use super::query::{build_url, validate_filter, QueryPairs, ToQuery};
use super::AnomalyApi;
use crate::models::{
    AlertTimelineResponse, AnomalyEvent, AnomalyEventFilter, AnomalyEventStats,
    DashboardOverview, HealthStatus, ServiceAlertSummary, TimeWindow, TimelineQuery,
};

/// Default upstream base URL
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the analytics API (e.g., "http://localhost:8000")
    pub base_url: String,
    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_ms: 10_000,
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }
}

/// HTTP client for the analytics API
pub struct HttpClient {
    client: Client,
    base_url: String,
}

impl HttpClient {
    /// Create a new client with the given configuration
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .default_headers(headers)
            .build()
            .map_err(|e| ClientError::Network(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Base URL requests are sent to, without a trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issue a GET and decode the JSON body
    async fn get_json<T: DeserializeOwned>(&self, path: &str, query: QueryPairs) -> ClientResult<T> {
        let url = build_url(&self.base_url, path, &query);
        tracing::debug!(url = %url, "GET");

        let response = self.client.get(&url).send().await.map_err(|e| {
            tracing::warn!(url = %url, error = %e, "Request failed");
            ClientError::from_transport(e)
        })?;

        let status = response.status();
        let body = response.bytes().await.map_err(ClientError::from_transport)?;

        if !status.is_success() {
            let text = String::from_utf8_lossy(&body);
            tracing::warn!(url = %url, status = status.as_u16(), "API returned error status");
            return Err(ClientError::from_status(status, &text));
        }

        serde_json::from_slice(&body).map_err(|e| {
            tracing::warn!(url = %url, error = %e, "Malformed response body");
            ClientError::Decode(e.to_string())
        })
    }
}

#[async_trait]
impl AnomalyApi for HttpClient {
    async fn list_events(&self, filter: &AnomalyEventFilter) -> ClientResult<Vec<AnomalyEvent>> {
        validate_filter(filter)?;
        self.get_json("/events", filter.query_pairs()).await
    }

    async fn get_event(&self, id: &str) -> ClientResult<AnomalyEvent> {
        let path = format!("/events/{}", urlencoding::encode(id));
        self.get_json(&path, Vec::new()).await
    }

    async fn event_stats(&self, window: &TimeWindow) -> ClientResult<AnomalyEventStats> {
        self.get_json("/events/stats/summary", window.query_pairs()).await
    }

    async fn dashboard_overview(&self, window: &TimeWindow) -> ClientResult<DashboardOverview> {
        self.get_json("/dashboard/overview", window.query_pairs()).await
    }

    async fn timeline(&self, query: &TimelineQuery) -> ClientResult<AlertTimelineResponse> {
        self.get_json("/dashboard/timeline", query.query_pairs()).await
    }

    async fn services(&self, window: &TimeWindow) -> ClientResult<Vec<ServiceAlertSummary>> {
        self.get_json("/dashboard/services", window.query_pairs()).await
    }

    async fn health_check(&self) -> ClientResult<HealthStatus> {
        self.get_json("/health", Vec::new()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:8000");
        assert_eq!(config.request_timeout_ms, 10_000);
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let client = HttpClient::new(ClientConfig::new("http://analytics:8000/")).unwrap();
        assert_eq!(client.base_url(), "http://analytics:8000");
    }

    #[tokio::test]
    async fn test_invalid_limit_not_sent() {
        // Nothing listens on this port; validation must fail first
        let client = HttpClient::new(ClientConfig::new("http://127.0.0.1:9")).unwrap();
        let err = client
            .list_events(&AnomalyEventFilter::new().page(5000, 0))
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::InvalidQuery(_)));
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        let client = HttpClient::new(ClientConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            request_timeout_ms: 2_000,
        })
        .unwrap();
        let err = client.health_check().await.unwrap_err();
        assert!(matches!(err, ClientError::Network(_)));
    }
}
