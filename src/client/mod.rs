//! Analytics API Client
//!
//! Typed access to the upstream anomaly-detection REST API.
//!
//! # Endpoints
//!
//! - `GET /events` - List events (filtered, paginated)
//! - `GET /events/{id}` - Get a single event
//! - `GET /events/stats/summary` - Event statistics
//! - `GET /dashboard/overview` - Aggregate snapshot
//! - `GET /dashboard/timeline` - Alert timeline buckets
//! - `GET /dashboard/services` - Per-service alert rollup
//! - `GET /health` - Upstream health
//!
//! View models depend on the [`AnomalyApi`] trait rather than the HTTP
//! client so they can be driven by a scripted backend in tests.

mod error;
mod http;
pub mod query;

#[cfg(test)]
pub(crate) mod mock;

pub use error::{ClientError, ClientResult};
pub use http::{ClientConfig, HttpClient, DEFAULT_BASE_URL};

use async_trait::async_trait;

use crate::models::{
    AlertTimelineResponse, AnomalyEvent, AnomalyEventFilter, AnomalyEventStats,
    DashboardOverview, HealthStatus, ServiceAlertSummary, TimeWindow, TimelineQuery,
};

/// Read-only operations of the analytics API
#[async_trait]
pub trait AnomalyApi: Send + Sync {
    /// List events matching the filter
    async fn list_events(&self, filter: &AnomalyEventFilter) -> ClientResult<Vec<AnomalyEvent>>;

    /// Fetch one event by id
    async fn get_event(&self, id: &str) -> ClientResult<AnomalyEvent>;

    /// Event statistics for a window
    async fn event_stats(&self, window: &TimeWindow) -> ClientResult<AnomalyEventStats>;

    /// Dashboard overview for a window
    async fn dashboard_overview(&self, window: &TimeWindow) -> ClientResult<DashboardOverview>;

    /// Alert timeline
    async fn timeline(&self, query: &TimelineQuery) -> ClientResult<AlertTimelineResponse>;

    /// Per-service alert summary
    async fn services(&self, window: &TimeWindow) -> ClientResult<Vec<ServiceAlertSummary>>;

    /// Upstream health
    async fn health_check(&self) -> ClientResult<HealthStatus>;
}
