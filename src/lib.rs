//! # Anomaly Dashboard
//!
//! Read-only monitoring dashboard for the anomaly events and alerts
//! produced by an upstream analytics service.
//!
//! ## Features
//!
//! - **Typed API client**: query objects to HTTP GET requests, JSON to records
//! - **View models**: per-page loading/error/data state with stale-response protection
//! - **Auto-refresh**: dashboard reloads on a fixed 30 second timer
//! - **Web UI**: server-rendered pages (stat cards, charts, event tables)
//!
//! ## Modules
//!
//! - [`client`]: Analytics API client and the [`AnomalyApi`] trait
//! - [`models`]: Wire records
//! - [`view`]: View models and chart transforms
//! - [`web`]: Axum server rendering the pages
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use anomaly_dashboard::client::{AnomalyApi, ClientConfig, HttpClient};
//! use anomaly_dashboard::models::AnomalyEventFilter;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = HttpClient::new(ClientConfig::new("http://localhost:8000"))?;
//!
//!     // Latest critical alerts
//!     let filter = AnomalyEventFilter::new()
//!         .is_alert(true)
//!         .alert_level("CRITICAL")
//!         .page(20, 0);
//!     let events = client.list_events(&filter).await?;
//!
//!     println!("Found {} critical alerts", events.len());
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod logging;
pub mod models;
pub mod view;
pub mod web;

pub use client::{AnomalyApi, ClientConfig, ClientError, ClientResult, HttpClient};

pub use models::{
    AlertTimelineResponse, AlertTrend, AnomalyEvent, AnomalyEventFilter, AnomalyEventStats,
    DashboardOverview, GroupBy, HealthStatus, ServiceAlertSummary, TimeWindow, TimelineQuery,
};

pub use view::{
    DashboardData, DashboardState, DashboardViewModel, DetailState, EventDetailViewModel,
    EventFilters, EventsViewModel, LoadState,
};

pub use web::{build_router, serve, AppState, WebError, WebResult};

pub use config::{Config, ConfigError, LoggingConfig, ServerConfig, UpstreamConfig};
