//! Dashboard Web Server
//!
//! Server-rendered HTML pages over the view models, built with Axum.
//!
//! # Routes
//!
//! ## Pages
//! - `GET /` - Dashboard overview
//! - `POST /refresh` - Manual refresh / retry, redirects to `/`
//! - `GET /events` - Event list (`is_alert`, `alert_type`, `alert_level`, `user_id`, `page`)
//! - `GET /events/:event_id` - Event detail
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health` - Dashboard and upstream health
//!
//! # Example
//!
//! ```rust,ignore
//! use anomaly_dashboard::client::{ClientConfig, HttpClient};
//! use anomaly_dashboard::view::DashboardViewModel;
//! use anomaly_dashboard::web::{serve, AppState};
//! use anomaly_dashboard::Config;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::default();
//!     let api = Arc::new(HttpClient::new(config.upstream.client_config())?);
//!     let dashboard = DashboardViewModel::mount(api.clone());
//!
//!     let server = config.server.clone();
//!     serve(AppState::new(api, dashboard.clone(), config), &server).await?;
//!     dashboard.unmount();
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod render;
pub mod routes;
pub mod state;

pub use error::{WebError, WebResult};
pub use state::AppState;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;

/// Build the router with all pages and middleware
pub fn build_router(state: AppState) -> Router {
    let page_routes = Router::new()
        .route("/", get(routes::dashboard::page))
        .route("/refresh", post(routes::dashboard::refresh))
        .route("/events", get(routes::events::list))
        .route("/events/:event_id", get(routes::events::detail));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/", get(routes::health::full_health));

    let shared_state = Arc::new(state);

    Router::new()
        .merge(page_routes)
        .nest("/health", health_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(shared_state)
}

/// Start the dashboard server
pub async fn serve(state: AppState, config: &ServerConfig) -> WebResult<()> {
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Anomaly dashboard listening on http://{}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| WebError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Anomaly dashboard shut down gracefully");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM. A handler that cannot be installed never fires.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
