//! Anomaly Dashboard Server
//!
//! Run with: cargo run --bin anomaly-dashboard
//!
//! # Configuration
//!
//! Read from `config.toml` (see `anomaly-cli config`), overridden by:
//! - `ANOMALY_API_URL`: Upstream API base URL (default: http://localhost:8000)
//! - `ANOMALY_API_TIMEOUT_SECS`: Upstream request timeout (default: 10)
//! - `ANOMALY_DASHBOARD_HOST`: Host to bind to (default: 0.0.0.0)
//! - `ANOMALY_DASHBOARD_PORT`: Port to listen on (default: 8084)
//! - `ANOMALY_LOG_LEVEL` / `ANOMALY_LOG_FORMAT`: Logging (`RUST_LOG` wins)

use anomaly_dashboard::client::{AnomalyApi, HttpClient};
use anomaly_dashboard::config::Config;
use anomaly_dashboard::logging::init_tracing;
use anomaly_dashboard::view::DashboardViewModel;
use anomaly_dashboard::web::{serve, AppState};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_default();
    init_tracing(&config.logging)?;

    tracing::info!("Starting Anomaly Dashboard v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Upstream API: {}", config.upstream.base_url);

    let client = HttpClient::new(config.upstream.client_config())?;
    let api: Arc<dyn AnomalyApi> = Arc::new(client);

    // Check upstream availability; the dashboard still starts without it
    match api.health_check().await {
        Ok(health) => tracing::info!(
            "Upstream connection verified: {} v{} ({})",
            health.service,
            health.version,
            health.status
        ),
        Err(e) => tracing::warn!("Upstream not available: {} (pages will show errors until it is)", e),
    }

    let dashboard = DashboardViewModel::mount(Arc::clone(&api));

    let server_config = config.server.clone();
    let state = AppState::new(api, Arc::clone(&dashboard), config);
    serve(state, &server_config).await?;

    dashboard.unmount();
    tracing::info!("Anomaly Dashboard stopped");

    Ok(())
}
