//! Health Routes
//!
//! - GET /health/live - Liveness probe (process is alive)
//! - GET /health - Dashboard state plus upstream health

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::view::LoadState;
use crate::web::dto::{HealthResponse, UpstreamHealth};
use crate::web::state::AppState;

/// GET /health/live
///
/// Returns 200 if the process is alive, no dependency checks.
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// GET /health
///
/// Probes the upstream API once per call. An unreachable upstream makes
/// the dashboard "degraded", never unhealthy: pages still render.
pub async fn full_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let base_url = state.config.upstream.base_url.clone();

    let upstream = match state.api.health_check().await {
        Ok(health) => UpstreamHealth {
            status: health.status,
            base_url,
            service: Some(health.service),
            version: Some(health.version),
            error: None,
        },
        Err(e) => {
            tracing::warn!(error = %e, "Upstream health check failed");
            UpstreamHealth {
                status: "unreachable".to_string(),
                base_url,
                service: None,
                version: None,
                error: Some(e.to_string()),
            }
        }
    };

    let dashboard = match state.dashboard.snapshot() {
        LoadState::Ready(_) => "ready",
        LoadState::Loading { .. } => "loading",
        LoadState::Error(_) => "error",
    };

    let status = if upstream.error.is_none() {
        "healthy"
    } else {
        "degraded"
    };

    Json(HealthResponse {
        status: status.to_string(),
        dashboard: dashboard.to_string(),
        upstream,
        uptime_seconds: state.uptime_seconds(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
