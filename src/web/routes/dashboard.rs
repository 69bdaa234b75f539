//! Dashboard Routes
//!
//! - GET / - Dashboard page from the shared view model
//! - POST /refresh - Run one load cycle now, then redirect back

use axum::{
    extract::State,
    response::{Html, Redirect},
};
use std::sync::Arc;

use crate::web::render;
use crate::web::state::AppState;

/// GET /
///
/// Renders whatever the view model currently holds; its timer keeps
/// the data fresh.
pub async fn page(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(render::dashboard::render(&state.dashboard.snapshot()))
}

/// POST /refresh
///
/// Manual refresh and the retry control of the error panel.
pub async fn refresh(State(state): State<Arc<AppState>>) -> Redirect {
    tracing::debug!("Manual dashboard refresh");
    state.dashboard.refresh().await;
    Redirect::to("/")
}
