//! Event Routes
//!
//! - GET /events - Filterable, paginated list
//! - GET /events/:event_id - Detail of one event
//!
//! Each request builds its own view model from the URL, so filter and
//! page state lives in the query string.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Html,
};
use std::sync::Arc;

use crate::view::{DetailState, EventDetailViewModel, EventsViewModel};
use crate::web::dto::EventsParams;
use crate::web::error::WebResult;
use crate::web::render;
use crate::web::state::AppState;

/// GET /events
pub async fn list(
    State(state): State<Arc<AppState>>,
    Query(params): Query<EventsParams>,
) -> WebResult<Html<String>> {
    let (filters, page) = params.parse()?;

    let mut vm = EventsViewModel::restore(Arc::clone(&state.api), filters, page);
    vm.load().await;

    Ok(Html(render::events::render(&vm)))
}

/// GET /events/:event_id
///
/// Answers 404 when the backend does not know the id, with the same
/// page shell and a back link.
pub async fn detail(
    State(state): State<Arc<AppState>>,
    Path(event_id): Path<String>,
) -> (StatusCode, Html<String>) {
    let mut vm = EventDetailViewModel::new(Arc::clone(&state.api));
    vm.set_event_id(event_id.as_str()).await;

    let status = match vm.state() {
        DetailState::NotFound => StatusCode::NOT_FOUND,
        _ => StatusCode::OK,
    };
    let self_href = format!("/events/{}", urlencoding::encode(&event_id));

    (status, Html(render::detail::render(vm.state(), &self_href)))
}
