//! Event log handlers.

use axum::Json;
use axum::extract::{Query, State};

use photoflow_core::types::PhotoId;

use crate::dto::request::ListEventsQuery;
use crate::dto::response::EventListResponse;
use crate::state::AppState;

/// GET /api/events
pub async fn list_events(
    State(state): State<AppState>,
    Query(query): Query<ListEventsQuery>,
) -> Json<EventListResponse> {
    let photo_id = match query.photo_id.as_deref().filter(|s| !s.is_empty()) {
        None => None,
        Some(raw) => match raw.parse::<PhotoId>() {
            Ok(id) => Some(id),
            // Not a UUID, so no event can reference it.
            Err(_) => return Json(EventListResponse::from(Vec::new())),
        },
    };

    Json(state.event_service.list(photo_id, query.limit).await.into())
}
