//! Statistics and reset handlers.

use axum::Json;
use axum::extract::State;

use photoflow_service::StatsSnapshot;

use crate::dto::response::MessageResponse;
use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/stats
pub async fn stats(State(state): State<AppState>) -> Json<StatsSnapshot> {
    Json(state.stats_service.stats().await)
}

/// POST /api/reset
pub async fn reset(State(state): State<AppState>) -> Result<Json<MessageResponse>, ApiError> {
    state.stats_service.reset().await?;
    Ok(Json(MessageResponse::new("All data cleared successfully")))
}
