//! Route definitions for the PhotoFlow HTTP API.
//!
//! JSON routes are mounted under `/api`; stored files are served under the
//! configured public path. The router receives `AppState` and passes it to
//! all handlers via Axum's `State` extractor.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post},
};
use tower_http::compression::CompressionLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let max_body = state.config.storage.max_request_bytes();
    let public_path = state.config.storage.public_path.trim_end_matches('/').to_string();
    let uploads = ServeDir::new(state.store.upload_dir());

    let api_routes = Router::new()
        .merge(health_routes())
        .merge(photo_routes())
        .merge(event_routes())
        .merge(stats_routes());

    let cors = middleware::cors::build_cors_layer(&state.config.server.cors);

    Router::new()
        .nest("/api", api_routes)
        .nest_service(&public_path, uploads)
        .fallback(handlers::not_found)
        .layer(DefaultBodyLimit::max(max_body))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Liveness
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}

/// Upload, list, get, delete
fn photo_routes() -> Router<AppState> {
    Router::new()
        .route("/photos/upload", post(handlers::photo::upload_photos))
        .route("/photos", get(handlers::photo::list_photos))
        .route(
            "/photos/{id}",
            get(handlers::photo::get_photo).delete(handlers::photo::delete_photo),
        )
}

/// Event log
fn event_routes() -> Router<AppState> {
    Router::new().route("/events", get(handlers::event::list_events))
}

/// Stats and reset
fn stats_routes() -> Router<AppState> {
    Router::new()
        .route("/stats", get(handlers::stats::stats))
        .route("/reset", post(handlers::stats::reset))
}
