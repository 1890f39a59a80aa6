//! # photoflow-api
//!
//! HTTP API layer for PhotoFlow built on Axum.
//!
//! Provides the REST endpoints under `/api`, static serving of uploaded
//! files, middleware (CORS, request logging), DTOs, and error mapping.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use error::ApiError;
pub use router::build_router;
pub use state::AppState;
