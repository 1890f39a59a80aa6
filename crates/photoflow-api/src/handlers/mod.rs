//! HTTP request handlers.

pub mod event;
pub mod health;
pub mod photo;
pub mod stats;

use crate::error::ApiError;
use photoflow_core::error::AppError;

/// Fallback for unknown routes.
pub async fn not_found() -> ApiError {
    AppError::not_found("Route not found").into()
}
