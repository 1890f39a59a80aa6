//! Convenience result type alias for PhotoFlow.

use crate::error::AppError;

/// A specialized `Result` type for PhotoFlow operations.
pub type AppResult<T> = Result<T, AppError>;
