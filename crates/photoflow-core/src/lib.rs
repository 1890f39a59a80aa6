//! # photoflow-core
//!
//! Core crate for PhotoFlow. Contains configuration schemas, typed
//! identifiers, the metadata probe trait, and the unified error system.
//!
//! This crate has **no** internal dependencies on other PhotoFlow crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
