//! # photoflow-service
//!
//! Use-case layer for PhotoFlow. Each service orchestrates the document
//! store, repositories, and pipeline supervisor to implement one area of
//! the public API.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod event;
pub mod photo;
pub mod stats;

pub use event::EventService;
pub use photo::{PhotoService, UploadService, UploadedFile};
pub use stats::{StatsService, StatsSnapshot};
