//! Photo services: upload intake and record management.

pub mod service;
pub mod upload;

pub use service::PhotoService;
pub use upload::{UploadService, UploadedFile};
