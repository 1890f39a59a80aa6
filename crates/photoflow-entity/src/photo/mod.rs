//! Photo domain entities.

pub mod metadata;
pub mod model;
pub mod status;

pub use metadata::PhotoMetadata;
pub use model::{CreatePhoto, Photo, PhotoPatch, PhotoStats};
pub use status::PhotoStatus;
