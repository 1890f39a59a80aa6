//! # photoflow-entity
//!
//! Domain entity models for PhotoFlow. Every struct here is part of the
//! single persisted JSON document; field names serialize in camelCase to
//! match the on-disk format.

pub mod document;
pub mod event;
pub mod photo;

pub use document::Document;
pub use event::{Event, EventKind};
pub use photo::{CreatePhoto, Photo, PhotoMetadata, PhotoPatch, PhotoStats, PhotoStatus};
