//! # photoflow-database
//!
//! Persistence for PhotoFlow: a single JSON document on disk holding every
//! photo and event, the FIFO lock that serializes read-modify-write cycles
//! against it, and the repositories built on both.

pub mod lock;
pub mod repositories;
pub mod store;

pub use lock::{LockGuard, SerializationLock};
pub use repositories::{EventRepository, PhotoRepository};
pub use store::DocumentStore;
