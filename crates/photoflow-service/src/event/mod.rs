//! Event log queries.

pub mod service;

pub use service::EventService;
