//! Audit event entities.

pub mod kind;
pub mod model;

pub use kind::EventKind;
pub use model::Event;
