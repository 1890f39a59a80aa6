//! Repository implementations over the document store.

pub mod event;
pub mod photo;

pub use event::{DEFAULT_EVENT_LIMIT, EventRepository};
pub use photo::PhotoRepository;
