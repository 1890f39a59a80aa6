//! Event log queries.

use std::sync::Arc;

use photoflow_core::types::PhotoId;
use photoflow_database::repositories::{DEFAULT_EVENT_LIMIT, EventRepository};
use photoflow_entity::event::Event;

/// Read access to the event log.
#[derive(Debug, Clone)]
pub struct EventService {
    /// Event repository.
    events: Arc<EventRepository>,
}

impl EventService {
    /// Creates a new event service.
    pub fn new(events: Arc<EventRepository>) -> Self {
        Self { events }
    }

    /// Lists events, newest first, optionally for one photo.
    ///
    /// `limit` defaults to 100.
    pub async fn list(&self, photo_id: Option<PhotoId>, limit: Option<usize>) -> Vec<Event> {
        self.events
            .find_all(photo_id, limit.unwrap_or(DEFAULT_EVENT_LIMIT))
            .await
    }
}
