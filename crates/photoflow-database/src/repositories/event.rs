//! Event log repository implementation.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, error};

use photoflow_core::error::AppError;
use photoflow_core::types::PhotoId;
use photoflow_entity::event::{Event, EventKind};

use crate::lock::SerializationLock;
use crate::store::DocumentStore;

/// Number of events returned when the caller gives no limit.
pub const DEFAULT_EVENT_LIMIT: usize = 100;

/// Repository for the append-only event log.
#[derive(Debug, Clone)]
pub struct EventRepository {
    store: Arc<DocumentStore>,
    lock: Arc<SerializationLock>,
}

impl EventRepository {
    /// Create a new event repository over `store`.
    pub fn new(store: Arc<DocumentStore>) -> Self {
        let lock = store.lock();
        Self { store, lock }
    }

    /// Append an event for `photo_id`.
    ///
    /// Recording an event never fails the caller: errors are logged and
    /// `None` is returned. The timestamp never precedes the last appended
    /// event.
    pub async fn create(
        &self,
        photo_id: PhotoId,
        kind: EventKind,
        details: serde_json::Value,
    ) -> Option<Event> {
        let result = self
            .lock
            .with_lock(|| async move {
                let mut document = self.store.read().await;
                let now = Utc::now();
                let timestamp = match document.events.last() {
                    Some(last) if last.timestamp > now => last.timestamp,
                    _ => now,
                };
                let event = Event::new(photo_id, kind, details, timestamp);
                document.events.push(event.clone());
                self.store.write(&document).await?;
                Ok::<_, AppError>(event)
            })
            .await;

        match result {
            Ok(event) => {
                debug!(photo_id = %photo_id, event = %kind, "Event recorded");
                Some(event)
            }
            Err(e) => {
                error!(photo_id = %photo_id, event = %kind, error = %e, "Failed to record event");
                None
            }
        }
    }

    /// List events, newest first, optionally for one photo, at most `limit`.
    ///
    /// Events sharing a timestamp are returned later-appended first.
    pub async fn find_all(&self, photo_id: Option<PhotoId>, limit: usize) -> Vec<Event> {
        let mut events: Vec<Event> = self
            .store
            .read()
            .await
            .events
            .into_iter()
            .filter(|e| photo_id.is_none_or(|id| e.photo_id == id))
            .collect();
        events.reverse();
        events.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        events.truncate(limit);
        events
    }

    /// Total number of recorded events.
    pub async fn count(&self) -> usize {
        self.store.read().await.events.len()
    }
}
