//! Audit event entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use photoflow_core::types::{EventId, PhotoId};

use super::kind::EventKind;

/// An immutable audit record of a photo lifecycle transition.
///
/// `photo_id` is a weak reference: the photo may have been deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Unique event identifier.
    pub id: EventId,
    /// The photo this event refers to.
    pub photo_id: PhotoId,
    /// What happened.
    pub event: EventKind,
    /// Free-form details (progress, stage label, error, ...).
    #[serde(default)]
    pub details: serde_json::Value,
    /// When the event was recorded.
    pub timestamp: DateTime<Utc>,
}

impl Event {
    /// Create a new event stamped with `timestamp`.
    pub fn new(
        photo_id: PhotoId,
        event: EventKind,
        details: serde_json::Value,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: EventId::new(),
            photo_id,
            event,
            details,
            timestamp,
        }
    }
}
