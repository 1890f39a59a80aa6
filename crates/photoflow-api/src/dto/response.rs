//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use photoflow_entity::event::Event;
use photoflow_entity::photo::Photo;

/// Body carrying only a message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Human-readable outcome.
    pub message: String,
}

impl MessageResponse {
    /// Creates a message response.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Result of an upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    /// Human-readable outcome.
    pub message: String,
    /// Created photos, all pending.
    pub photos: Vec<Photo>,
}

/// A list of photos.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhotoListResponse {
    /// Photos, newest first.
    pub photos: Vec<Photo>,
    /// Number of photos returned.
    pub total: usize,
}

impl From<Vec<Photo>> for PhotoListResponse {
    fn from(photos: Vec<Photo>) -> Self {
        Self {
            total: photos.len(),
            photos,
        }
    }
}

/// A list of events.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventListResponse {
    /// Events, newest first.
    pub events: Vec<Event>,
    /// Number of events returned.
    pub total: usize,
}

impl From<Vec<Event>> for EventListResponse {
    fn from(events: Vec<Event>) -> Self {
        Self {
            total: events.len(),
            events,
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Current server time.
    pub timestamp: DateTime<Utc>,
    /// Seconds since the server started.
    pub uptime_seconds: f64,
    /// Pipeline runs still in flight.
    pub active_runs: usize,
}
