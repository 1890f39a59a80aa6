//! Request DTOs.

use serde::{Deserialize, Serialize};

/// Query parameters for listing photos.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListPhotosQuery {
    /// Only photos with this status.
    pub status: Option<String>,
}

/// Query parameters for listing events.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListEventsQuery {
    /// Only events for this photo.
    pub photo_id: Option<String>,
    /// Maximum number of events (default 100).
    pub limit: Option<usize>,
}
