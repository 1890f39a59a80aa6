//! Aggregate statistics and full data reset.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use photoflow_core::result::AppResult;
use photoflow_database::repositories::{EventRepository, PhotoRepository};
use photoflow_database::store::DocumentStore;
use photoflow_entity::photo::PhotoStats;

/// Photo counts per status plus the size of the event log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSnapshot {
    /// Photo counts.
    #[serde(flatten)]
    pub photos: PhotoStats,
    /// Number of recorded events.
    pub total_events: usize,
}

/// Computes statistics and wipes all data on request.
#[derive(Debug, Clone)]
pub struct StatsService {
    /// Document store.
    store: Arc<DocumentStore>,
    /// Photo repository.
    photos: Arc<PhotoRepository>,
    /// Event repository.
    events: Arc<EventRepository>,
}

impl StatsService {
    /// Creates a new stats service.
    pub fn new(
        store: Arc<DocumentStore>,
        photos: Arc<PhotoRepository>,
        events: Arc<EventRepository>,
    ) -> Self {
        Self {
            store,
            photos,
            events,
        }
    }

    /// Current statistics.
    pub async fn stats(&self) -> StatsSnapshot {
        StatsSnapshot {
            photos: self.photos.stats().await,
            total_events: self.events.count().await,
        }
    }

    /// Delete every photo, event, and stored file.
    ///
    /// Runs still in flight see their photos vanish and stop without
    /// recreating them. Returns the number of files removed.
    pub async fn reset(&self) -> AppResult<usize> {
        let removed = self.store.reset().await?;
        info!(files_removed = removed, "All data cleared");
        Ok(removed)
    }
}
