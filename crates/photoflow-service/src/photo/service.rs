//! Photo listing, lookup, and deletion.

use std::sync::Arc;

use serde_json::json;
use tokio::fs;
use tracing::{info, warn};

use photoflow_core::error::AppError;
use photoflow_core::result::AppResult;
use photoflow_core::types::PhotoId;
use photoflow_database::repositories::{EventRepository, PhotoRepository};
use photoflow_database::store::DocumentStore;
use photoflow_entity::event::EventKind;
use photoflow_entity::photo::{Photo, PhotoStatus};

/// Handles photo record queries and deletion.
#[derive(Debug, Clone)]
pub struct PhotoService {
    /// Document store (for upload paths).
    store: Arc<DocumentStore>,
    /// Photo repository.
    photos: Arc<PhotoRepository>,
    /// Event repository.
    events: Arc<EventRepository>,
}

impl PhotoService {
    /// Creates a new photo service.
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

    /// Lists photos, newest first, optionally filtered by status.
    pub async fn list(&self, status: Option<PhotoStatus>) -> Vec<Photo> {
        self.photos.find_all(status).await
    }

    /// Gets a single photo.
    pub async fn get(&self, id: PhotoId) -> AppResult<Photo> {
        self.photos
            .find_by_id(id)
            .await
            .ok_or_else(|| AppError::not_found("Photo not found"))
    }

    /// Deletes a photo record and its stored file.
    ///
    /// Removing the file is best-effort. A pipeline run still in flight
    /// for the photo ends without recreating it.
    pub async fn delete(&self, id: PhotoId) -> AppResult<Photo> {
        let photo = self
            .photos
            .delete(id)
            .await?
            .ok_or_else(|| AppError::not_found("Photo not found"))?;

        let path = self.store.upload_path(&photo.filename);
        if let Err(e) = fs::remove_file(&path).await {
            warn!(photo_id = %id, path = %path.display(), error = %e, "Failed to remove photo file");
        }

        self.events
            .create(
                id,
                EventKind::PhotoDeleted,
                json!({ "filename": photo.original_name }),
            )
            .await;

        info!(photo_id = %id, filename = %photo.filename, "Photo removed");
        Ok(photo)
    }
}
