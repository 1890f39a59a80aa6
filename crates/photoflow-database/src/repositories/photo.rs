//! Photo repository implementation.

use std::sync::Arc;

use tracing::{debug, info};

use photoflow_core::result::AppResult;
use photoflow_core::types::PhotoId;
use photoflow_entity::photo::{CreatePhoto, Photo, PhotoPatch, PhotoStats, PhotoStatus};

use crate::lock::SerializationLock;
use crate::store::DocumentStore;

/// Repository for photo records.
///
/// Mutations run as locked read-modify-write cycles on the document; reads
/// take an unlocked snapshot.
#[derive(Debug, Clone)]
pub struct PhotoRepository {
    store: Arc<DocumentStore>,
    lock: Arc<SerializationLock>,
}

impl PhotoRepository {
    /// Create a new photo repository over `store`.
    pub fn new(store: Arc<DocumentStore>) -> Self {
        let lock = store.lock();
        Self { store, lock }
    }

    /// Create a pending photo record.
    pub async fn create(&self, data: CreatePhoto) -> AppResult<Photo> {
        self.lock
            .with_lock(|| async move {
                let mut document = self.store.read().await;
                let photo = Photo::new(data, self.store.public_path());
                document.photos.push(photo.clone());
                self.store.write(&document).await?;
                info!(photo_id = %photo.id, filename = %photo.filename, "Photo created");
                Ok(photo)
            })
            .await
    }

    /// List photos, newest first, optionally filtered by status.
    ///
    /// Photos sharing a creation time keep reverse insertion order.
    pub async fn find_all(&self, status: Option<PhotoStatus>) -> Vec<Photo> {
        let mut photos: Vec<Photo> = self
            .store
            .read()
            .await
            .photos
            .into_iter()
            .filter(|p| status.is_none_or(|s| p.status == s))
            .collect();
        photos.reverse();
        photos.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        photos
    }

    /// Find a photo by ID.
    pub async fn find_by_id(&self, id: PhotoId) -> Option<Photo> {
        self.store
            .read()
            .await
            .photos
            .into_iter()
            .find(|p| p.id == id)
    }

    /// Set progress and status. Returns `None` when the photo no longer exists.
    pub async fn update_progress(
        &self,
        id: PhotoId,
        progress: u8,
        status: PhotoStatus,
    ) -> AppResult<Option<Photo>> {
        self.update(
            id,
            PhotoPatch {
                status: Some(status),
                progress: Some(progress),
                ..PhotoPatch::default()
            },
        )
        .await
    }

    /// Merge `patch` into the photo. Returns `None` when the photo no longer exists.
    pub async fn update(&self, id: PhotoId, patch: PhotoPatch) -> AppResult<Option<Photo>> {
        self.lock
            .with_lock(|| async move {
                let mut document = self.store.read().await;
                let Some(photo) = document.photo_mut(id) else {
                    debug!(photo_id = %id, "Photo not found, skipping update");
                    return Ok(None);
                };
                photo.apply(patch);
                let updated = photo.clone();
                self.store.write(&document).await?;
                debug!(
                    photo_id = %id,
                    status = %updated.status,
                    progress = updated.progress,
                    "Photo updated"
                );
                Ok(Some(updated))
            })
            .await
    }

    /// Remove a photo record. Returns the removed photo, if it existed.
    pub async fn delete(&self, id: PhotoId) -> AppResult<Option<Photo>> {
        self.lock
            .with_lock(|| async move {
                let mut document = self.store.read().await;
                let Some(index) = document.photo_index(id) else {
                    debug!(photo_id = %id, "Photo not found, nothing to delete");
                    return Ok(None);
                };
                let removed = document.photos.remove(index);
                self.store.write(&document).await?;
                info!(photo_id = %id, "Photo deleted");
                Ok(Some(removed))
            })
            .await
    }

    /// Count photos per status.
    pub async fn stats(&self) -> PhotoStats {
        let document = self.store.read().await;
        PhotoStats::tally(&document.photos)
    }
}
