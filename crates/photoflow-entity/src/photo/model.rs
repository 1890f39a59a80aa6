//! Photo entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use photoflow_core::types::PhotoId;

use super::metadata::PhotoMetadata;
use super::status::PhotoStatus;

/// An uploaded photo tracked through the processing pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    /// Unique photo identifier.
    pub id: PhotoId,
    /// Name of the stored file inside the upload directory.
    pub filename: String,
    /// File name as supplied by the uploader.
    pub original_name: String,
    /// Public path the stored file is served from.
    pub url: String,
    /// Size in bytes.
    pub size: u64,
    /// Declared media type.
    pub mimetype: String,
    /// Lifecycle status.
    pub status: PhotoStatus,
    /// Progress percentage, 0 to 100.
    pub progress: u8,
    /// Failure message, present only for failed photos.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Public path of the processed output.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processed_url: Option<String>,
    /// Metadata gathered on successful processing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<PhotoMetadata>,
    /// When the photo was uploaded.
    pub created_at: DateTime<Utc>,
    /// When the photo was last mutated.
    pub updated_at: DateTime<Utc>,
}

impl Photo {
    /// Build a freshly uploaded photo: pending, progress 0.
    pub fn new(data: CreatePhoto, public_path: &str) -> Self {
        let now = Utc::now();
        let url = format!("{}/{}", public_path.trim_end_matches('/'), data.filename);
        Self {
            id: PhotoId::new(),
            filename: data.filename,
            original_name: data.original_name,
            url,
            size: data.size,
            mimetype: data.mimetype,
            status: PhotoStatus::Pending,
            progress: 0,
            error: None,
            processed_url: None,
            metadata: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Merge the fields set in `patch` and refresh `updated_at`.
    pub fn apply(&mut self, patch: PhotoPatch) {
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(progress) = patch.progress {
            self.progress = progress.min(100);
        }
        if let Some(error) = patch.error {
            self.error = error;
        }
        if let Some(processed_url) = patch.processed_url {
            self.processed_url = processed_url;
        }
        if let Some(metadata) = patch.metadata {
            self.metadata = metadata;
        }
        self.updated_at = Utc::now();
    }
}

/// Data supplied by the upload path for each stored file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePhoto {
    /// Stored file name (generated token plus original extension).
    pub filename: String,
    /// File name as supplied by the uploader.
    pub original_name: String,
    /// Size in bytes.
    pub size: u64,
    /// Declared media type.
    pub mimetype: String,
}

/// A partial update to a photo.
///
/// Outer `None` leaves a field untouched. For the optional fields,
/// `Some(None)` clears the stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PhotoPatch {
    /// New status.
    pub status: Option<PhotoStatus>,
    /// New progress.
    pub progress: Option<u8>,
    /// New (or cleared) error message.
    pub error: Option<Option<String>>,
    /// New (or cleared) processed output path.
    pub processed_url: Option<Option<String>>,
    /// New (or cleared) metadata.
    pub metadata: Option<Option<PhotoMetadata>>,
}

impl PhotoPatch {
    /// Successful completion: progress 100, metadata attached, error cleared.
    pub fn completed(metadata: PhotoMetadata, processed_url: String) -> Self {
        Self {
            status: Some(PhotoStatus::Completed),
            progress: Some(100),
            error: Some(None),
            processed_url: Some(Some(processed_url)),
            metadata: Some(Some(metadata)),
        }
    }

    /// Failure: progress reset to 0 with an error message.
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            status: Some(PhotoStatus::Failed),
            progress: Some(0),
            error: Some(Some(error.into())),
            ..Self::default()
        }
    }
}

/// Photo counts per status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoStats {
    /// All photos.
    pub total: usize,
    /// Photos waiting for processing.
    pub pending: usize,
    /// Photos currently processing.
    pub processing: usize,
    /// Successfully processed photos.
    pub completed: usize,
    /// Photos whose processing failed.
    pub failed: usize,
}

impl PhotoStats {
    /// Tally the given photos by status.
    pub fn tally<'a>(photos: impl IntoIterator<Item = &'a Photo>) -> Self {
        let mut stats = Self::default();
        for photo in photos {
            stats.total += 1;
            match photo.status {
                PhotoStatus::Pending => stats.pending += 1,
                PhotoStatus::Processing => stats.processing += 1,
                PhotoStatus::Completed => stats.completed += 1,
                PhotoStatus::Failed => stats.failed += 1,
            }
        }
        stats
    }
}
