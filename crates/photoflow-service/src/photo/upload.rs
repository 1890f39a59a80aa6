//! Photo upload intake: validation, file placement, record creation, and
//! pipeline launch.

use std::path::Path;
use std::sync::Arc;

use bytes::Bytes;
use serde_json::json;
use tokio::fs;
use tracing::info;
use uuid::Uuid;

use photoflow_core::config::StorageConfig;
use photoflow_core::error::{AppError, ErrorKind};
use photoflow_core::result::AppResult;
use photoflow_database::repositories::{EventRepository, PhotoRepository};
use photoflow_database::store::DocumentStore;
use photoflow_entity::event::EventKind;
use photoflow_entity::photo::{CreatePhoto, Photo};
use photoflow_worker::supervisor::PipelineSupervisor;

/// One file received in an upload request.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// File name as sent by the client.
    pub original_name: String,
    /// Declared media type.
    pub mimetype: String,
    /// File content.
    pub data: Bytes,
}

/// Accepts uploaded photos and hands them to the pipeline.
#[derive(Debug, Clone)]
pub struct UploadService {
    /// Document store (for upload paths).
    store: Arc<DocumentStore>,
    /// Photo repository.
    photos: Arc<PhotoRepository>,
    /// Event repository.
    events: Arc<EventRepository>,
    /// Pipeline supervisor.
    supervisor: PipelineSupervisor,
    /// Storage limits and allowed types.
    config: StorageConfig,
}

impl UploadService {
    /// Creates a new upload service.
    pub fn new(
        store: Arc<DocumentStore>,
        photos: Arc<PhotoRepository>,
        events: Arc<EventRepository>,
        supervisor: PipelineSupervisor,
        config: StorageConfig,
    ) -> Self {
        Self {
            store,
            photos,
            events,
            supervisor,
            config,
        }
    }

    /// Store a batch of files and start processing each of them.
    ///
    /// The whole batch is validated before anything is written. Returns the
    /// created photos, all still pending.
    pub async fn upload(&self, files: Vec<UploadedFile>) -> AppResult<Vec<Photo>> {
        if files.is_empty() {
            return Err(AppError::validation("No files uploaded"));
        }
        if files.len() > self.config.max_files_per_upload {
            return Err(AppError::validation(format!(
                "Too many files: at most {} per upload",
                self.config.max_files_per_upload
            )));
        }
        for file in &files {
            self.validate(file)?;
        }

        let mut photos = Vec::with_capacity(files.len());
        for file in files {
            let filename = format!("{}{}", Uuid::new_v4(), extension_of(&file.original_name));
            let path = self.store.upload_path(&filename);
            fs::write(&path, &file.data).await.map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to store {}", file.original_name),
                    e,
                )
            })?;

            let photo = self
                .photos
                .create(CreatePhoto {
                    filename,
                    original_name: file.original_name,
                    size: file.data.len() as u64,
                    mimetype: file.mimetype,
                })
                .await?;
            photos.push(photo);
        }

        for photo in &photos {
            self.events
                .create(
                    photo.id,
                    EventKind::PhotoUploaded,
                    json!({ "filename": photo.original_name, "size": photo.size }),
                )
                .await;
            self.supervisor.launch(photo.id);
        }

        info!(count = photos.len(), "Photos uploaded");
        Ok(photos)
    }

    fn validate(&self, file: &UploadedFile) -> AppResult<()> {
        if file.data.len() as u64 > self.config.max_file_size_bytes {
            return Err(AppError::validation(format!(
                "File too large: {} exceeds {} bytes",
                file.original_name, self.config.max_file_size_bytes
            )));
        }

        let extension = extension_of(&file.original_name)
            .trim_start_matches('.')
            .to_lowercase();
        let subtype = file
            .mimetype
            .to_lowercase()
            .strip_prefix("image/")
            .map(str::to_string)
            .unwrap_or_default();
        let allowed = |candidate: &str| {
            !candidate.is_empty()
                && self
                    .config
                    .allowed_extensions
                    .iter()
                    .any(|ext| ext.eq_ignore_ascii_case(candidate))
        };

        if allowed(&extension) && allowed(&subtype) {
            Ok(())
        } else {
            Err(AppError::validation("Only image files allowed"))
        }
    }
}

/// Extension of `name` including the leading dot, or empty.
fn extension_of(name: &str) -> String {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{ext}"))
        .unwrap_or_default()
}
