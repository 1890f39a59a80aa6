//! Single-file JSON document store.

use std::ffi::OsString;
use std::io::ErrorKind as IoErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, error, info, warn};

use photoflow_core::config::StorageConfig;
use photoflow_core::error::{AppError, ErrorKind};
use photoflow_core::result::AppResult;
use photoflow_entity::document::Document;

use crate::lock::SerializationLock;

/// Persists the whole [`Document`] as one pretty-printed JSON file and owns
/// the upload directory the stored photo files live in.
///
/// Writes go to `<file>.tmp` first and are renamed over the canonical path,
/// so a reader never observes a half-written document. The store owns the
/// [`SerializationLock`] that every repository built on it shares.
#[derive(Debug)]
pub struct DocumentStore {
    document_path: PathBuf,
    temp_path: PathBuf,
    upload_dir: PathBuf,
    public_path: String,
    lock: Arc<SerializationLock>,
}

impl DocumentStore {
    /// Create a store from the storage configuration.
    pub fn new(config: &StorageConfig) -> Self {
        Self::with_paths(
            &config.document_path,
            &config.upload_dir,
            config.public_path.clone(),
        )
    }

    /// Create a store over explicit paths.
    pub fn with_paths(
        document_path: impl Into<PathBuf>,
        upload_dir: impl Into<PathBuf>,
        public_path: impl Into<String>,
    ) -> Self {
        let document_path = document_path.into();
        let temp_path = temp_path_for(&document_path);
        Self {
            document_path,
            temp_path,
            upload_dir: upload_dir.into(),
            public_path: public_path.into(),
            lock: Arc::new(SerializationLock::new()),
        }
    }

    /// Path of the canonical document file.
    pub fn document_path(&self) -> &Path {
        &self.document_path
    }

    /// Path of the staging file written before each rename.
    pub fn temp_path(&self) -> &Path {
        &self.temp_path
    }

    /// Directory holding the uploaded files.
    pub fn upload_dir(&self) -> &Path {
        &self.upload_dir
    }

    /// URL prefix the upload directory is served under.
    pub fn public_path(&self) -> &str {
        &self.public_path
    }

    /// Public URL of a stored file.
    pub fn public_url(&self, filename: &str) -> String {
        format!("{}/{}", self.public_path.trim_end_matches('/'), filename)
    }

    /// On-disk location of a stored file.
    pub fn upload_path(&self, filename: &str) -> PathBuf {
        self.upload_dir.join(filename)
    }

    /// The lock serializing mutations of this store.
    pub fn lock(&self) -> Arc<SerializationLock> {
        Arc::clone(&self.lock)
    }

    /// Prepare the directories and make sure a valid document exists.
    ///
    /// A missing or unparsable document is replaced with an empty one; a
    /// valid document is left untouched.
    pub async fn initialize(&self) -> AppResult<()> {
        fs::create_dir_all(&self.upload_dir).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create upload directory {}", self.upload_dir.display()),
                e,
            )
        })?;

        if let Some(parent) = self.document_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await.map_err(|e| {
                    AppError::with_source(
                        ErrorKind::Storage,
                        format!("Failed to create document directory {}", parent.display()),
                        e,
                    )
                })?;
            }
        }

        let valid = match fs::read_to_string(&self.document_path).await {
            Ok(content) => serde_json::from_str::<Document>(&content).is_ok(),
            Err(_) => false,
        };

        if valid {
            debug!(path = %self.document_path.display(), "Document store already initialized");
        } else {
            self.write(&Document::empty()).await?;
            info!(path = %self.document_path.display(), "Initialized empty document store");
        }
        Ok(())
    }

    /// Load the current document.
    ///
    /// Never fails: a missing, empty, unreadable, or corrupt file yields an
    /// empty document.
    pub async fn read(&self) -> Document {
        let content = match fs::read_to_string(&self.document_path).await {
            Ok(content) => content,
            Err(e) if e.kind() == IoErrorKind::NotFound => {
                debug!(path = %self.document_path.display(), "Document file missing, using empty document");
                return Document::empty();
            }
            Err(e) => {
                warn!(path = %self.document_path.display(), error = %e, "Failed to read document, using empty document");
                return Document::empty();
            }
        };

        if content.trim().is_empty() {
            debug!(path = %self.document_path.display(), "Document file empty, using empty document");
            return Document::empty();
        }

        match serde_json::from_str(&content) {
            Ok(document) => document,
            Err(e) => {
                warn!(path = %self.document_path.display(), error = %e, "Failed to parse document, using empty document");
                Document::empty()
            }
        }
    }

    /// Persist `document`, replacing the previous contents atomically.
    ///
    /// Callers mutating the document must hold the store lock.
    pub async fn write(&self, document: &Document) -> AppResult<()> {
        let result = self.write_staged(document).await;
        if let Err(e) = &result {
            error!(path = %self.document_path.display(), error = %e, "Failed to write document");
        }
        result
    }

    async fn write_staged(&self, document: &Document) -> AppResult<()> {
        let bytes = serde_json::to_vec_pretty(document)?;

        let mut file = fs::File::create(&self.temp_path).await.map_err(|e| {
            AppError::with_source(ErrorKind::Storage, "Failed to create staging file", e)
        })?;
        file.write_all(&bytes).await.map_err(|e| {
            AppError::with_source(ErrorKind::Storage, "Failed to write staging file", e)
        })?;
        file.sync_all().await.map_err(|e| {
            AppError::with_source(ErrorKind::Storage, "Failed to flush staging file", e)
        })?;
        drop(file);

        fs::rename(&self.temp_path, &self.document_path)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Storage, "Failed to commit document", e)
            })
    }

    /// Delete every file in the upload directory.
    ///
    /// Individual failures are logged and skipped. Returns how many files
    /// were removed.
    pub async fn clear_uploads(&self) -> AppResult<usize> {
        let mut entries = match fs::read_dir(&self.upload_dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == IoErrorKind::NotFound => return Ok(0),
            Err(e) => {
                return Err(AppError::with_source(
                    ErrorKind::Storage,
                    "Failed to list upload directory",
                    e,
                ));
            }
        };

        let mut removed = 0;
        loop {
            let entry = match entries.next_entry().await {
                Ok(Some(entry)) => entry,
                Ok(None) => break,
                Err(e) => {
                    warn!(error = %e, "Failed to read upload directory entry");
                    break;
                }
            };
            let path = entry.path();
            match fs::remove_file(&path).await {
                Ok(()) => removed += 1,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Failed to remove uploaded file");
                }
            }
        }

        info!(removed, "Cleared upload directory");
        Ok(removed)
    }

    /// Wipe all photos and events, then clear the upload directory.
    ///
    /// Returns the number of files removed.
    pub async fn reset(&self) -> AppResult<usize> {
        self.lock
            .with_lock(|| async { self.write(&Document::empty()).await })
            .await?;
        info!("Document store reset");
        self.clear_uploads().await
    }
}

fn temp_path_for(document_path: &Path) -> PathBuf {
    let mut name = OsString::from(document_path.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}
