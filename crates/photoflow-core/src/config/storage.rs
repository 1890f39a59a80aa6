//! Document file and upload directory configuration.

use serde::{Deserialize, Serialize};

/// Where the shared document and the uploaded files live.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Path of the JSON document holding all photos and events.
    #[serde(default = "default_document_path")]
    pub document_path: String,
    /// Flat directory receiving uploaded files.
    #[serde(default = "default_upload_dir")]
    pub upload_dir: String,
    /// URL prefix under which uploaded files are served.
    #[serde(default = "default_public_path")]
    pub public_path: String,
    /// Maximum size of a single uploaded file in bytes (default 100 MB).
    #[serde(default = "default_max_file_size")]
    pub max_file_size_bytes: u64,
    /// Maximum number of files accepted by one upload request.
    #[serde(default = "default_max_files")]
    pub max_files_per_upload: usize,
    /// Accepted file extensions (lowercase, without the dot).
    #[serde(default = "default_allowed_extensions")]
    pub allowed_extensions: Vec<String>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            document_path: default_document_path(),
            upload_dir: default_upload_dir(),
            public_path: default_public_path(),
            max_file_size_bytes: default_max_file_size(),
            max_files_per_upload: default_max_files(),
            allowed_extensions: default_allowed_extensions(),
        }
    }
}

impl StorageConfig {
    /// Upper bound on a whole upload request body.
    pub fn max_request_bytes(&self) -> usize {
        let per_file = usize::try_from(self.max_file_size_bytes).unwrap_or(usize::MAX);
        per_file.saturating_mul(self.max_files_per_upload)
    }
}

fn default_document_path() -> String {
    "database.json".to_string()
}

fn default_upload_dir() -> String {
    "uploads".to_string()
}

fn default_public_path() -> String {
    "/uploads".to_string()
}

fn default_max_file_size() -> u64 {
    104_857_600 // 100 MB
}

fn default_max_files() -> usize {
    10
}

fn default_allowed_extensions() -> Vec<String> {
    ["jpeg", "jpg", "png", "gif", "webp"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}
