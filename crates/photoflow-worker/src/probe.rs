//! Image metadata probing.

use std::path::Path;

use async_trait::async_trait;
use image::ImageReader;
use tokio::fs;
use tracing::debug;

use photoflow_core::error::{AppError, ErrorKind};
use photoflow_core::result::AppResult;
use photoflow_core::traits::{MetadataProbe, ProbedImage};
use photoflow_entity::photo::PhotoMetadata;

/// Reads format and dimensions from an image header with the `image` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageProbe;

impl ImageProbe {
    /// Create a new probe.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl MetadataProbe for ImageProbe {
    async fn probe(&self, path: &Path) -> AppResult<ProbedImage> {
        let path = path.to_path_buf();
        tokio::task::spawn_blocking(move || read_header(&path))
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Internal, "Image probe task failed", e))?
    }
}

fn read_header(path: &Path) -> AppResult<ProbedImage> {
    let reader = ImageReader::open(path)?.with_guessed_format()?;
    let format = reader.format().ok_or_else(|| {
        AppError::validation(format!("Unrecognized image format: {}", path.display()))
    })?;
    let (width, height) = reader.into_dimensions().map_err(|e| {
        AppError::with_source(ErrorKind::Validation, "Failed to read image header", e)
    })?;
    Ok(ProbedImage {
        width,
        height,
        format: format!("{format:?}").to_uppercase(),
    })
}

/// Build the metadata recorded for a successfully processed file.
///
/// If the probe cannot read the image, dimensions fall back to
/// `"Unknown"` and the format to the upper-cased file extension. Failing
/// to stat the file is an error.
pub async fn describe_file(probe: &dyn MetadataProbe, path: &Path) -> AppResult<PhotoMetadata> {
    let bytes = fs::metadata(path)
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to stat {}: {e}", path.display()),
                e,
            )
        })?
        .len();
    let size = PhotoMetadata::format_size(bytes);

    match probe.probe(path).await {
        Ok(image) => Ok(PhotoMetadata {
            dimensions: image.dimensions(),
            size,
            format: image.format,
        }),
        Err(e) => {
            debug!(path = %path.display(), error = %e, "Probe failed, using file facts");
            Ok(PhotoMetadata {
                dimensions: PhotoMetadata::UNKNOWN_DIMENSIONS.to_string(),
                size,
                format: extension_format(path),
            })
        }
    }
}

fn extension_format(path: &Path) -> String {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_uppercase)
        .unwrap_or_default()
}
