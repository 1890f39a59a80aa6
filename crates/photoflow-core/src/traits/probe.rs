//! Image metadata probe trait.

use std::path::Path;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::result::AppResult;

/// What a probe learned about an image file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Upper-case format name (e.g. `"JPEG"`, `"PNG"`).
    pub format: String,
}

impl ProbedImage {
    /// Dimensions rendered as `"<width>x<height>"`.
    pub fn dimensions(&self) -> String {
        format!("{}x{}", self.width, self.height)
    }
}

/// Inspects a stored image file.
///
/// The pipeline treats any error as "probe unavailable" and falls back to
/// filesystem facts, so implementations need not be exhaustive.
#[async_trait]
pub trait MetadataProbe: Send + Sync + std::fmt::Debug + 'static {
    /// Return dimensions and format of the image at `path`.
    async fn probe(&self, path: &Path) -> AppResult<ProbedImage>;
}
