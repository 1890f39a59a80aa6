//! Metadata attached to a successfully processed photo.

use serde::{Deserialize, Serialize};

/// Human-readable facts about a processed image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoMetadata {
    /// `"<width>x<height>"`, or `"Unknown"` when the image could not be probed.
    pub dimensions: String,
    /// File size rendered in megabytes, e.g. `"1.25 MB"`.
    pub size: String,
    /// Upper-case format name.
    pub format: String,
}

impl PhotoMetadata {
    /// Placeholder used when the image itself cannot be inspected.
    pub const UNKNOWN_DIMENSIONS: &'static str = "Unknown";

    /// Render a byte count the way the metadata `size` field expects.
    pub fn format_size(bytes: u64) -> String {
        format!("{:.2} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
