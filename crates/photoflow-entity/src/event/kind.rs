//! Event kind enumeration.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The lifecycle transition an event records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// A file was uploaded and its photo record created.
    PhotoUploaded,
    /// A pipeline run entered the processing state.
    ProcessingStarted,
    /// A pipeline run reached an intermediate stage.
    ProgressUpdate,
    /// A pipeline run finished successfully.
    ProcessingCompleted,
    /// A pipeline run finished in failure.
    ProcessingFailed,
    /// A photo was deleted.
    PhotoDeleted,
}

impl EventKind {
    /// Check if this kind ends a pipeline run.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::ProcessingCompleted | Self::ProcessingFailed)
    }

    /// Return the kind as its snake_case tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PhotoUploaded => "photo_uploaded",
            Self::ProcessingStarted => "processing_started",
            Self::ProgressUpdate => "progress_update",
            Self::ProcessingCompleted => "processing_completed",
            Self::ProcessingFailed => "processing_failed",
            Self::PhotoDeleted => "photo_deleted",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
