//! The persisted aggregate holding every photo and event.

use serde::{Deserialize, Serialize};

use photoflow_core::types::PhotoId;

use crate::event::Event;
use crate::photo::Photo;

/// The whole store contents, persisted as one JSON file.
///
/// Both sequences keep insertion order; every mutation rewrites the
/// document as a unit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// All photos, in upload order.
    #[serde(default)]
    pub photos: Vec<Photo>,
    /// All events, in append order.
    #[serde(default)]
    pub events: Vec<Event>,
}

impl Document {
    /// An empty document: `{"photos": [], "events": []}`.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Position of the photo with `id`, if present.
    pub fn photo_index(&self, id: PhotoId) -> Option<usize> {
        self.photos.iter().position(|p| p.id == id)
    }

    /// Mutable reference to the photo with `id`, if present.
    pub fn photo_mut(&mut self, id: PhotoId) -> Option<&mut Photo> {
        self.photos.iter_mut().find(|p| p.id == id)
    }
}
