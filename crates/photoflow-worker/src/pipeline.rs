//! The photo processing pipeline.
//!
//! A run walks the photo through [`ProcessingStage::ALL`], draws a random
//! outcome, then records either completion (with probed metadata) or
//! failure. Every error and panic is caught here; a run always ends in a
//! [`PipelineOutcome`].

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use rand::Rng;
use serde_json::json;
use tracing::{error, info, warn};

use photoflow_core::config::PipelineConfig;
use photoflow_core::result::AppResult;
use photoflow_core::traits::MetadataProbe;
use photoflow_core::types::PhotoId;
use photoflow_database::repositories::{EventRepository, PhotoRepository};
use photoflow_database::store::DocumentStore;
use photoflow_entity::event::EventKind;
use photoflow_entity::photo::{PhotoPatch, PhotoStatus};

use crate::probe::describe_file;
use crate::stage::ProcessingStage;

/// How a pipeline run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineOutcome {
    /// The photo was marked completed.
    Completed,
    /// The outcome draw failed and the photo was marked failed.
    Failed {
        /// Error stored on the photo.
        reason: String,
    },
    /// The photo was deleted before the run could finish it.
    Vanished,
    /// An unexpected error or panic aborted the run.
    Errored {
        /// What went wrong.
        message: String,
    },
    /// The run was aborted from outside.
    Cancelled,
}

impl PipelineOutcome {
    /// Short label for logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Failed { .. } => "failed",
            Self::Vanished => "vanished",
            Self::Errored { .. } => "errored",
            Self::Cancelled => "cancelled",
        }
    }
}

/// Drives single photos through the processing pipeline.
#[derive(Debug, Clone)]
pub struct PhotoProcessor {
    store: Arc<DocumentStore>,
    photos: PhotoRepository,
    events: EventRepository,
    probe: Arc<dyn MetadataProbe>,
    config: PipelineConfig,
}

impl PhotoProcessor {
    /// Create a processor over `store`.
    pub fn new(
        store: Arc<DocumentStore>,
        probe: Arc<dyn MetadataProbe>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            photos: PhotoRepository::new(Arc::clone(&store)),
            events: EventRepository::new(Arc::clone(&store)),
            store,
            probe,
            config,
        }
    }

    /// Process one photo to its final state.
    ///
    /// Never fails: errors and panics mark the photo failed with a
    /// `"Processing error: ..."` message and yield [`PipelineOutcome::Errored`].
    pub async fn process(&self, id: PhotoId) -> PipelineOutcome {
        info!(photo_id = %id, "Processing started");

        let message = match AssertUnwindSafe(self.run(id)).catch_unwind().await {
            Ok(Ok(outcome)) => {
                info!(photo_id = %id, outcome = outcome.as_str(), "Processing finished");
                return outcome;
            }
            Ok(Err(e)) => e.message,
            Err(panic) => panic_message(panic.as_ref()),
        };

        error!(photo_id = %id, error = %message, "Processing error");
        self.recover(id, &message).await;
        PipelineOutcome::Errored { message }
    }

    async fn run(&self, id: PhotoId) -> AppResult<PipelineOutcome> {
        for stage in ProcessingStage::ALL {
            self.photos
                .update_progress(id, stage.progress(), PhotoStatus::Processing)
                .await?;
            self.events
                .create(id, stage.event_kind(), stage.details())
                .await;

            let delay = stage.delay(&self.config);
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
        }

        let success = draw_success(self.config.clamped_probability());

        let Some(photo) = self.photos.find_by_id(id).await else {
            warn!(photo_id = %id, "Photo deleted during processing");
            return Ok(PipelineOutcome::Vanished);
        };

        if success {
            let path = self.store.upload_path(&photo.filename);
            let metadata = describe_file(self.probe.as_ref(), &path).await?;
            let patch = PhotoPatch::completed(metadata, photo.url.clone());
            if self.photos.update(id, patch).await?.is_none() {
                warn!(photo_id = %id, "Photo deleted before completion was recorded");
                return Ok(PipelineOutcome::Vanished);
            }
            self.events
                .create(
                    id,
                    EventKind::ProcessingCompleted,
                    json!({ "status": "completed", "progress": 100 }),
                )
                .await;
            Ok(PipelineOutcome::Completed)
        } else {
            let reason = self.config.failure_reason.clone();
            if self
                .photos
                .update(id, PhotoPatch::failed(reason.clone()))
                .await?
                .is_none()
            {
                warn!(photo_id = %id, "Photo deleted before failure was recorded");
                return Ok(PipelineOutcome::Vanished);
            }
            self.events
                .create(
                    id,
                    EventKind::ProcessingFailed,
                    json!({ "status": "failed", "error": reason }),
                )
                .await;
            Ok(PipelineOutcome::Failed { reason })
        }
    }

    async fn recover(&self, id: PhotoId, message: &str) {
        let patch = PhotoPatch::failed(format!("Processing error: {message}"));
        if let Err(e) = self.photos.update(id, patch).await {
            error!(photo_id = %id, error = %e, "Failed to record processing error");
        }
        self.events
            .create(
                id,
                EventKind::ProcessingFailed,
                json!({ "status": "failed", "error": message }),
            )
            .await;
    }
}

fn draw_success(probability: f64) -> bool {
    rand::rng().random_bool(probability)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "pipeline panicked".to_string()
    }
}
