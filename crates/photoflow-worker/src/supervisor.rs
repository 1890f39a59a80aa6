//! Spawning and tracking of pipeline runs.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::task::TaskTracker;
use tracing::{info, warn};

use photoflow_core::types::PhotoId;

use crate::pipeline::{PhotoProcessor, PipelineOutcome};

/// Launches pipeline runs on the runtime and keeps count of them.
///
/// Runs are unbounded: every launch spawns immediately.
#[derive(Debug, Clone)]
pub struct PipelineSupervisor {
    processor: Arc<PhotoProcessor>,
    tracker: TaskTracker,
}

impl PipelineSupervisor {
    /// Create a supervisor running photos through `processor`.
    pub fn new(processor: PhotoProcessor) -> Self {
        Self {
            processor: Arc::new(processor),
            tracker: TaskTracker::new(),
        }
    }

    /// Start processing `photo_id` in the background.
    ///
    /// Dropping the returned handle detaches the run; it still counts
    /// toward [`active_runs`](Self::active_runs).
    pub fn launch(&self, photo_id: PhotoId) -> PipelineHandle {
        let processor = Arc::clone(&self.processor);
        let task = self
            .tracker
            .spawn(async move { processor.process(photo_id).await });
        info!(photo_id = %photo_id, active_runs = self.tracker.len(), "Pipeline run launched");
        PipelineHandle { photo_id, task }
    }

    /// Number of runs that have not finished yet.
    pub fn active_runs(&self) -> usize {
        self.tracker.len()
    }

    /// Wait up to `grace` for in-flight runs to finish.
    ///
    /// Returns `true` if every run finished in time. Runs still going after
    /// the grace period are left to the runtime.
    pub async fn shutdown(&self, grace: Duration) -> bool {
        self.tracker.close();
        info!(active_runs = self.tracker.len(), "Waiting for in-flight pipeline runs");

        match tokio::time::timeout(grace, self.tracker.wait()).await {
            Ok(()) => {
                info!("All pipeline runs finished");
                true
            }
            Err(_) => {
                warn!(
                    active_runs = self.tracker.len(),
                    grace_seconds = grace.as_secs(),
                    "Pipeline runs still active after grace period"
                );
                false
            }
        }
    }
}

/// Handle to one launched pipeline run.
#[derive(Debug)]
pub struct PipelineHandle {
    photo_id: PhotoId,
    task: JoinHandle<PipelineOutcome>,
}

impl PipelineHandle {
    /// Photo being processed.
    pub fn photo_id(&self) -> PhotoId {
        self.photo_id
    }

    /// Whether the run has ended.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Stop the run at its next suspension point.
    ///
    /// The photo keeps whatever state the run last persisted.
    pub fn abort(&self) {
        self.task.abort();
    }

    /// Wait for the run to end.
    pub async fn join(self) -> PipelineOutcome {
        match self.task.await {
            Ok(outcome) => outcome,
            Err(e) if e.is_cancelled() => PipelineOutcome::Cancelled,
            Err(e) => PipelineOutcome::Errored {
                message: e.to_string(),
            },
        }
    }
}
