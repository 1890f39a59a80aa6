//! The fixed stages a pipeline run walks through before its outcome draw.

use std::time::Duration;

use serde_json::{Value, json};

use photoflow_core::config::PipelineConfig;
use photoflow_entity::event::EventKind;

/// One intermediate step of a pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessingStage {
    /// Photo enters the processing state.
    Started,
    /// Analyzing the image.
    Analyzing,
    /// Applying filters.
    Filtering,
    /// Optimizing output.
    Optimizing,
    /// Finishing up before the outcome draw.
    Finalizing,
}

impl ProcessingStage {
    /// Every stage, in execution order.
    pub const ALL: [Self; 5] = [
        Self::Started,
        Self::Analyzing,
        Self::Filtering,
        Self::Optimizing,
        Self::Finalizing,
    ];

    /// Progress percentage recorded when the stage begins.
    pub fn progress(self) -> u8 {
        match self {
            Self::Started => 10,
            Self::Analyzing => 30,
            Self::Filtering => 50,
            Self::Optimizing => 70,
            Self::Finalizing => 90,
        }
    }

    /// Stage label carried in `progress_update` events.
    pub fn label(self) -> Option<&'static str> {
        match self {
            Self::Started => None,
            Self::Analyzing => Some("analyzing"),
            Self::Filtering => Some("filtering"),
            Self::Optimizing => Some("optimizing"),
            Self::Finalizing => Some("finalizing"),
        }
    }

    /// Kind of event recorded for the stage.
    pub fn event_kind(self) -> EventKind {
        match self {
            Self::Started => EventKind::ProcessingStarted,
            _ => EventKind::ProgressUpdate,
        }
    }

    /// Event details recorded for the stage.
    pub fn details(self) -> Value {
        match self.label() {
            None => json!({ "status": "processing", "progress": self.progress() }),
            Some(stage) => json!({ "progress": self.progress(), "stage": stage }),
        }
    }

    /// Pause after the stage.
    pub fn delay(self, config: &PipelineConfig) -> Duration {
        let ms = match self {
            Self::Started => config.started_delay_ms,
            Self::Analyzing => config.analyzing_delay_ms,
            Self::Filtering => config.filtering_delay_ms,
            Self::Optimizing => config.optimizing_delay_ms,
            Self::Finalizing => config.finalizing_delay_ms,
        };
        Duration::from_millis(ms)
    }
}
