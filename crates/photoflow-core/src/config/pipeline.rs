//! Processing pipeline configuration.

use serde::{Deserialize, Serialize};

/// Timing and outcome settings for the photo processing pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Probability that a run ends in success. `1.0` forces success,
    /// `0.0` forces failure.
    #[serde(default = "default_success_probability")]
    pub success_probability: f64,
    /// Pause after the `processing_started` stage.
    #[serde(default = "default_started_delay")]
    pub started_delay_ms: u64,
    /// Pause after the `analyzing` stage.
    #[serde(default = "default_analyzing_delay")]
    pub analyzing_delay_ms: u64,
    /// Pause after the `filtering` stage.
    #[serde(default = "default_filtering_delay")]
    pub filtering_delay_ms: u64,
    /// Pause after the `optimizing` stage.
    #[serde(default = "default_optimizing_delay")]
    pub optimizing_delay_ms: u64,
    /// Pause after the `finalizing` stage.
    #[serde(default = "default_finalizing_delay")]
    pub finalizing_delay_ms: u64,
    /// Error message attached to a photo whose outcome draw failed.
    #[serde(default = "default_failure_reason")]
    pub failure_reason: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            success_probability: default_success_probability(),
            started_delay_ms: default_started_delay(),
            analyzing_delay_ms: default_analyzing_delay(),
            filtering_delay_ms: default_filtering_delay(),
            optimizing_delay_ms: default_optimizing_delay(),
            finalizing_delay_ms: default_finalizing_delay(),
            failure_reason: default_failure_reason(),
        }
    }
}

impl PipelineConfig {
    /// A configuration with no stage delays and a fixed outcome.
    pub fn immediate(success_probability: f64) -> Self {
        Self {
            success_probability,
            started_delay_ms: 0,
            analyzing_delay_ms: 0,
            filtering_delay_ms: 0,
            optimizing_delay_ms: 0,
            finalizing_delay_ms: 0,
            ..Self::default()
        }
    }

    /// Success probability clamped into `[0, 1]`.
    pub fn clamped_probability(&self) -> f64 {
        if self.success_probability.is_nan() {
            return 0.0;
        }
        self.success_probability.clamp(0.0, 1.0)
    }
}

fn default_success_probability() -> f64 {
    0.95
}

fn default_started_delay() -> u64 {
    500
}

fn default_analyzing_delay() -> u64 {
    800
}

fn default_filtering_delay() -> u64 {
    700
}

fn default_optimizing_delay() -> u64 {
    600
}

fn default_finalizing_delay() -> u64 {
    400
}

fn default_failure_reason() -> String {
    "Processing failed due to quality issues".to_string()
}
