//! Background photo processing for PhotoFlow.
//!
//! This crate provides:
//! - The staged processing pipeline that drives a photo to completion or failure
//! - An `image`-backed metadata probe with a filesystem fallback
//! - A supervisor that spawns, tracks, and drains pipeline runs

pub mod pipeline;
pub mod probe;
pub mod stage;
pub mod supervisor;

pub use pipeline::{PhotoProcessor, PipelineOutcome};
pub use probe::ImageProbe;
pub use stage::ProcessingStage;
pub use supervisor::{PipelineHandle, PipelineSupervisor};
