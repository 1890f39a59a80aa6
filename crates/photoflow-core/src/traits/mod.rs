//! Core traits defined in `photoflow-core` and implemented by other crates.

pub mod probe;

pub use probe::{MetadataProbe, ProbedImage};
