//! Aggregate statistics and full reset.

pub mod service;

pub use service::{StatsService, StatsSnapshot};
