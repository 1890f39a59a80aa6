//! Application configuration schemas.
//!
//! All configuration structs are deserialized via the `config` crate from
//! `config/default.toml`, an optional environment overlay, and
//! `PHOTOFLOW__`-prefixed environment variables. Every field has a default,
//! so an empty configuration is valid.

pub mod app;
pub mod logging;
pub mod pipeline;
pub mod storage;

use serde::{Deserialize, Serialize};

pub use self::app::{CorsConfig, ServerConfig};
pub use self::logging::LoggingConfig;
pub use self::pipeline::PipelineConfig;
pub use self::storage::StorageConfig;

use crate::error::AppError;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Document file and upload directory settings.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Processing pipeline settings.
    #[serde(default)]
    pub pipeline: PipelineConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges the default configuration with an environment-specific overlay
    /// and environment variables prefixed with `PHOTOFLOW__`
    /// (e.g. `PHOTOFLOW__SERVER__PORT=8080`).
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("PHOTOFLOW")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let loaded: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        loaded.validate()?;
        Ok(loaded)
    }

    /// Reject values that would make the service misbehave at runtime.
    pub fn validate(&self) -> Result<(), AppError> {
        if !(0.0..=1.0).contains(&self.pipeline.success_probability) {
            return Err(AppError::configuration(format!(
                "pipeline.success_probability must be within [0, 1], got {}",
                self.pipeline.success_probability
            )));
        }
        if self.storage.max_files_per_upload == 0 {
            return Err(AppError::configuration(
                "storage.max_files_per_upload must be at least 1",
            ));
        }
        let public_path = &self.storage.public_path;
        if !public_path.starts_with('/') || public_path.trim_end_matches('/').is_empty() {
            return Err(AppError::configuration(format!(
                "storage.public_path must be an absolute path below '/', got '{}'",
                self.storage.public_path
            )));
        }
        Ok(())
    }
}
