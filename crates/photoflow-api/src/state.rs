//! Application state shared across all handlers and middleware.

use std::sync::Arc;
use std::time::Instant;

use photoflow_core::config::AppConfig;
use photoflow_core::traits::MetadataProbe;
use photoflow_database::repositories::{EventRepository, PhotoRepository};
use photoflow_database::store::DocumentStore;
use photoflow_service::{EventService, PhotoService, StatsService, UploadService};
use photoflow_worker::pipeline::PhotoProcessor;
use photoflow_worker::supervisor::PipelineSupervisor;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped or cheaply cloneable.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// Document store and upload directory
    pub store: Arc<DocumentStore>,
    /// Pipeline run supervisor
    pub supervisor: PipelineSupervisor,

    // ── Services ─────────────────────────────────────────────
    /// Upload intake
    pub upload_service: Arc<UploadService>,
    /// Photo queries and deletion
    pub photo_service: Arc<PhotoService>,
    /// Event log queries
    pub event_service: Arc<EventService>,
    /// Statistics and reset
    pub stats_service: Arc<StatsService>,

    /// When the server started
    pub started_at: Instant,
}

impl AppState {
    /// Wire repositories, the pipeline, and services over one store.
    ///
    /// The store is not initialized here; call
    /// [`DocumentStore::initialize`] before serving.
    pub fn new(config: AppConfig, probe: Arc<dyn MetadataProbe>) -> Self {
        let store = Arc::new(DocumentStore::new(&config.storage));

        let photo_repo = Arc::new(PhotoRepository::new(Arc::clone(&store)));
        let event_repo = Arc::new(EventRepository::new(Arc::clone(&store)));

        let processor = PhotoProcessor::new(Arc::clone(&store), probe, config.pipeline.clone());
        let supervisor = PipelineSupervisor::new(processor);

        let upload_service = Arc::new(UploadService::new(
            Arc::clone(&store),
            Arc::clone(&photo_repo),
            Arc::clone(&event_repo),
            supervisor.clone(),
            config.storage.clone(),
        ));
        let photo_service = Arc::new(PhotoService::new(
            Arc::clone(&store),
            Arc::clone(&photo_repo),
            Arc::clone(&event_repo),
        ));
        let event_service = Arc::new(EventService::new(Arc::clone(&event_repo)));
        let stats_service = Arc::new(StatsService::new(
            Arc::clone(&store),
            Arc::clone(&photo_repo),
            Arc::clone(&event_repo),
        ));

        Self {
            config: Arc::new(config),
            store,
            supervisor,
            upload_service,
            photo_service,
            event_service,
            stats_service,
            started_at: Instant::now(),
        }
    }

    /// Seconds since the state was built.
    pub fn uptime_seconds(&self) -> f64 {
        self.started_at.elapsed().as_secs_f64()
    }
}
