//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use photoflow_api::{AppState, build_router};
use photoflow_core::config::{AppConfig, PipelineConfig};
use photoflow_worker::probe::ImageProbe;

const BOUNDARY: &str = "photoflow-test-boundary";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Shared state, for direct access to the store and services
    pub state: AppState,
    /// Holds the document and upload directory alive
    _dir: TempDir,
}

impl TestApp {
    /// Create a test application whose pipeline always succeeds
    pub async fn new() -> Self {
        Self::with_pipeline(PipelineConfig::immediate(1.0)).await
    }

    /// Create a test application with a custom pipeline configuration
    pub async fn with_pipeline(pipeline: PipelineConfig) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");

        let mut config = AppConfig::default();
        config.storage.document_path = dir.path().join("database.json").display().to_string();
        config.storage.upload_dir = dir.path().join("uploads").display().to_string();
        config.pipeline = pipeline;

        let state = AppState::new(config, Arc::new(ImageProbe::new()));
        state
            .store
            .initialize()
            .await
            .expect("Failed to initialize store");

        let router = build_router(state.clone());
        Self {
            router,
            state,
            _dir: dir,
        }
    }

    /// Wait until no pipeline run is in flight
    pub async fn settle(&self) {
        tokio::time::timeout(Duration::from_secs(10), async {
            while self.state.supervisor.active_runs() > 0 {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .expect("Pipeline runs did not finish in time");
    }

    /// Make an HTTP request without a body
    pub async fn request(&self, method: &str, path: &str) -> TestResponse {
        let req = Request::builder()
            .method(method)
            .uri(path)
            .body(Body::empty())
            .expect("Failed to build request");
        self.send(req).await
    }

    /// Upload files as `multipart/form-data`: `(field, filename, content type, bytes)`
    pub async fn upload(&self, files: &[(&str, &str, &str, &[u8])]) -> TestResponse {
        let mut body = Vec::new();
        for (field, filename, content_type, data) in files {
            body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
            body.extend_from_slice(
                format!(
                    "Content-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(format!("Content-Type: {content_type}\r\n\r\n").as_bytes());
            body.extend_from_slice(data);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

        let req = Request::builder()
            .method("POST")
            .uri("/api/photos/upload")
            .header(
                "Content-Type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .expect("Failed to build request");
        self.send(req).await
    }

    /// Send a prepared request through the router
    pub async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let bytes = axum::body::to_bytes(response.into_body(), 16 * 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            content_type,
            bytes: bytes.to_vec(),
            body,
        }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Content-Type header, if any
    pub content_type: String,
    /// Raw body
    pub bytes: Vec<u8>,
    /// Parsed JSON body (`Null` when not JSON)
    pub body: Value,
}
