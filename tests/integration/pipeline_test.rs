//! Integration tests for upload-to-completion processing.

mod helpers;

use bytes::Bytes;

use photoflow_core::config::PipelineConfig;
use photoflow_database::repositories::DEFAULT_EVENT_LIMIT;
use photoflow_entity::event::{Event, EventKind};
use photoflow_entity::photo::PhotoStatus;
use photoflow_service::UploadedFile;

fn jpeg(name: &str, len: usize) -> UploadedFile {
    UploadedFile {
        original_name: name.to_string(),
        mimetype: "image/jpeg".to_string(),
        data: Bytes::from(vec![0xAB; len]),
    }
}

/// Events of one photo, oldest first.
async fn trail(app: &helpers::TestApp, photo_id: photoflow_core::types::PhotoId) -> Vec<Event> {
    let mut events = app
        .state
        .event_service
        .list(Some(photo_id), Some(DEFAULT_EVENT_LIMIT))
        .await;
    events.reverse();
    events
}

#[tokio::test]
async fn test_successful_run() {
    let app = helpers::TestApp::new().await;

    let uploaded = app
        .state
        .upload_service
        .upload(vec![jpeg("a.jpg", 1234)])
        .await
        .unwrap();
    assert_eq!(uploaded.len(), 1);
    let id = uploaded[0].id;
    assert_eq!(uploaded[0].status, PhotoStatus::Pending);
    assert_eq!(uploaded[0].progress, 0);

    app.settle().await;

    let photo = app.state.photo_service.get(id).await.unwrap();
    assert_eq!(photo.status, PhotoStatus::Completed);
    assert_eq!(photo.progress, 100);
    assert!(photo.error.is_none());
    assert_eq!(photo.processed_url.as_deref(), Some(photo.url.as_str()));

    let metadata = photo.metadata.unwrap();
    assert_eq!(metadata.dimensions, "Unknown");
    assert_eq!(metadata.size, "0.00 MB");
    assert_eq!(metadata.format, "JPG");

    let kinds: Vec<EventKind> = trail(&app, id).await.iter().map(|e| e.event).collect();
    assert_eq!(
        kinds,
        vec![
            EventKind::PhotoUploaded,
            EventKind::ProcessingStarted,
            EventKind::ProgressUpdate,
            EventKind::ProgressUpdate,
            EventKind::ProgressUpdate,
            EventKind::ProgressUpdate,
            EventKind::ProcessingCompleted,
        ]
    );

    let events = trail(&app, id).await;
    assert_eq!(events[0].details["filename"], "a.jpg");
    assert_eq!(events[0].details["size"], 1234);
    let stages: Vec<&str> = events[2..6]
        .iter()
        .filter_map(|e| e.details["stage"].as_str())
        .collect();
    assert_eq!(stages, ["analyzing", "filtering", "optimizing", "finalizing"]);
    assert!(events.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
}

#[tokio::test]
async fn test_failed_run() {
    let app = helpers::TestApp::with_pipeline(PipelineConfig::immediate(0.0)).await;

    let uploaded = app
        .state
        .upload_service
        .upload(vec![jpeg("b.png", 10)])
        .await
        .unwrap();
    let id = uploaded[0].id;
    app.settle().await;

    let photo = app.state.photo_service.get(id).await.unwrap();
    assert_eq!(photo.status, PhotoStatus::Failed);
    assert_eq!(photo.progress, 0);
    assert_eq!(
        photo.error.as_deref(),
        Some("Processing failed due to quality issues")
    );
    assert!(photo.metadata.is_none());

    let events = trail(&app, id).await;
    let last = events.last().unwrap();
    assert_eq!(last.event, EventKind::ProcessingFailed);
    assert_eq!(last.details["error"], "Processing failed due to quality issues");
    assert!(
        events
            .iter()
            .all(|e| e.event != EventKind::ProcessingCompleted)
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_each_run_ends_with_one_matching_terminal_event() {
    let app = helpers::TestApp::with_pipeline(PipelineConfig::immediate(0.5)).await;

    let files = (0..10).map(|n| jpeg(&format!("{n}.jpg"), 100 + n)).collect();
    let uploaded = app.state.upload_service.upload(files).await.unwrap();
    assert_eq!(uploaded.len(), 10);
    app.settle().await;

    for photo in &uploaded {
        let stored = app.state.photo_service.get(photo.id).await.unwrap();
        assert!(stored.status.is_terminal());

        let events = trail(&app, photo.id).await;
        let terminal: Vec<&Event> = events.iter().filter(|e| e.event.is_terminal()).collect();
        assert_eq!(terminal.len(), 1);
        assert_eq!(events.last().map(|e| e.id), Some(terminal[0].id));

        let expected = match stored.status {
            PhotoStatus::Completed => EventKind::ProcessingCompleted,
            _ => EventKind::ProcessingFailed,
        };
        assert_eq!(terminal[0].event, expected);
    }

    let stats = app.state.stats_service.stats().await;
    assert_eq!(stats.photos.total, 10);
    assert_eq!(stats.photos.pending + stats.photos.processing, 0);
    assert_eq!(stats.photos.completed + stats.photos.failed, 10);
    // Uploaded, started, four progress updates, one terminal.
    assert_eq!(stats.total_events, 70);
}

#[tokio::test]
async fn test_rejected_batch_writes_nothing() {
    let app = helpers::TestApp::new().await;

    let bad = UploadedFile {
        original_name: "notes.txt".to_string(),
        mimetype: "text/plain".to_string(),
        data: Bytes::from_static(b"hello"),
    };
    let err = app
        .state
        .upload_service
        .upload(vec![jpeg("ok.jpg", 5), bad])
        .await
        .unwrap_err();
    assert_eq!(err.message, "Only image files allowed");

    assert!(app.state.photo_service.list(None).await.is_empty());
    assert_eq!(app.state.stats_service.stats().await.total_events, 0);
    assert_eq!(
        std::fs::read_dir(app.state.store.upload_dir()).unwrap().count(),
        0
    );
}
