//! Integration tests for the HTTP API.

mod helpers;

use http::StatusCode;
use serde_json::Value;

const JPEG_BYTES: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 1, 2, 3, 4];

async fn upload_one(app: &helpers::TestApp, name: &str) -> Value {
    let res = app
        .upload(&[("photos", name, "image/jpeg", JPEG_BYTES)])
        .await;
    assert_eq!(res.status, StatusCode::CREATED, "{:?}", res.body);
    res.body["photos"][0].clone()
}

#[tokio::test]
async fn test_health() {
    let app = helpers::TestApp::new().await;
    let res = app.request("GET", "/api/health").await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["status"], "ok");
    assert!(res.body["timestamp"].is_string());
    assert!(res.body["uptimeSeconds"].as_f64().unwrap() >= 0.0);
}

#[tokio::test]
async fn test_upload_creates_pending_photos() {
    let app = helpers::TestApp::new().await;
    let res = app
        .upload(&[
            ("photos", "a.jpg", "image/jpeg", JPEG_BYTES),
            ("photos", "b.png", "image/png", &b"png-ish"[..]),
        ])
        .await;

    assert_eq!(res.status, StatusCode::CREATED);
    assert_eq!(res.body["message"], "Photos uploaded successfully");
    let photos = res.body["photos"].as_array().unwrap();
    assert_eq!(photos.len(), 2);
    assert_eq!(photos[0]["originalName"], "a.jpg");
    assert_eq!(photos[0]["status"], "pending");
    assert_eq!(photos[0]["progress"], 0);
    assert_eq!(photos[0]["size"], JPEG_BYTES.len());
    let filename = photos[0]["filename"].as_str().unwrap();
    assert!(filename.ends_with(".jpg"));
    assert_eq!(photos[0]["url"], format!("/uploads/{filename}"));
    assert!(photos[0].get("metadata").is_none());

    app.settle().await;
}

#[tokio::test]
async fn test_upload_validation() {
    let app = helpers::TestApp::new().await;

    let res = app.upload(&[]).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["error"], "VALIDATION_ERROR");

    let res = app
        .upload(&[("photos", "notes.txt", "text/plain", &b"hello"[..])])
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["message"], "Only image files allowed");

    // Extension and media type must both be images.
    let res = app
        .upload(&[("photos", "sneaky.jpg", "application/pdf", &b"%PDF"[..])])
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);

    let res = app
        .upload(&[("avatar", "a.jpg", "image/jpeg", JPEG_BYTES)])
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);

    let res = app.request("GET", "/api/photos").await;
    assert_eq!(res.body["total"], 0);
}

#[tokio::test]
async fn test_list_and_filter_photos() {
    let app = helpers::TestApp::new().await;
    let first = upload_one(&app, "first.jpg").await;
    let second = upload_one(&app, "second.jpg").await;
    app.settle().await;

    let res = app.request("GET", "/api/photos").await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["total"], 2);
    assert_eq!(res.body["photos"][0]["id"], second["id"]);
    assert_eq!(res.body["photos"][1]["id"], first["id"]);

    let res = app.request("GET", "/api/photos?status=completed").await;
    assert_eq!(res.body["total"], 2);
    assert_eq!(res.body["photos"][0]["progress"], 100);
    assert_eq!(res.body["photos"][0]["metadata"]["dimensions"], "Unknown");

    let res = app.request("GET", "/api/photos?status=failed").await;
    assert_eq!(res.body["total"], 0);

    let res = app.request("GET", "/api/photos?status=bogus").await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["photos"], serde_json::json!([]));
}

#[tokio::test]
async fn test_get_photo() {
    let app = helpers::TestApp::new().await;
    let photo = upload_one(&app, "a.jpg").await;
    app.settle().await;

    let id = photo["id"].as_str().unwrap();
    let res = app.request("GET", &format!("/api/photos/{id}")).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["id"], id);
    assert_eq!(res.body["status"], "completed");

    let res = app
        .request("GET", &format!("/api/photos/{}", uuid::Uuid::new_v4()))
        .await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.body["error"], "NOT_FOUND");
    assert_eq!(res.body["message"], "Photo not found");

    let res = app.request("GET", "/api/photos/not-a-uuid").await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.body["message"], "Photo not found");
}

#[tokio::test]
async fn test_delete_photo() {
    let app = helpers::TestApp::new().await;
    let photo = upload_one(&app, "a.jpg").await;
    app.settle().await;

    let id = photo["id"].as_str().unwrap();
    let filename = photo["filename"].as_str().unwrap();
    assert!(app.state.store.upload_path(filename).exists());

    let res = app.request("DELETE", &format!("/api/photos/{id}")).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["message"], "Photo deleted successfully");
    assert!(!app.state.store.upload_path(filename).exists());

    let res = app.request("GET", &format!("/api/photos/{id}")).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);

    let res = app.request("DELETE", &format!("/api/photos/{id}")).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);

    let res = app.request("GET", &format!("/api/events?photoId={id}")).await;
    assert_eq!(res.body["events"][0]["event"], "photo_deleted");
    assert_eq!(res.body["events"][0]["details"]["filename"], "a.jpg");
}

#[tokio::test]
async fn test_list_events() {
    let app = helpers::TestApp::new().await;
    let a = upload_one(&app, "a.jpg").await;
    let b = upload_one(&app, "b.jpg").await;
    app.settle().await;

    let res = app.request("GET", "/api/events").await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["total"], 14);

    let id = a["id"].as_str().unwrap();
    let res = app.request("GET", &format!("/api/events?photoId={id}")).await;
    assert_eq!(res.body["total"], 7);
    let events = res.body["events"].as_array().unwrap();
    assert!(events.iter().all(|e| e["photoId"] == a["id"]));
    assert_eq!(events[0]["event"], "processing_completed");
    assert_eq!(events[6]["event"], "photo_uploaded");

    let id = b["id"].as_str().unwrap();
    let res = app
        .request("GET", &format!("/api/events?photoId={id}&limit=2"))
        .await;
    assert_eq!(res.body["total"], 2);
    assert_eq!(res.body["events"][0]["event"], "processing_completed");
    assert_eq!(res.body["events"][1]["details"]["stage"], "finalizing");

    let res = app.request("GET", "/api/events?photoId=nope").await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["total"], 0);
}

#[tokio::test]
async fn test_stats_and_reset() {
    let app = helpers::TestApp::with_pipeline(
        photoflow_core::config::PipelineConfig::immediate(0.0),
    )
    .await;
    upload_one(&app, "a.jpg").await;
    app.settle().await;

    let res = app.request("GET", "/api/stats").await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["total"], 1);
    assert_eq!(res.body["failed"], 1);
    assert_eq!(res.body["completed"], 0);
    assert_eq!(res.body["totalEvents"], 7);

    let res = app.request("POST", "/api/reset").await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["message"], "All data cleared successfully");

    let res = app.request("GET", "/api/stats").await;
    assert_eq!(
        res.body,
        serde_json::json!({
            "total": 0,
            "pending": 0,
            "processing": 0,
            "completed": 0,
            "failed": 0,
            "totalEvents": 0
        })
    );
    assert_eq!(
        std::fs::read_dir(app.state.store.upload_dir()).unwrap().count(),
        0
    );
}

#[tokio::test]
async fn test_uploaded_file_is_served() {
    let app = helpers::TestApp::new().await;
    let photo = upload_one(&app, "a.jpg").await;
    app.settle().await;

    let url = photo["url"].as_str().unwrap();
    let res = app.request("GET", url).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.bytes, JPEG_BYTES);

    let res = app.request("GET", "/uploads/missing.jpg").await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_route() {
    let app = helpers::TestApp::new().await;
    let res = app.request("GET", "/api/nope").await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.body["error"], "NOT_FOUND");
    assert!(res.content_type.starts_with("application/json"));
}
