//! Integration tests for the document store under concurrent mutation.

use std::collections::HashMap;
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::json;

use photoflow_core::types::PhotoId;
use photoflow_database::repositories::{DEFAULT_EVENT_LIMIT, EventRepository, PhotoRepository};
use photoflow_database::store::DocumentStore;
use photoflow_entity::document::Document;
use photoflow_entity::event::EventKind;
use photoflow_entity::photo::{CreatePhoto, Photo, PhotoPatch, PhotoStatus};

struct Fixture {
    _dir: tempfile::TempDir,
    store: Arc<DocumentStore>,
    photos: Arc<PhotoRepository>,
    events: Arc<EventRepository>,
}

async fn fixture() -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(DocumentStore::with_paths(
        dir.path().join("database.json"),
        dir.path().join("uploads"),
        "/uploads",
    ));
    store.initialize().await.unwrap();
    Fixture {
        photos: Arc::new(PhotoRepository::new(Arc::clone(&store))),
        events: Arc::new(EventRepository::new(Arc::clone(&store))),
        store,
        _dir: dir,
    }
}

fn new_photo(n: usize) -> CreatePhoto {
    CreatePhoto {
        filename: format!("{n}.jpg"),
        original_name: format!("photo-{n}.jpg"),
        size: n as u64,
        mimetype: "image/jpeg".to_string(),
    }
}

#[derive(Debug)]
enum Op {
    Create(usize),
    Update(PhotoId, u8),
    Delete(PhotoId),
    Event(PhotoId),
}

#[derive(Debug)]
enum OpResult {
    Created(Photo),
    Updated(PhotoId, Option<Photo>),
    Deleted(PhotoId, Option<Photo>),
    Evented,
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_mutations_are_never_lost() {
    for seed in [7_u64, 42, 1234] {
        let f = fixture().await;
        let mut rng = StdRng::seed_from_u64(seed);

        let mut seeded = Vec::new();
        for n in 0..8 {
            seeded.push(f.photos.create(new_photo(n)).await.unwrap());
        }
        let targets: Vec<PhotoId> = seeded.iter().map(|p| p.id).collect();

        let ops: Vec<Op> = (0..120)
            .map(|n| {
                let target = targets[rng.random_range(0..targets.len())];
                match rng.random_range(0..4) {
                    0 => Op::Create(100 + n),
                    1 => Op::Update(target, rng.random_range(0..=100)),
                    2 => Op::Delete(target),
                    _ => Op::Event(target),
                }
            })
            .collect();

        let mut handles = Vec::with_capacity(ops.len());
        for op in ops {
            let photos = Arc::clone(&f.photos);
            let events = Arc::clone(&f.events);
            handles.push(tokio::spawn(async move {
                match op {
                    Op::Create(n) => OpResult::Created(photos.create(new_photo(n)).await.unwrap()),
                    Op::Update(id, progress) => {
                        let patch = PhotoPatch {
                            status: Some(PhotoStatus::Processing),
                            progress: Some(progress),
                            ..PhotoPatch::default()
                        };
                        OpResult::Updated(id, photos.update(id, patch).await.unwrap())
                    }
                    Op::Delete(id) => OpResult::Deleted(id, photos.delete(id).await.unwrap()),
                    Op::Event(id) => {
                        events
                            .create(id, EventKind::ProgressUpdate, json!({ "progress": 1 }))
                            .await
                            .unwrap();
                        OpResult::Evented
                    }
                }
            }));
        }

        let mut created = Vec::new();
        let mut updates: HashMap<PhotoId, Vec<Photo>> = HashMap::new();
        let mut deletes: HashMap<PhotoId, usize> = HashMap::new();
        let mut event_creates = 0;
        for handle in handles {
            match handle.await.unwrap() {
                OpResult::Created(photo) => created.push(photo),
                OpResult::Updated(id, Some(photo)) => updates.entry(id).or_default().push(photo),
                OpResult::Updated(_, None) => {}
                OpResult::Deleted(id, Some(_)) => *deletes.entry(id).or_default() += 1,
                OpResult::Deleted(_, None) => {}
                OpResult::Evented => event_creates += 1,
            }
        }

        // A photo is removed by at most one delete.
        assert!(deletes.values().all(|&n| n == 1), "seed {seed}: {deletes:?}");

        let document = f.store.read().await;
        let successful_deletes: usize = deletes.values().sum();
        assert_eq!(
            document.photos.len(),
            seeded.len() + created.len() - successful_deletes,
            "seed {seed}"
        );
        assert_eq!(document.events.len(), event_creates, "seed {seed}");

        for photo in &created {
            assert!(document.photos.contains(photo), "seed {seed}: created photo lost");
        }

        for original in &seeded {
            let stored = document.photos.iter().find(|p| p.id == original.id);
            match (stored, deletes.contains_key(&original.id)) {
                (None, true) => {}
                (Some(stored), false) => match updates.get(&original.id) {
                    Some(results) => assert!(
                        results.contains(stored),
                        "seed {seed}: final state is not one of the applied updates"
                    ),
                    None => assert_eq!(stored, original, "seed {seed}"),
                },
                (stored, deleted) => {
                    panic!("seed {seed}: photo present={} deleted={deleted}", stored.is_some())
                }
            }
        }

        let timestamps: Vec<_> = document.events.iter().map(|e| e.timestamp).collect();
        assert!(timestamps.windows(2).all(|w| w[0] <= w[1]), "seed {seed}");
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_document_stays_parsable_under_load() {
    let f = fixture().await;

    let mut handles = Vec::new();
    for n in 0..40 {
        let photos = Arc::clone(&f.photos);
        let events = Arc::clone(&f.events);
        handles.push(tokio::spawn(async move {
            let photo = photos.create(new_photo(n)).await.unwrap();
            events
                .create(photo.id, EventKind::PhotoUploaded, json!({ "size": n }))
                .await
                .unwrap();
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let raw = std::fs::read_to_string(f.store.document_path()).unwrap();
    let document: Document = serde_json::from_str(&raw).unwrap();
    assert_eq!(document.photos.len(), 40);
    assert_eq!(document.events.len(), 40);
    assert!(!f.store.temp_path().exists());

    let newest_first = f.events.find_all(None, DEFAULT_EVENT_LIMIT).await;
    assert_eq!(newest_first.len(), 40);
    assert_eq!(newest_first[0].id, document.events[39].id);
}

#[tokio::test]
async fn test_reset_while_photos_exist() {
    let f = fixture().await;
    for n in 0..3 {
        let photo = f.photos.create(new_photo(n)).await.unwrap();
        std::fs::write(f.store.upload_path(&photo.filename), b"data").unwrap();
        f.events
            .create(photo.id, EventKind::PhotoUploaded, json!({}))
            .await
            .unwrap();
    }

    assert_eq!(f.store.reset().await.unwrap(), 3);
    assert_eq!(f.store.read().await, Document::empty());
    assert_eq!(std::fs::read_dir(f.store.upload_dir()).unwrap().count(), 0);

    let survivor = f.photos.create(new_photo(9)).await.unwrap();
    assert_eq!(f.photos.find_all(None).await, vec![survivor]);
}
