/// End-to-end persistence through SQLite and the photo directory
use chrono::{Duration, Utc};
use plant_baby::storage::ResolvedImage;
use plant_baby::*;
use tempfile::TempDir;

fn config_in(dir: &TempDir) -> PlantBabyConfig {
    PlantBabyConfig::default().with_data_dir(dir.path().join("data"))
}

fn photo() -> JpegImage {
    JpegImage::from_bytes(vec![0xFF, 0xD8, 0xFF, 0xE1, 0x12, 0x34]).expect("valid jpeg header")
}

#[test]
fn test_collection_survives_restart() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let watered_at = Utc::now() - Duration::days(2);

    let (plant_id, expected) = {
        let mut app = PlantBaby::open(config_in(&dir)).expect("Failed to open app");
        let (plant, outcome) = app
            .create_plant(PlantDraft::named("Fern"), Some(&photo()))
            .expect("Failed to create plant");
        assert!(outcome.is_durable());
        assert!(plant.image_path.is_some());

        let event = CareEvent::new(CareType::Watering, watered_at, Some("rain water".to_string()));
        let next = Utc::now() + Duration::days(5);
        assert!(app.repository_mut().log_care(plant.id(), event, Some(next)).is_durable());

        let expected = app.repository().plants().to_vec();
        app.close().expect("Failed to close app");
        (plant.id(), expected)
    };

    let app = PlantBaby::open(config_in(&dir)).expect("Failed to reopen app");
    assert_eq!(app.repository().plants(), expected.as_slice());

    let plant = app.repository().get(plant_id).expect("plant persisted");
    assert_eq!(plant.last_watered(), Some(watered_at));
    assert_eq!(plant.care_history()[0].note(), Some("rain water"));
    assert!(matches!(app.images().resolve(&plant), ResolvedImage::LocalFile(_)));

    let stats = app.statistics();
    assert_eq!(stats.total_plants, 1);
    assert_eq!(stats.plants_needing_water, 0);
    assert_eq!(stats.plants_needing_fertilizer, 1);
}

#[test]
fn test_delete_removes_photo() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let mut app = PlantBaby::open(config_in(&dir)).expect("Failed to open app");

    let (plant, _) = app
        .create_plant(PlantDraft::named("Cactus"), Some(&photo()))
        .expect("Failed to create plant");
    let photo_path = app.images().path_for(plant.image_path.as_deref().unwrap());
    assert!(photo_path.is_file());

    assert!(app.delete_plant(plant.id()).is_durable());
    assert!(!photo_path.exists());
    assert_eq!(app.repository().total_plants(), 0);

    // Deleting again is a no-op
    assert!(!app.delete_plant(plant.id()).is_applied());
}

#[test]
fn test_undecodable_blob_starts_empty() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let config = config_in(&dir);
    std::fs::create_dir_all(config.data_dir().unwrap()).unwrap();

    {
        let store = SqliteBlobStore::open(config.database_path().unwrap()).unwrap();
        store.write(&config.storage.plants_key, b"[{\"name\": 3}]").unwrap();
    }

    let mut app = PlantBaby::open(config).expect("Failed to open app");
    assert_eq!(app.repository().total_plants(), 0);

    // The next write replaces the bad blob
    app.create_plant(PlantDraft::named("Fern"), None).unwrap();
    app.repository_mut().reload();
    assert_eq!(app.repository().total_plants(), 1);
}

#[test]
fn test_keep_latest_care_date_from_config() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let mut config = config_in(&dir);
    config.storage.keep_latest_care_date = true;

    let mut app = PlantBaby::open(config).expect("Failed to open app");
    let (plant, _) = app.create_plant(PlantDraft::named("Palm"), None).unwrap();
    let recent = Utc::now();

    app.repository_mut()
        .add_care_event(CareEvent::new(CareType::Repotting, recent, None), &plant);
    let plant = app.repository().get(plant.id()).unwrap();
    app.repository_mut().add_care_event(
        CareEvent::new(CareType::Repotting, recent - Duration::days(400), None),
        &plant,
    );

    let stored = app.repository().get(plant.id()).unwrap();
    assert_eq!(stored.last_repotted(), Some(recent));
    assert!(stored.last_care_dates_consistent());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_shared_repository_serializes_writers() {
    let shared = PlantRepository::open(MemoryBlobStore::new()).into_shared();

    let mut handles = Vec::new();
    for i in 0..8 {
        let repo = shared.clone();
        handles.push(tokio::spawn(async move {
            let plant = Plant::new(format!("Plant {}", i));
            let mut guard = repo.lock().await;
            guard.add(plant.clone());
            guard.add_care_event(CareEvent::new(CareType::Watering, Utc::now(), None), &plant);
        }));
    }

    for handle in handles {
        handle.await.expect("task panicked");
    }

    let repo = shared.lock().await;
    assert_eq!(repo.total_plants(), 8);
    assert_eq!(repo.total_care_events(), 8);
}
