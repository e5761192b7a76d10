/// Repository statistics over sequences of mutations
use chrono::{DateTime, Duration, TimeZone, Utc};
use plant_baby::*;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 9, 1, 8, 0, 0).unwrap()
}

fn history_total(repo: &PlantRepository<MemoryBlobStore>) -> usize {
    repo.plants().iter().map(|p| p.care_history().len()).sum()
}

#[test]
fn test_total_care_events_tracks_every_mutation() {
    let mut repo = PlantRepository::open(MemoryBlobStore::new());
    let fern = Plant::new("Fern");
    let mut ivy = Plant::new("Ivy");
    ivy.record_care(CareType::Watering, now(), None);

    repo.add(fern.clone());
    assert_eq!(repo.total_care_events(), history_total(&repo));

    repo.add(ivy.clone());
    assert_eq!(repo.total_care_events(), 1);

    repo.add_care_event(CareEvent::new(CareType::Pruning, now(), None), &fern);
    let current = repo.get(fern.id()).unwrap();
    repo.add_care_event(CareEvent::new(CareType::Watering, now(), None), &current);
    assert_eq!(repo.total_care_events(), 3);
    assert_eq!(repo.total_care_events(), history_total(&repo));

    // Writing back a stale working copy drops the events logged since
    repo.update(fern.clone());
    assert_eq!(repo.total_care_events(), 1);
    assert_eq!(repo.total_care_events(), history_total(&repo));

    // Logging care writes the given copy back, history included
    repo.add_care_event(CareEvent::new(CareType::Pruning, now(), None), &current);
    assert_eq!(repo.total_care_events(), 4);
    repo.add_care_event(CareEvent::new(CareType::Watering, now(), None), &fern);
    assert_eq!(repo.total_care_events(), 2);
    assert_eq!(repo.total_care_events(), history_total(&repo));

    repo.delete(&ivy);
    assert_eq!(repo.total_care_events(), 1);
    assert_eq!(repo.total_care_events(), history_total(&repo));
}

#[test]
fn test_needing_water_boundaries() {
    let mut repo = PlantRepository::open(MemoryBlobStore::new());
    let mut exactly_seven = Plant::new("Seven");
    exactly_seven.record_care(CareType::Watering, now() - Duration::days(7), None);
    let mut six = Plant::new("Six");
    six.record_care(CareType::Watering, now() - Duration::days(6), None);
    repo.add(exactly_seven);
    repo.add(six);
    repo.add(Plant::new("Never"));

    assert_eq!(repo.plants_needing_water(now()), 2);
    assert_eq!(repo.plants_needing_fertilizer(now()), 3);
}

#[test]
fn test_most_common_plant() {
    let mut repo = PlantRepository::open(MemoryBlobStore::new());
    assert_eq!(repo.most_common_plant(), None);

    repo.add(Plant::new("Monstera"));
    repo.add(Plant::new("Fern"));
    repo.add(Plant::new("Monstera"));

    assert_eq!(repo.most_common_plant(), Some("Monstera".to_string()));

    let stats = repo.statistics(now());
    assert_eq!(stats.total_plants, 3);
    assert_eq!(stats.most_common_plant.as_deref(), Some("Monstera"));
    assert_eq!(stats.plants.len(), 3);
}

#[test]
fn test_delete_unknown_plant_leaves_collection() {
    let mut repo = PlantRepository::open(MemoryBlobStore::new());
    repo.add(Plant::new("Fern"));
    let before = repo.plants().to_vec();

    let outcome = repo.delete(&Plant::new("Ghost"));

    assert!(!outcome.is_applied());
    assert_eq!(repo.plants(), before.as_slice());
}
