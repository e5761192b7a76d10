/// Care-model properties checked through the public API
use chrono::{DateTime, Duration, TimeZone, Utc};
use plant_baby::*;

fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 18, 45, 0).unwrap()
}

#[test]
fn test_record_care_sets_last_date_for_every_type() {
    let date = at(2025, 7, 4);

    for care_type in CareType::ALL {
        let mut plant = Plant::new("Fern");
        let id = plant.record_care(care_type, date, None);

        assert_eq!(plant.last_care_date(care_type), Some(date));
        assert!(plant.care_history().iter().any(|e| e.id() == id));
        for other in CareType::ALL.into_iter().filter(|t| *t != care_type) {
            assert_eq!(plant.last_care_date(other), None);
        }
    }
}

#[test]
fn test_next_care_date_present_iff_last_care_date() {
    let mut plant = Plant::new("Begonia");
    plant.record_care(CareType::Watering, at(2025, 12, 28), None);
    plant.record_care(CareType::Repotting, at(2025, 3, 31), None);

    for care_type in CareType::ALL {
        let last = plant.last_care_date(care_type);
        let next = plant.next_care_date_for(care_type);
        assert_eq!(last.is_some(), next.is_some());
        if let Some(last) = last {
            assert_eq!(next, care_type.interval().add_to(last));
        }
    }

    assert_eq!(plant.next_care_date_for(CareType::Watering), Some(at(2026, 1, 4)));
    assert_eq!(plant.next_care_date_for(CareType::Repotting), Some(at(2026, 3, 31)));
}

#[test]
fn test_calendar_month_is_not_thirty_days() {
    let mut plant = Plant::new("Peace Lily");
    plant.record_care(CareType::Fertilizing, at(2025, 1, 31), None);

    let next = plant.next_care_date_for(CareType::Fertilizing).unwrap();
    assert_eq!(next, at(2025, 2, 28));
    assert_ne!(next, at(2025, 1, 31) + Duration::days(30));
}

#[test]
fn test_history_keeps_insertion_order() {
    let mut plant = Plant::new("Jade");
    plant.record_care(CareType::Watering, at(2025, 5, 10), None);
    plant.record_care(CareType::Watering, at(2025, 5, 1), None);
    plant.record_care(CareType::Pruning, at(2025, 5, 5), None);

    let dates: Vec<_> = plant.care_history().iter().map(|e| e.date()).collect();
    assert_eq!(dates, vec![at(2025, 5, 10), at(2025, 5, 1), at(2025, 5, 5)]);
}

#[test]
fn test_draft_to_plant() {
    let draft = PlantDraft {
        name: "Rubber Plant".to_string(),
        fertilizer: "Monthly in summer".to_string(),
        ..PlantDraft::default()
    };
    let plant = draft.into_plant().unwrap();

    assert_eq!(plant.fertilizer.as_deref(), Some("Monthly in summer"));
    assert_eq!(plant.next_care_date(), None);
    assert!(matches!(
        PlantDraft::named("").into_plant(),
        Err(DomainError::InvalidPlantName(_))
    ));
}
