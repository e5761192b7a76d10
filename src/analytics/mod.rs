/// Statistics over the plant collection
///
/// This module computes the aggregate numbers shown on the dashboard and the
/// statistics screen. Everything here is a pure projection over a slice of
/// plants; nothing is cached.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::{CareType, Plant, PlantId};

/// One row of the "Your Plants" list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlantSummary {
    pub id: PlantId,
    pub name: String,
    pub scientific_name: Option<String>,
    pub care_events: usize,
}

/// Aggregate statistics for a plant collection at one instant
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlantStatistics {
    pub computed_at: DateTime<Utc>,
    pub total_plants: usize,
    pub plants_needing_water: usize,
    pub plants_needing_fertilizer: usize,
    pub most_common_plant: Option<String>,
    pub total_care_events: usize,
    pub care_events_by_type: BTreeMap<CareType, usize>,
    pub plants: Vec<PlantSummary>,
}

/// Analytics engine for processing plant data
#[derive(Debug, Clone, Default)]
pub struct AnalyticsEngine {}

impl AnalyticsEngine {
    /// Create a new analytics engine
    pub fn new() -> Self {
        Self {}
    }

    /// Compute every statistic in one pass over the collection
    pub fn statistics(&self, plants: &[Plant], now: DateTime<Utc>) -> PlantStatistics {
        PlantStatistics {
            computed_at: now,
            total_plants: plants.len(),
            plants_needing_water: self.plants_needing(plants, CareType::Watering, now),
            plants_needing_fertilizer: self.plants_needing(plants, CareType::Fertilizing, now),
            most_common_plant: self.most_common_name(plants),
            total_care_events: self.total_care_events(plants),
            care_events_by_type: self.care_events_by_type(plants),
            plants: plants
                .iter()
                .map(|plant| PlantSummary {
                    id: plant.id(),
                    name: plant.name.clone(),
                    scientific_name: plant.scientific_name.clone(),
                    care_events: plant.care_history().len(),
                })
                .collect(),
        }
    }

    /// Count plants for which care of this type is due at `now`
    ///
    /// A plant that never received this care counts as needing it.
    pub fn plants_needing(&self, plants: &[Plant], care_type: CareType, now: DateTime<Utc>) -> usize {
        plants
            .iter()
            .filter(|plant| plant.is_care_due(care_type, now))
            .count()
    }

    /// The plant name that occurs most often
    ///
    /// Ties go to the name seen first. Returns None for an empty collection.
    pub fn most_common_name(&self, plants: &[Plant]) -> Option<String> {
        let mut tally: Vec<(&str, usize)> = Vec::new();
        let mut index: HashMap<&str, usize> = HashMap::new();

        for plant in plants {
            let name = plant.name.as_str();
            match index.get(name) {
                Some(&i) => tally[i].1 += 1,
                None => {
                    index.insert(name, tally.len());
                    tally.push((name, 1));
                }
            }
        }

        let mut best: Option<(&str, usize)> = None;
        for (name, count) in tally {
            if best.map_or(true, |(_, best_count)| count > best_count) {
                best = Some((name, count));
            }
        }

        best.map(|(name, _)| name.to_string())
    }

    /// Total number of care events across all plants
    pub fn total_care_events(&self, plants: &[Plant]) -> usize {
        plants.iter().map(|plant| plant.care_history().len()).sum()
    }

    /// Number of logged care events per care type (every type present)
    pub fn care_events_by_type(&self, plants: &[Plant]) -> BTreeMap<CareType, usize> {
        let mut counts: BTreeMap<CareType, usize> =
            CareType::ALL.into_iter().map(|care_type| (care_type, 0)).collect();

        for event in plants.iter().flat_map(|plant| plant.care_history()) {
            *counts.entry(event.care_type()).or_insert(0) += 1;
        }

        counts
    }
}
