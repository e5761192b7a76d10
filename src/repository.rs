/// The plant repository: sole owner of the plant collection
///
/// The repository keeps the canonical, ordered collection of plants in
/// memory and writes the whole collection to a blob store after every
/// mutation. Callers work on copies and hand them back through `update`.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use crate::analytics::{AnalyticsEngine, PlantStatistics};
use crate::domain::{CareEvent, CareType, LastCarePolicy, Plant, PlantId};
use crate::storage::{BlobStore, StorageError};

/// Blob key used when none is configured
pub const DEFAULT_PLANTS_KEY: &str = "SavedPlants";

/// A repository shared between tasks, serialized by an async mutex
pub type SharedRepository<S> = Arc<Mutex<PlantRepository<S>>>;

/// Result of a mutating repository call
///
/// Persistence failures are not fatal: the in-memory collection keeps the
/// change and the outcome reports that it is not durable yet.
#[derive(Debug)]
pub enum WriteOutcome {
    /// Applied in memory and written to storage
    Persisted,
    /// Applied in memory, but the write to storage failed
    NotPersisted(StorageError),
    /// No plant with the given id; nothing changed
    NotFound,
}

impl WriteOutcome {
    /// Whether the in-memory collection changed
    pub fn is_applied(&self) -> bool {
        !matches!(self, WriteOutcome::NotFound)
    }

    /// Whether the change reached durable storage
    pub fn is_durable(&self) -> bool {
        matches!(self, WriteOutcome::Persisted)
    }

    pub fn storage_error(&self) -> Option<&StorageError> {
        match self {
            WriteOutcome::NotPersisted(e) => Some(e),
            _ => None,
        }
    }
}

/// In-memory plant collection backed by a durable blob store
pub struct PlantRepository<S: BlobStore> {
    store: S,
    key: String,
    plants: Vec<Plant>,
    policy: LastCarePolicy,
    analytics: AnalyticsEngine,
}

impl<S: BlobStore> PlantRepository<S> {
    /// Open a repository over `store` using the default key
    pub fn open(store: S) -> Self {
        Self::open_with_key(store, DEFAULT_PLANTS_KEY)
    }

    /// Open a repository over `store`, loading the collection under `key`
    ///
    /// A missing or unreadable blob yields an empty collection.
    pub fn open_with_key(store: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let plants = load_plants(&store, &key);
        tracing::info!("Opened plant repository with {} plants", plants.len());

        Self {
            store,
            key,
            plants,
            policy: LastCarePolicy::default(),
            analytics: AnalyticsEngine::new(),
        }
    }

    /// Choose how care events update the cached "last done" dates
    ///
    /// Under `KeepLatest` the cached dates of the loaded plants are rebuilt
    /// from their histories.
    pub fn with_last_care_policy(mut self, policy: LastCarePolicy) -> Self {
        self.policy = policy;
        self.repair_last_care_dates();
        self
    }

    pub fn last_care_policy(&self) -> LastCarePolicy {
        self.policy
    }

    /// Wrap the repository for use from several tasks
    pub fn into_shared(self) -> SharedRepository<S> {
        Arc::new(Mutex::new(self))
    }

    /// Write the collection one last time and hand back the store
    pub fn close(self) -> Result<S, StorageError> {
        self.flush()?;
        Ok(self.store)
    }

    /// All plants in insertion order
    pub fn plants(&self) -> &[Plant] {
        &self.plants
    }

    /// A copy of the plant with this id, if present
    pub fn get(&self, id: PlantId) -> Option<Plant> {
        self.find(id).cloned()
    }

    /// Borrow the plant with this id, if present
    pub fn find(&self, id: PlantId) -> Option<&Plant> {
        self.plants.iter().find(|p| p.id() == id)
    }

    /// Plants whose name or scientific name contains `query`
    pub fn search(&self, query: &str) -> Vec<&Plant> {
        self.plants.iter().filter(|p| p.matches_search(query)).collect()
    }

    /// Append a plant to the collection
    ///
    /// The id is not checked: adding a plant whose id is already present
    /// stores a second entry, and id lookups then see the first one.
    pub fn add(&mut self, plant: Plant) -> WriteOutcome {
        tracing::debug!("Adding plant: {} ({})", plant.name, plant.id());
        self.plants.push(plant);
        self.persist()
    }

    /// Replace the stored plant that has the same id
    pub fn update(&mut self, plant: Plant) -> WriteOutcome {
        let Some(index) = self.position(plant.id()) else {
            tracing::debug!("Update ignored, no plant {}", plant.id());
            return WriteOutcome::NotFound;
        };

        tracing::debug!("Updating plant: {} ({})", plant.name, plant.id());
        self.plants[index] = plant;
        self.persist()
    }

    /// Remove the stored plant that has the same id
    pub fn delete(&mut self, plant: &Plant) -> WriteOutcome {
        self.delete_by_id(plant.id())
    }

    pub fn delete_by_id(&mut self, id: PlantId) -> WriteOutcome {
        let before = self.plants.len();
        self.plants.retain(|p| p.id() != id);

        if self.plants.len() == before {
            tracing::debug!("Delete ignored, no plant {}", id);
            return WriteOutcome::NotFound;
        }

        tracing::debug!("Deleted plant {}", id);
        self.persist()
    }

    /// Append a care event to `plant` and write it back
    ///
    /// The caller's copy, with the event appended, replaces the stored plant
    /// that has the same id, so unsaved edits on the copy are kept. Use
    /// [`PlantRepository::log_care`] to append to the stored plant instead.
    pub fn add_care_event(&mut self, event: CareEvent, plant: &Plant) -> WriteOutcome {
        let Some(index) = self.position(plant.id()) else {
            tracing::debug!("Care event ignored, no plant {}", plant.id());
            return WriteOutcome::NotFound;
        };

        tracing::debug!(
            "Logging {} on {} for plant {}",
            event.care_type().as_str(),
            event.date(),
            plant.id()
        );
        let mut updated = plant.clone();
        updated.append_care_event(event, self.policy);
        self.plants[index] = updated;
        self.persist()
    }

    /// Append a care event to the stored plant and optionally schedule the
    /// next care date
    pub fn log_care(
        &mut self,
        id: PlantId,
        event: CareEvent,
        next_care_date: Option<DateTime<Utc>>,
    ) -> WriteOutcome {
        let policy = self.policy;
        let Some(plant) = self.plants.iter_mut().find(|p| p.id() == id) else {
            tracing::debug!("Care event ignored, no plant {}", id);
            return WriteOutcome::NotFound;
        };

        tracing::debug!(
            "Logging {} on {} for plant {}",
            event.care_type().as_str(),
            event.date(),
            id
        );
        plant.append_care_event(event, policy);
        if let Some(date) = next_care_date {
            plant.set_next_care_date(Some(date));
        }

        self.persist()
    }

    /// Set or clear the stored "next care" date of a plant
    pub fn set_next_care_date(&mut self, id: PlantId, date: Option<DateTime<Utc>>) -> WriteOutcome {
        let Some(plant) = self.plants.iter_mut().find(|p| p.id() == id) else {
            return WriteOutcome::NotFound;
        };

        plant.set_next_care_date(date);
        self.persist()
    }

    /// Re-read the collection from storage, discarding unsaved changes
    pub fn reload(&mut self) {
        self.plants = load_plants(&self.store, &self.key);
        self.repair_last_care_dates();
    }

    /// Serialize the whole collection and write it under the repository key
    pub fn flush(&self) -> Result<(), StorageError> {
        let encoded = serde_json::to_vec(&self.plants)?;
        self.store.write(&self.key, &encoded)
    }

    // Statistics

    pub fn total_plants(&self) -> usize {
        self.plants.len()
    }

    pub fn plants_needing_water(&self, now: DateTime<Utc>) -> usize {
        self.analytics.plants_needing(&self.plants, CareType::Watering, now)
    }

    pub fn plants_needing_fertilizer(&self, now: DateTime<Utc>) -> usize {
        self.analytics.plants_needing(&self.plants, CareType::Fertilizing, now)
    }

    pub fn most_common_plant(&self) -> Option<String> {
        self.analytics.most_common_name(&self.plants)
    }

    pub fn total_care_events(&self) -> usize {
        self.analytics.total_care_events(&self.plants)
    }

    /// Every statistic, evaluated at `now`
    pub fn statistics(&self, now: DateTime<Utc>) -> PlantStatistics {
        self.analytics.statistics(&self.plants, now)
    }

    fn position(&self, id: PlantId) -> Option<usize> {
        self.plants.iter().position(|p| p.id() == id)
    }

    fn repair_last_care_dates(&mut self) {
        if self.policy != LastCarePolicy::KeepLatest {
            return;
        }

        for plant in self.plants.iter_mut().filter(|p| !p.last_care_dates_consistent()) {
            tracing::debug!("Rebuilding stale care dates for plant {}", plant.id());
            plant.rebuild_last_care_dates();
        }
    }

    fn persist(&self) -> WriteOutcome {
        match self.flush() {
            Ok(()) => WriteOutcome::Persisted,
            Err(e) => {
                tracing::warn!("Plant collection changed in memory but was not saved: {}", e);
                WriteOutcome::NotPersisted(e)
            }
        }
    }
}

fn load_plants<S: BlobStore>(store: &S, key: &str) -> Vec<Plant> {
    let data = match store.read(key) {
        Ok(Some(data)) => data,
        Ok(None) => return Vec::new(),
        Err(e) => {
            tracing::warn!("Could not read stored plants, starting empty: {}", e);
            return Vec::new();
        }
    };

    match serde_json::from_slice::<Vec<Plant>>(&data) {
        Ok(plants) => plants,
        Err(e) => {
            tracing::warn!("Stored plants could not be decoded, starting empty: {}", e);
            Vec::new()
        }
    }
}
