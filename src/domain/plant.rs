/// Plant entity and its care-derivation logic
///
/// This module defines the Plant struct: identity, descriptive attributes, the
/// care history, and the denormalized "last done" dates derived from it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{schedule, CareEvent, CareEventId, CareType, PlantId};

/// How a newly appended care event updates the cached "last done" date
///
/// `Overwrite` sets the cache to the event date even when an older event is
/// backdated into the history. `KeepLatest` only moves the cache forward, so
/// the cache always equals the newest date in the history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LastCarePolicy {
    #[default]
    Overwrite,
    KeepLatest,
}

/// Where the display image for a plant comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSource<'a> {
    /// File name or path of a photo stored on the device
    LocalFile(&'a str),
    /// Network URL, fetched asynchronously by the presentation layer
    Remote(&'a str),
    /// Name of an image bundled with the application
    BundledAsset(&'a str),
    None,
}

/// A tracked houseplant
///
/// Descriptive attributes are freely editable. The care history is
/// append-only and the `last_*` dates are kept in step with it by
/// [`Plant::record_care`] and [`Plant::append_care_event`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plant {
    id: PlantId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scientific_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub light: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub humidity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fertilizer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    care_history: Vec<CareEvent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    next_care_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    last_watered: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    last_fertilized: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    last_pruned: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    last_repotted: Option<DateTime<Utc>>,
}

impl Plant {
    /// Create a plant with only a name
    ///
    /// The name is taken as given; rejecting blank names is the job of
    /// [`crate::domain::PlantDraft`].
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(PlantId::new(), name)
    }

    /// Create a plant with a known id and no attributes or history
    pub fn with_id(id: PlantId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            scientific_name: None,
            description: None,
            age: None,
            image_url: None,
            image_path: None,
            temp: None,
            light: None,
            humidity: None,
            fertilizer: None,
            notes: None,
            care_history: Vec::new(),
            next_care_date: None,
            last_watered: None,
            last_fertilized: None,
            last_pruned: None,
            last_repotted: None,
        }
    }

    pub fn id(&self) -> PlantId {
        self.id
    }

    /// Care events in insertion order (not necessarily chronological)
    pub fn care_history(&self) -> &[CareEvent] {
        &self.care_history
    }

    /// The single stored "next care" date shown on the plant detail screen
    ///
    /// This is set explicitly when logging care and is independent of care
    /// type. For a per-type projection use [`Plant::next_care_date_for`].
    pub fn next_care_date(&self) -> Option<DateTime<Utc>> {
        self.next_care_date
    }

    pub fn set_next_care_date(&mut self, date: Option<DateTime<Utc>>) {
        self.next_care_date = date;
    }

    pub fn last_watered(&self) -> Option<DateTime<Utc>> {
        self.last_watered
    }

    pub fn last_fertilized(&self) -> Option<DateTime<Utc>> {
        self.last_fertilized
    }

    pub fn last_pruned(&self) -> Option<DateTime<Utc>> {
        self.last_pruned
    }

    pub fn last_repotted(&self) -> Option<DateTime<Utc>> {
        self.last_repotted
    }

    /// Cached date of the most recent care of this type, if any
    pub fn last_care_date(&self, care_type: CareType) -> Option<DateTime<Utc>> {
        match care_type {
            CareType::Watering => self.last_watered,
            CareType::Fertilizing => self.last_fertilized,
            CareType::Pruning => self.last_pruned,
            CareType::Repotting => self.last_repotted,
        }
    }

    /// When care of this type is next due, projected from the last one
    pub fn next_care_date_for(&self, care_type: CareType) -> Option<DateTime<Utc>> {
        schedule::next_due(care_type, self.last_care_date(care_type))
    }

    /// Whether care of this type is due at `now`
    pub fn is_care_due(&self, care_type: CareType, now: DateTime<Utc>) -> bool {
        schedule::is_due(care_type, self.last_care_date(care_type), now)
    }

    /// Care types currently due, in display order
    pub fn due_care_types(&self, now: DateTime<Utc>) -> Vec<CareType> {
        CareType::ALL
            .into_iter()
            .filter(|care_type| self.is_care_due(*care_type, now))
            .collect()
    }

    /// Whole days since this care was last performed
    pub fn days_since_last_care(&self, care_type: CareType, now: DateTime<Utc>) -> Option<i64> {
        self.last_care_date(care_type)
            .map(|last| schedule::whole_days_between(last, now))
    }

    /// Whole calendar months since this care was last performed
    pub fn months_since_last_care(&self, care_type: CareType, now: DateTime<Utc>) -> Option<u32> {
        self.last_care_date(care_type)
            .map(|last| schedule::whole_months_between(last, now))
    }

    /// Log a care action and refresh the matching cached date
    ///
    /// The cache is set to `date` unconditionally; callers are responsible
    /// for chronological sanity.
    pub fn record_care(
        &mut self,
        care_type: CareType,
        date: DateTime<Utc>,
        note: Option<String>,
    ) -> CareEventId {
        let event = CareEvent::new(care_type, date, note);
        let id = event.id();
        self.append_care_event(event, LastCarePolicy::Overwrite);
        id
    }

    /// Append an existing event to the history and refresh the cache
    pub fn append_care_event(&mut self, event: CareEvent, policy: LastCarePolicy) {
        self.refresh_last_care(event.care_type(), event.date(), policy);
        self.care_history.push(event);
    }

    /// Recompute every cached date from the history (newest per type)
    pub fn rebuild_last_care_dates(&mut self) {
        for care_type in CareType::ALL {
            let latest = self
                .care_history
                .iter()
                .filter(|e| e.care_type() == care_type)
                .map(|e| e.date())
                .max();
            *self.last_care_slot(care_type) = latest;
        }
    }

    /// Check whether the cached dates agree with the history
    pub fn last_care_dates_consistent(&self) -> bool {
        CareType::ALL.into_iter().all(|care_type| {
            let latest = self
                .care_history
                .iter()
                .filter(|e| e.care_type() == care_type)
                .map(|e| e.date())
                .max();
            latest == self.last_care_date(care_type)
        })
    }

    /// Which image to show, in priority order: local file, network URL,
    /// bundled asset
    pub fn image_source(&self) -> ImageSource<'_> {
        if let Some(path) = non_blank(&self.image_path) {
            return ImageSource::LocalFile(path);
        }

        match non_blank(&self.image_url) {
            Some(url) if is_network_url(url) => ImageSource::Remote(url),
            Some(asset) => ImageSource::BundledAsset(asset),
            None => ImageSource::None,
        }
    }

    /// Case-insensitive match on name or scientific name
    ///
    /// A blank query matches every plant.
    pub fn matches_search(&self, query: &str) -> bool {
        let query = query.trim();
        if query.is_empty() {
            return true;
        }

        let needle = query.to_lowercase();
        self.name.to_lowercase().contains(&needle)
            || self
                .scientific_name
                .as_deref()
                .is_some_and(|s| s.to_lowercase().contains(&needle))
    }

    // The one place the cached dates are written after an append
    fn refresh_last_care(&mut self, care_type: CareType, date: DateTime<Utc>, policy: LastCarePolicy) {
        let slot = self.last_care_slot(care_type);
        match policy {
            LastCarePolicy::Overwrite => *slot = Some(date),
            LastCarePolicy::KeepLatest => {
                if slot.map_or(true, |current| date > current) {
                    *slot = Some(date);
                }
            }
        }
    }

    fn last_care_slot(&mut self, care_type: CareType) -> &mut Option<DateTime<Utc>> {
        match care_type {
            CareType::Watering => &mut self.last_watered,
            CareType::Fertilizing => &mut self.last_fertilized,
            CareType::Pruning => &mut self.last_pruned,
            CareType::Repotting => &mut self.last_repotted,
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.trim().is_empty())
}

fn is_network_url(url: &str) -> bool {
    let lower = url.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}
