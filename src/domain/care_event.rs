/// CareEvent entity for recording performed care
///
/// This module defines the CareEvent struct that represents a single care
/// action (watering, fertilizing, ...) performed on one plant.

use std::hash::{Hash, Hasher};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{CareEventId, CareType};

/// An immutable log entry of one performed care action
///
/// The date is when the care happened, which may be earlier than the moment
/// it was logged. Two events are the same event when their ids match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CareEvent {
    id: CareEventId,
    #[serde(rename = "type")]
    care_type: CareType,
    date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    note: Option<String>,
}

impl CareEvent {
    /// Create a new care event with a freshly generated id
    pub fn new(care_type: CareType, date: DateTime<Utc>, note: Option<String>) -> Self {
        Self::with_id(CareEventId::new(), care_type, date, note)
    }

    /// Create a care event with a known id (used when loading or importing)
    pub fn with_id(
        id: CareEventId,
        care_type: CareType,
        date: DateTime<Utc>,
        note: Option<String>,
    ) -> Self {
        Self {
            id,
            care_type,
            date,
            note,
        }
    }

    pub fn id(&self) -> CareEventId {
        self.id
    }

    pub fn care_type(&self) -> CareType {
        self.care_type
    }

    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    /// Check if this event carries a non-blank note
    pub fn has_note(&self) -> bool {
        self.note.as_deref().is_some_and(|n| !n.trim().is_empty())
    }
}

impl PartialEq for CareEvent {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for CareEvent {}

impl Hash for CareEvent {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
