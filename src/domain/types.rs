/// Core types and enums used throughout the domain layer
///
/// This module defines the identifier types and the CareType enum that are
/// shared by Plant, CareEvent and the scheduling helpers.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a plant
///
/// This is a wrapper around UUID to provide type safety - you can't accidentally
/// pass a plant ID where a care event ID is expected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlantId(pub Uuid);

impl PlantId {
    /// Generate a new random plant ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a plant ID from a string
    pub fn from_string(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl Default for PlantId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PlantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Unique identifier for a care event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CareEventId(pub Uuid);

impl CareEventId {
    /// Generate a new random care event ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_string(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl Default for CareEventId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CareEventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// The kinds of maintenance a plant can receive
///
/// This is a closed set. Each kind has a fixed care interval, see
/// [`CareType::interval`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CareType {
    Watering,
    Fertilizing,
    Pruning,
    Repotting,
}

impl CareType {
    /// Every care type, in display order
    pub const ALL: [CareType; 4] = [
        CareType::Watering,
        CareType::Fertilizing,
        CareType::Pruning,
        CareType::Repotting,
    ];

    /// Stable lowercase key, as written to storage
    pub fn as_str(&self) -> &'static str {
        match self {
            CareType::Watering => "watering",
            CareType::Fertilizing => "fertilizing",
            CareType::Pruning => "pruning",
            CareType::Repotting => "repotting",
        }
    }

    /// Get the display name for this care type
    pub fn display_name(&self) -> &'static str {
        match self {
            CareType::Watering => "Watering",
            CareType::Fertilizing => "Fertilizing",
            CareType::Pruning => "Pruning",
            CareType::Repotting => "Repotting",
        }
    }
}

impl fmt::Display for CareType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
