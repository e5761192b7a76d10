/// PlantDraft: the form-level input for creating a plant
///
/// The add-plant flow collects free-text fields where blank means "not set".
/// This module validates that input and turns it into a Plant.

use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, Plant};

/// Unvalidated plant attributes as entered by the user
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlantDraft {
    pub name: String,
    pub scientific_name: Option<String>,
    pub description: Option<String>,
    pub age: String,
    pub image_url: String,
    pub temp: String,
    pub light: String,
    pub humidity: String,
    pub fertilizer: String,
    pub notes: String,
}

impl PlantDraft {
    /// Start a draft with just a name
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Whether the draft can be saved
    pub fn is_valid(&self) -> bool {
        Self::validate_name(&self.name).is_ok()
    }

    /// Validate the draft and build a new Plant with empty history
    pub fn into_plant(self) -> Result<Plant, DomainError> {
        Self::validate_name(&self.name)?;

        let mut plant = Plant::new(self.name.trim());
        plant.scientific_name = self.scientific_name.and_then(blank_to_none);
        plant.description = self.description.and_then(blank_to_none);
        plant.age = blank_to_none(self.age);
        plant.image_url = blank_to_none(self.image_url);
        plant.temp = blank_to_none(self.temp);
        plant.light = blank_to_none(self.light);
        plant.humidity = blank_to_none(self.humidity);
        plant.fertilizer = blank_to_none(self.fertilizer);
        plant.notes = blank_to_none(self.notes);

        Ok(plant)
    }

    fn validate_name(name: &str) -> Result<(), DomainError> {
        let trimmed = name.trim();

        if trimmed.is_empty() {
            return Err(DomainError::InvalidPlantName(
                "Plant name cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}

fn blank_to_none(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}
