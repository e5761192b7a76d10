/// Public library interface for Plant Baby
///
/// This module exports the plant-care model, the repository that owns the
/// plant collection, and an application facade that wires the repository
/// to on-disk storage and the photo directory.

use thiserror::Error;

// Internal modules
pub mod analytics;
pub mod config;
pub mod domain;
pub mod identification;
pub mod logging;
pub mod repository;
pub mod storage;

// Re-export public modules and types
pub use analytics::{AnalyticsEngine, PlantStatistics, PlantSummary};
pub use config::{ConfigError, PlantBabyConfig};
pub use domain::*;
pub use identification::{IdentificationClient, IdentificationError, PlantIdClient, Suggestion};
pub use repository::{PlantRepository, SharedRepository, WriteOutcome};
pub use storage::{BlobStore, ImageStore, JpegImage, MemoryBlobStore, SqliteBlobStore, StorageError};

/// Errors that can occur while opening or driving the application
#[derive(Error, Debug)]
pub enum PlantBabyError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Domain validation error: {0}")]
    Domain(#[from] DomainError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Application facade: the plant repository plus the photo directory
///
/// Construct one per session and pass it by reference to whatever needs it.
pub struct PlantBaby {
    config: PlantBabyConfig,
    repository: PlantRepository<SqliteBlobStore>,
    images: ImageStore,
}

impl PlantBaby {
    /// Open the database and photo directory named by `config`
    pub fn open(config: PlantBabyConfig) -> Result<Self, PlantBabyError> {
        let db_path = config.database_path()?;
        tracing::info!("Opening Plant Baby with database: {:?}", db_path);

        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(StorageError::Io)?;
        }

        let store = SqliteBlobStore::open(&db_path)?;
        let policy = if config.storage.keep_latest_care_date {
            LastCarePolicy::KeepLatest
        } else {
            LastCarePolicy::Overwrite
        };
        let repository = PlantRepository::open_with_key(store, config.storage.plants_key.clone())
            .with_last_care_policy(policy);
        let images = ImageStore::new(config.images_dir()?);

        Ok(Self {
            config,
            repository,
            images,
        })
    }

    pub fn config(&self) -> &PlantBabyConfig {
        &self.config
    }

    pub fn repository(&self) -> &PlantRepository<SqliteBlobStore> {
        &self.repository
    }

    pub fn repository_mut(&mut self) -> &mut PlantRepository<SqliteBlobStore> {
        &mut self.repository
    }

    pub fn images(&self) -> &ImageStore {
        &self.images
    }

    /// Validate a draft, save its photo, and add the new plant
    ///
    /// A photo that cannot be written is logged and skipped; the plant is
    /// still created.
    pub fn create_plant(
        &mut self,
        draft: PlantDraft,
        photo: Option<&JpegImage>,
    ) -> Result<(Plant, WriteOutcome), PlantBabyError> {
        let mut plant = draft.into_plant()?;

        if let Some(photo) = photo {
            match self.images.save_jpeg(photo, &plant.name) {
                Ok(file_name) => plant.image_path = Some(file_name),
                Err(e) => tracing::warn!("Photo for {} was not saved: {}", plant.name, e),
            }
        }

        let outcome = self.repository.add(plant.clone());
        Ok((plant, outcome))
    }

    /// Create a plant pre-filled from an identification suggestion
    pub fn create_plant_from_suggestion(
        &mut self,
        suggestion: &Suggestion,
        photo: Option<&JpegImage>,
    ) -> Result<(Plant, WriteOutcome), PlantBabyError> {
        self.create_plant(suggestion.to_draft(), photo)
    }

    /// Delete a plant and its stored photo
    pub fn delete_plant(&mut self, id: PlantId) -> WriteOutcome {
        let photo = self.repository.find(id).and_then(|p| p.image_path.clone());
        let outcome = self.repository.delete_by_id(id);

        if outcome.is_applied() {
            if let Some(file_name) = photo {
                if let Err(e) = self.images.remove(&file_name) {
                    tracing::warn!("Photo {} was not removed: {}", file_name, e);
                }
            }
        }

        outcome
    }

    /// Statistics evaluated now
    pub fn statistics(&self) -> PlantStatistics {
        self.repository.statistics(chrono::Utc::now())
    }

    /// Flush the collection one final time
    pub fn close(self) -> Result<(), PlantBabyError> {
        self.repository.close()?;
        tracing::info!("Plant Baby closed");
        Ok(())
    }
}
