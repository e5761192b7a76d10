/// Application configuration
///
/// Settings are read from a TOML file. Every section and key is optional and
/// falls back to the defaults below, so `PlantBabyConfig::default()` is a
/// working configuration on its own (apart from the identification API key).

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::repository::DEFAULT_PLANTS_KEY;

/// Default endpoint of the plant identification service
pub const DEFAULT_IDENTIFY_ENDPOINT: &str = "https://api.plant.id/v2/identify";

/// Errors that can occur while loading configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("No writable data directory found")]
    NoDataDirectory,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlantBabyConfig {
    pub storage: StorageSection,
    pub images: ImagesSection,
    pub identification: IdentificationSection,
    pub logging: LoggingSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSection {
    /// Directory for the database and photos; resolved automatically when unset
    pub data_dir: Option<PathBuf>,
    pub database_file: String,
    /// Blob key the plant collection is stored under
    pub plants_key: String,
    /// Only move "last done" dates forward when backdated care is logged
    pub keep_latest_care_date: bool,
}

impl Default for StorageSection {
    fn default() -> Self {
        Self {
            data_dir: None,
            database_file: "plants.db".to_string(),
            plants_key: DEFAULT_PLANTS_KEY.to_string(),
            keep_latest_care_date: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImagesSection {
    /// Photo directory; defaults to `<data_dir>/images`
    pub directory: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdentificationSection {
    pub endpoint: String,
    pub api_key: String,
    pub organs: Vec<String>,
    pub similar_images: bool,
    pub details: Vec<String>,
}

impl Default for IdentificationSection {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_IDENTIFY_ENDPOINT.to_string(),
            api_key: String::new(),
            organs: vec!["leaf".to_string()],
            similar_images: true,
            details: vec![
                "common_names".to_string(),
                "scientific_name".to_string(),
                "description".to_string(),
                "wiki_description".to_string(),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl PlantBabyConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        tracing::debug!("Loading configuration from: {:?}", path);

        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Use a fixed data directory
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.storage.data_dir = Some(dir.into());
        self
    }

    /// The configured data directory, or the first writable default
    pub fn data_dir(&self) -> Result<PathBuf, ConfigError> {
        match &self.storage.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => default_data_dir(),
        }
    }

    pub fn database_path(&self) -> Result<PathBuf, ConfigError> {
        Ok(self.data_dir()?.join(&self.storage.database_file))
    }

    pub fn images_dir(&self) -> Result<PathBuf, ConfigError> {
        match &self.images.directory {
            Some(dir) => Ok(dir.clone()),
            None => Ok(self.data_dir()?.join("images")),
        }
    }
}

/// Find a writable data directory, trying the most user-visible places first
pub fn default_data_dir() -> Result<PathBuf, ConfigError> {
    let potential_paths = [
        // 1. User's home directory (preferred)
        dirs::home_dir().map(|p| p.join(".plant_baby")),
        // 2. User's data directory (platform-specific)
        dirs::data_dir().map(|p| p.join("plant_baby")),
        // 3. User's config directory
        dirs::config_dir().map(|p| p.join("plant_baby")),
        // 4. Current working directory (last resort)
        std::env::current_dir().ok().map(|p| p.join(".plant_baby")),
    ];

    for potential_path in potential_paths.iter().flatten() {
        if is_writable_dir(potential_path) {
            return Ok(potential_path.clone());
        }
    }

    // Ultimate fallback: a temporary directory
    let temp_path = std::env::temp_dir().join("plant_baby");
    if is_writable_dir(&temp_path) {
        tracing::warn!("Using temporary directory for plant data: {}", temp_path.display());
        return Ok(temp_path);
    }

    Err(ConfigError::NoDataDirectory)
}

fn is_writable_dir(dir: &Path) -> bool {
    if fs::create_dir_all(dir).is_err() {
        return false;
    }

    let test_file = dir.join(".test_write");
    if fs::write(&test_file, "test").is_ok() {
        let _ = fs::remove_file(&test_file);
        true
    } else {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_gives_defaults() {
        let config = PlantBabyConfig::from_toml_str("").unwrap();
        assert_eq!(config, PlantBabyConfig::default());
        assert_eq!(config.storage.plants_key, "SavedPlants");
        assert_eq!(config.identification.organs, vec!["leaf".to_string()]);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_partial_sections() {
        let config = PlantBabyConfig::from_toml_str(
            r#"
            [storage]
            data_dir = "/tmp/plants"
            keep_latest_care_date = true

            [identification]
            api_key = "secret"
            "#,
        )
        .unwrap();

        assert_eq!(config.database_path().unwrap(), PathBuf::from("/tmp/plants/plants.db"));
        assert_eq!(config.images_dir().unwrap(), PathBuf::from("/tmp/plants/images"));
        assert!(config.storage.keep_latest_care_date);
        assert_eq!(config.identification.api_key, "secret");
        assert_eq!(config.identification.endpoint, DEFAULT_IDENTIFY_ENDPOINT);
    }

    #[test]
    fn test_invalid_toml() {
        let result = PlantBabyConfig::from_toml_str("[storage\nplants_key = 1");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = PlantBabyConfig::load("/definitely/not/here.toml");
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }
}
