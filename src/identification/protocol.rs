/// Identification service message structures
///
/// This module defines the JSON request sent to the plant identification
/// service and the response shape we accept back. The response is treated
/// as an external contract: every detail field is optional.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::config::IdentificationSection;
use crate::domain::PlantDraft;
use crate::storage::JpegImage;

/// Request body for an identification call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IdentifyRequest {
    /// Base64-encoded JPEG images
    pub images: Vec<String>,
    pub organs: Vec<String>,
    pub similar_images: bool,
    /// Detail fields requested for each suggestion
    pub details: Vec<String>,
}

impl IdentifyRequest {
    pub fn new(image: &JpegImage, settings: &IdentificationSection) -> Self {
        Self {
            images: vec![STANDARD.encode(image.as_bytes())],
            organs: settings.organs.clone(),
            similar_images: settings.similar_images,
            details: settings.details.clone(),
        }
    }
}

/// Top-level response envelope
#[derive(Debug, Deserialize)]
pub struct IdentifyResponse {
    pub result: ClassificationResult,
}

#[derive(Debug, Deserialize)]
pub struct ClassificationResult {
    pub classification: Classification,
}

#[derive(Debug, Deserialize)]
pub struct Classification {
    #[serde(default, deserialize_with = "null_as_default")]
    pub suggestions: Vec<Suggestion>,
}

/// One candidate species
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Suggestion {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: Option<String>,
    pub name: String,
    /// Confidence in [0, 1]
    pub probability: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub details: PlantDetails,
    #[serde(default, rename = "similar_images", deserialize_with = "null_as_default")]
    pub images: Vec<SimilarImage>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PlantDetails {
    #[serde(default)]
    pub common_names: Option<Vec<String>>,
    #[serde(default)]
    pub scientific_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub wiki_description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SimilarImage {
    pub url: String,
    #[serde(default)]
    pub similarity: Option<f64>,
}

impl Suggestion {
    /// First similar image, used as a thumbnail
    pub fn thumbnail_url(&self) -> Option<&str> {
        self.images.first().map(|image| image.url.as_str())
    }

    /// Best human-readable description available
    pub fn best_description(&self) -> Option<&str> {
        self.details
            .description
            .as_deref()
            .or(self.details.wiki_description.as_deref())
            .filter(|d| !d.trim().is_empty())
    }

    /// Pre-fill the add-plant form from this suggestion
    ///
    /// The suggestion name is used as the plant name; when it is blank the
    /// first common name is used instead.
    pub fn to_draft(&self) -> PlantDraft {
        let name = if self.name.trim().is_empty() {
            self.details
                .common_names
                .as_ref()
                .and_then(|names| names.first())
                .cloned()
                .unwrap_or_default()
        } else {
            self.name.clone()
        };

        PlantDraft {
            name,
            scientific_name: self.details.scientific_name.clone(),
            description: self.best_description().map(str::to_string),
            ..PlantDraft::default()
        }
    }
}

/// Pull a human-readable message out of an error body, if there is one
pub fn error_message(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    value
        .get("message")
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Treat an explicit `null` like a missing key
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
