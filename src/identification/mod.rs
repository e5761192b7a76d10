/// Plant identification service boundary
///
/// The classification itself happens in an external service. This module
/// owns the contract with it: building the request, decoding the response
/// defensively, and classifying failures into one user-facing message.

pub mod client;
pub mod protocol;

pub use client::{HttpResponse, HttpTransport, PlantIdClient};
pub use protocol::{IdentifyRequest, PlantDetails, SimilarImage, Suggestion};

use async_trait::async_trait;
use thiserror::Error;

use crate::storage::{ImageError, JpegImage};

/// Errors that can occur while identifying a plant
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IdentificationError {
    #[error("Image could not be prepared: {0}")]
    ImageConversion(#[from] ImageError),

    #[error("Request could not be built: {0}")]
    Request(String),

    #[error("Identification service error ({status}): {message}")]
    Transport { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Response could not be decoded: {0}")]
    Decoding(String),
}

impl IdentificationError {
    /// Single message suitable for showing to the user
    pub fn user_message(&self) -> String {
        match self {
            IdentificationError::ImageConversion(_) => {
                "The photo could not be prepared for identification.".to_string()
            }
            IdentificationError::Request(_) => {
                "The identification request could not be created.".to_string()
            }
            IdentificationError::Transport { message, .. } => message.clone(),
            IdentificationError::InvalidResponse(_) => {
                "The identification service sent an invalid response.".to_string()
            }
            IdentificationError::Decoding(_) => {
                "The identification result could not be read.".to_string()
            }
        }
    }
}

/// Anything that can turn a photo into ranked candidate species
#[async_trait]
pub trait IdentificationClient: Send + Sync {
    /// Identify the plant in `image`, best candidate first
    async fn identify(&self, image: &JpegImage) -> Result<Vec<Suggestion>, IdentificationError>;
}
