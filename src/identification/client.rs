/// Client for the plant.id style identification API
///
/// The HTTP stack is supplied by the host application through
/// [`HttpTransport`]; this client only builds the request and interprets
/// the response.

use async_trait::async_trait;

use crate::config::IdentificationSection;
use crate::identification::protocol::{error_message, IdentifyRequest, IdentifyResponse};
use crate::identification::{IdentificationClient, IdentificationError, Suggestion};
use crate::storage::JpegImage;

/// Raw HTTP response handed back by a transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Minimal HTTP capability the client needs
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// POST a JSON body and return whatever the server answered
    ///
    /// An `Err` means no HTTP response was received at all.
    async fn post_json(
        &self,
        url: &str,
        headers: &[(String, String)],
        body: Vec<u8>,
    ) -> Result<HttpResponse, String>;
}

/// Identification client speaking the plant.id v2 protocol
pub struct PlantIdClient<T: HttpTransport> {
    transport: T,
    settings: IdentificationSection,
}

impl<T: HttpTransport> PlantIdClient<T> {
    pub fn new(transport: T, settings: IdentificationSection) -> Self {
        Self { transport, settings }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn headers(&self) -> Vec<(String, String)> {
        vec![
            ("Content-Type".to_string(), "application/json".to_string()),
            (
                "Authorization".to_string(),
                format!("Api-Key {}", self.settings.api_key),
            ),
        ]
    }
}

#[async_trait]
impl<T: HttpTransport> IdentificationClient for PlantIdClient<T> {
    async fn identify(&self, image: &JpegImage) -> Result<Vec<Suggestion>, IdentificationError> {
        let request = IdentifyRequest::new(image, &self.settings);
        let body = serde_json::to_vec(&request)
            .map_err(|e| IdentificationError::Request(e.to_string()))?;

        tracing::debug!(
            "Sending {} byte photo to {}",
            image.len(),
            self.settings.endpoint
        );

        let response = self
            .transport
            .post_json(&self.settings.endpoint, &self.headers(), body)
            .await
            .map_err(|e| {
                tracing::error!("Identification request failed: {}", e);
                IdentificationError::InvalidResponse(e)
            })?;

        if response.status != 200 {
            let message = error_message(&response.body)
                .unwrap_or_else(|| "Unknown error occurred".to_string());
            tracing::error!(
                "Identification service returned {}: {}",
                response.status,
                message
            );
            return Err(IdentificationError::Transport {
                status: response.status,
                message,
            });
        }

        decode_suggestions(&response.body)
    }
}

/// Decode a successful response body into suggestions, best first
pub fn decode_suggestions(body: &[u8]) -> Result<Vec<Suggestion>, IdentificationError> {
    let decoded: IdentifyResponse = serde_json::from_slice(body).map_err(|e| {
        tracing::warn!("Identification response did not match the expected shape: {}", e);
        IdentificationError::Decoding(e.to_string())
    })?;

    let mut suggestions = decoded.result.classification.suggestions;

    if let Some(bad) = suggestions
        .iter()
        .find(|s| !(0.0..=1.0).contains(&s.probability))
    {
        return Err(IdentificationError::Decoding(format!(
            "probability {} for '{}' is outside [0, 1]",
            bad.probability, bad.name
        )));
    }

    suggestions.sort_by(|a, b| b.probability.total_cmp(&a.probability));
    Ok(suggestions)
}
