/// Identify a photo, pick a suggestion, and save it as a plant
use async_trait::async_trait;
use plant_baby::config::IdentificationSection;
use plant_baby::identification::{HttpResponse, HttpTransport};
use plant_baby::storage::ResolvedImage;
use plant_baby::*;
use tempfile::TempDir;

struct FixedTransport {
    status: u16,
    body: &'static str,
}

#[async_trait]
impl HttpTransport for FixedTransport {
    async fn post_json(
        &self,
        _url: &str,
        _headers: &[(String, String)],
        _body: Vec<u8>,
    ) -> Result<HttpResponse, String> {
        Ok(HttpResponse {
            status: self.status,
            body: self.body.as_bytes().to_vec(),
        })
    }
}

const RESPONSE: &str = r#"{
    "id": 12345,
    "result": {"classification": {"suggestions": [
        {"id": 7, "name": "Ficus lyrata", "probability": 0.88,
         "details": {
            "common_names": ["Fiddle-leaf fig"],
            "scientific_name": "Ficus lyrata",
            "description": "A fig with large violin-shaped leaves."
         },
         "similar_images": [{"url": "https://img.example/ficus.jpg"}]},
        {"id": "x9", "name": "Ficus elastica", "probability": 0.07}
    ]}}
}"#;

fn photo() -> JpegImage {
    JpegImage::from_bytes(vec![0xFF, 0xD8, 0xFF, 0xDB, 0x00, 0x43]).expect("valid jpeg header")
}

#[tokio::test]
async fn test_suggestion_becomes_plant_with_photo() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let mut app = PlantBaby::open(PlantBabyConfig::default().with_data_dir(dir.path()))
        .expect("Failed to open app");

    let client = PlantIdClient::new(
        FixedTransport {
            status: 200,
            body: RESPONSE,
        },
        IdentificationSection::default(),
    );
    let suggestions = client.identify(&photo()).await.expect("identification");

    assert_eq!(suggestions.len(), 2);
    let best = &suggestions[0];
    assert_eq!(best.id.as_deref(), Some("7"));
    assert_eq!(suggestions[1].id.as_deref(), Some("x9"));

    let (plant, outcome) = app
        .create_plant_from_suggestion(best, Some(&photo()))
        .expect("Failed to create plant");

    assert!(outcome.is_durable());
    assert_eq!(plant.name, "Ficus lyrata");
    assert_eq!(plant.scientific_name.as_deref(), Some("Ficus lyrata"));
    assert_eq!(
        plant.description.as_deref(),
        Some("A fig with large violin-shaped leaves.")
    );
    assert!(plant.care_history().is_empty());
    assert!(matches!(app.images().resolve(&plant), ResolvedImage::LocalFile(_)));
    assert_eq!(app.repository().total_plants(), 1);
}

#[tokio::test]
async fn test_service_error_surfaces_message() {
    let client = PlantIdClient::new(
        FixedTransport {
            status: 429,
            body: r#"{"message": "Daily limit reached"}"#,
        },
        IdentificationSection::default(),
    );

    let err = client.identify(&photo()).await.unwrap_err();
    assert_eq!(err.user_message(), "Daily limit reached");
}

#[test]
fn test_non_jpeg_photo_is_rejected_before_sending() {
    let err = JpegImage::from_bytes(b"\x89PNG\r\n".to_vec()).unwrap_err();
    let err = IdentificationError::from(err);
    assert!(matches!(err, IdentificationError::ImageConversion(_)));
}
