/// Local photo storage
///
/// Captured or picked photos are written as JPEG files into an
/// application-private directory. Plants keep only the file name.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use uuid::Uuid;

use crate::domain::{ImageSource, Plant};
use crate::storage::StorageError;

/// JPEG start-of-image marker
const JPEG_SOI: [u8; 2] = [0xFF, 0xD8];

/// Errors raised when bytes cannot be used as a JPEG photo
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ImageError {
    #[error("image data is empty")]
    Empty,

    #[error("image data is not a JPEG")]
    NotJpeg,
}

/// Encoded JPEG bytes ready to be saved or uploaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JpegImage(Vec<u8>);

impl JpegImage {
    /// Wrap bytes after checking they start like a JPEG file
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Result<Self, ImageError> {
        let bytes = bytes.into();
        if bytes.is_empty() {
            return Err(ImageError::Empty);
        }
        if !bytes.starts_with(&JPEG_SOI) {
            return Err(ImageError::NotJpeg);
        }
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A plant image after checking what is actually available on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedImage {
    LocalFile(PathBuf),
    Remote(String),
    BundledAsset(String),
    None,
}

/// Directory of plant photos
#[derive(Debug, Clone)]
pub struct ImageStore {
    dir: PathBuf,
}

impl ImageStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write a photo and return the file name to keep on the plant
    pub fn save_jpeg(&self, image: &JpegImage, name_hint: &str) -> Result<String, StorageError> {
        fs::create_dir_all(&self.dir)?;

        let file_name = format!("{}-{}.jpg", sanitize_hint(name_hint), Uuid::new_v4());
        let path = self.dir.join(&file_name);
        fs::write(&path, image.as_bytes())?;

        tracing::debug!("Saved {} byte photo to {}", image.len(), path.display());
        Ok(file_name)
    }

    /// Full path for a stored file name
    ///
    /// Absolute paths (as written by older builds) are returned unchanged.
    pub fn path_for(&self, file_name: &str) -> PathBuf {
        let candidate = Path::new(file_name);
        if candidate.is_absolute() {
            candidate.to_path_buf()
        } else {
            self.dir.join(candidate)
        }
    }

    /// Delete a stored photo; a missing file is not an error
    pub fn remove(&self, file_name: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.path_for(file_name)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Resolve the image to display for a plant
    ///
    /// A local file wins when it exists; a dangling local reference falls
    /// back to the plant's URL.
    pub fn resolve(&self, plant: &Plant) -> ResolvedImage {
        if let ImageSource::LocalFile(file_name) = plant.image_source() {
            let path = self.path_for(file_name);
            if path.is_file() {
                return ResolvedImage::LocalFile(path);
            }
            tracing::warn!("Photo {} for plant {} is missing", path.display(), plant.id());
        }

        let mut fallback = plant.clone();
        fallback.image_path = None;
        match fallback.image_source() {
            ImageSource::Remote(url) => ResolvedImage::Remote(url.to_string()),
            ImageSource::BundledAsset(name) => ResolvedImage::BundledAsset(name.to_string()),
            ImageSource::LocalFile(_) | ImageSource::None => ResolvedImage::None,
        }
    }
}

fn sanitize_hint(hint: &str) -> String {
    let cleaned: String = hint
        .trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '-' })
        .collect();

    if cleaned.trim_matches('-').is_empty() {
        "plant".to_string()
    } else {
        cleaned
    }
}
