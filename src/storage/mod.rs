/// Storage layer for persisting plant data
///
/// This module handles the durable side of the application: a key-value blob
/// store holding the serialized plant collection, and the directory of
/// photos referenced by plants.

pub mod images;
pub mod memory;
pub mod migrations;
pub mod sqlite;

// Re-export the main storage types
pub use images::{ImageError, ImageStore, JpegImage, ResolvedImage};
pub use memory::MemoryBlobStore;
pub use sqlite::SqliteBlobStore;

use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database connection error: {0}")]
    Connection(String),

    #[error("Database query error: {0}")]
    Query(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("File error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Migration error: {0}")]
    Migration(String),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Trait defining a durable key-value blob store
///
/// The repository keeps its whole collection under one key and rewrites it
/// on every mutation. Implementations only need to store opaque bytes.
pub trait BlobStore {
    /// Read the blob stored under `key`, if any
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;

    /// Store `value` under `key`, replacing any previous blob
    fn write(&self, key: &str, value: &[u8]) -> Result<(), StorageError>;

    /// Remove the blob stored under `key` (no-op if absent)
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

impl<S: BlobStore + ?Sized> BlobStore for &S {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        (**self).write(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}
