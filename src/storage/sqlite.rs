/// SQLite implementation of the blob store
///
/// This module provides the concrete durable store: a single key-value table
/// in an SQLite database file.

use std::path::Path;

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};

use crate::storage::{migrations, BlobStore, StorageError};

/// SQLite-based blob store
///
/// This struct holds a connection to the SQLite database and implements the
/// operations defined in the BlobStore trait.
pub struct SqliteBlobStore {
    conn: Connection,
}

impl SqliteBlobStore {
    /// Open (or create) a blob store at the given database path
    ///
    /// This opens the database file and runs any necessary migrations to
    /// ensure the schema is up to date.
    pub fn open(db_path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let db_path = db_path.as_ref();
        let conn = Connection::open(db_path)
            .map_err(|e| StorageError::Connection(format!("Failed to open database: {}", e)))?;

        migrations::initialize_database(&conn)?;

        tracing::info!("SQLite blob store initialized at: {:?}", db_path);

        Ok(Self { conn })
    }

    /// Open a private in-memory database (nothing survives the process)
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| StorageError::Connection(format!("Failed to open database: {}", e)))?;

        migrations::initialize_database(&conn)?;

        Ok(Self { conn })
    }

    /// List the keys currently stored
    pub fn keys(&self) -> Result<Vec<String>, StorageError> {
        let mut stmt = self.conn.prepare("SELECT key FROM blobs ORDER BY key")?;
        let key_iter = stmt.query_map([], |row| row.get::<_, String>(0))?;

        let mut keys = Vec::new();
        for key in key_iter {
            keys.push(key?);
        }

        Ok(keys)
    }
}

impl BlobStore for SqliteBlobStore {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM blobs WHERE key = ?1",
                params![key],
                |row| row.get::<_, Vec<u8>>(0),
            )
            .optional()?;

        Ok(value)
    }

    fn write(&self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO blobs (key, value, updated_at) VALUES (?1, ?2, ?3)",
            params![key, value, Utc::now()],
        )?;

        tracing::debug!("Wrote {} bytes under key {}", value.len(), key);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.conn
            .execute("DELETE FROM blobs WHERE key = ?1", params![key])?;

        tracing::debug!("Removed key {}", key);
        Ok(())
    }
}
