//! ScholarLens Storage Layer
//!
//! Implements the `DocumentStore` trait. The store holds at most one document:
//! saving a new one evicts whatever was there, so restoring "the most recent
//! document" after a restart is unambiguous.
//!
//! # Backends
//!
//! - `SqliteDocumentStore`: persistent, one row in a `documents` table
//! - `MemoryDocumentStore`: process-local, for tests and ephemeral sessions
//!
//! # Examples
//!
//! ```
//! use scholarlens_domain::traits::DocumentStore;
//! use scholarlens_store::SqliteDocumentStore;
//!
//! let mut store = SqliteDocumentStore::in_memory().unwrap();
//! store.save("doc-1", "paper.pdf", b"%PDF-1.7").unwrap();
//! let doc = store.load_most_recent().unwrap().unwrap();
//! assert_eq!(doc.name, "paper.pdf");
//! ```

#![warn(missing_docs)]

use rusqlite::{params, Connection, OptionalExtension};
use scholarlens_domain::traits::DocumentStore;
use scholarlens_domain::StoredDocument;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Invalid data format
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// SQLite-backed single-document store
///
/// # Thread Safety
///
/// SQLite connections are not thread-safe. Each thread should open its own
/// store instance.
pub struct SqliteDocumentStore {
    conn: Connection,
}

impl SqliteDocumentStore {
    /// Open (or create) a store at `path`
    ///
    /// ```no_run
    /// use scholarlens_store::SqliteDocumentStore;
    ///
    /// let store = SqliteDocumentStore::open("scholarlens.db").unwrap();
    /// ```
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Open a store that lives only as long as this value
    pub fn in_memory() -> Result<Self, StoreError> {
        Self::open(":memory:")
    }

    fn initialize_schema(&self) -> Result<(), StoreError> {
        self.conn.execute_batch(include_str!("schema.sql"))?;
        Ok(())
    }

    /// Number of stored documents (zero or one)
    pub fn count(&self) -> Result<usize, StoreError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM documents", [], |row| row.get(0))?;
        usize::try_from(count).map_err(|_| StoreError::InvalidData(format!("negative count {}", count)))
    }
}

impl DocumentStore for SqliteDocumentStore {
    type Error = StoreError;

    fn save(&mut self, id: &str, name: &str, bytes: &[u8]) -> Result<(), Self::Error> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM documents", [])?;
        tx.execute(
            "INSERT INTO documents (id, name, bytes, saved_at) VALUES (?1, ?2, ?3, ?4)",
            params![id, name, bytes, now_millis()],
        )?;
        tx.commit()?;

        debug!(id, name, size = bytes.len(), "Stored document");
        Ok(())
    }

    fn load_most_recent(&self) -> Result<Option<StoredDocument>, Self::Error> {
        let doc = self
            .conn
            .query_row(
                "SELECT id, name, bytes FROM documents ORDER BY saved_at DESC LIMIT 1",
                [],
                |row| {
                    Ok(StoredDocument {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        bytes: row.get(2)?,
                    })
                },
            )
            .optional()?;
        Ok(doc)
    }

    fn clear_all(&mut self) -> Result<(), Self::Error> {
        let removed = self.conn.execute("DELETE FROM documents", [])?;
        debug!(removed, "Cleared document store");
        Ok(())
    }
}

/// In-memory single-document store
#[derive(Debug, Default, Clone)]
pub struct MemoryDocumentStore {
    current: Option<StoredDocument>,
}

impl MemoryDocumentStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

impl DocumentStore for MemoryDocumentStore {
    type Error = StoreError;

    fn save(&mut self, id: &str, name: &str, bytes: &[u8]) -> Result<(), Self::Error> {
        self.current = Some(StoredDocument {
            id: id.to_string(),
            name: name.to_string(),
            bytes: bytes.to_vec(),
        });
        Ok(())
    }

    fn load_most_recent(&self) -> Result<Option<StoredDocument>, Self::Error> {
        Ok(self.current.clone())
    }

    fn clear_all(&mut self) -> Result<(), Self::Error> {
        self.current = None;
        Ok(())
    }
}

fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}
