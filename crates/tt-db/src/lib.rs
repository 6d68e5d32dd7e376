//! Storage layer for the time tracker.
//!
//! Everything is persisted through a small key-value surface
//! ([`KeyValueStore`]): each key holds one JSON document that is read and
//! overwritten as a whole. [`EntryStore`] builds the time entry list and the
//! profile record on top of it.
//!
//! # Backends
//!
//! - [`Database`] keeps the values in a single `SQLite` table using `rusqlite`.
//! - [`MemoryStore`] keeps them in a `HashMap`, for tests.
//!
//! # Thread Safety
//!
//! [`Database`] wraps a `rusqlite::Connection`, which is `Send` but not `Sync`.
//! Writes take `&mut self`, so a store has a single writer at a time. Two
//! processes appending to the same database can still race: the last full
//! write of the entry list wins.

use std::path::Path;

use chrono::{SecondsFormat, Utc};
use rusqlite::{Connection, OptionalExtension, params};
use thiserror::Error;

mod memory;
mod store;

pub use memory::MemoryStore;
pub use store::{ENTRIES_KEY, EntryStore, PROFILE_KEY};

/// Failure inside a storage backend.
#[derive(Debug, Error)]
pub enum BackendError {
    /// An error from the underlying database.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    /// The backend refused the operation.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Errors surfaced by [`EntryStore`].
///
/// None of these are fatal to the timer; callers log them and keep going.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading a key from storage failed.
    #[error("failed to read {key}: {source}")]
    Read {
        key: &'static str,
        #[source]
        source: BackendError,
    },
    /// Writing a key to storage failed.
    #[error("failed to write {key}: {source}")]
    Write {
        key: &'static str,
        #[source]
        source: BackendError,
    },
    /// The stored value is not valid JSON for its type.
    #[error("invalid data stored under {key}: {source}")]
    Deserialize {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },
    /// The value could not be encoded.
    #[error("failed to encode {key}: {source}")]
    Serialize {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Whole-value string storage addressed by key.
pub trait KeyValueStore {
    /// Returns the value stored under `key`, or `None` if it was never set.
    fn get(&self, key: &str) -> Result<Option<String>, BackendError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<(), BackendError>;
}

/// `SQLite`-backed key-value store.
///
/// See the [module documentation](self) for thread safety considerations.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Opens a database at the given path, creating it if necessary.
    ///
    /// The database schema is automatically initialized on first open.
    pub fn open(path: &Path) -> Result<Self, BackendError> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Opens an in-memory database.
    ///
    /// Useful for testing. The database is destroyed when the connection closes.
    pub fn open_in_memory() -> Result<Self, BackendError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Initializes the database schema.
    ///
    /// This is idempotent - safe to call on an already-initialized database.
    fn init(&self) -> Result<(), BackendError> {
        self.conn.execute_batch(
            "
            -- kv: one JSON document per key
            -- updated_at: ISO 8601 format (e.g., '2024-01-15T10:30:00Z')
            CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
            ",
        )?;
        Ok(())
    }
}

impl KeyValueStore for Database {
    fn get(&self, key: &str) -> Result<Option<String>, BackendError> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?", params![key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), BackendError> {
        let updated_at = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
        self.conn.execute(
            "
            INSERT INTO kv (key, value, updated_at) VALUES (?, ?, ?)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
            ",
            params![key, value, updated_at],
        )?;
        Ok(())
    }
}
