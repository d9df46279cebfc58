//! Key-value persistence boundary.
//!
//! # Responsibility
//! - Define the backing key-value contract (`KeyValueBackend`).
//! - Provide in-process and SQLite backends.
//! - Wrap any backend in the fail-safe `PersistenceAdapter`.
//!
//! # Invariants
//! - Backends speak JSON text values; typing happens in the adapter only.
//! - Only `PersistenceAdapter` observes whether a backend is reachable.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod adapter;
pub mod memory;
pub mod sqlite;

pub use adapter::PersistenceAdapter;
pub use memory::MemoryBackend;
pub use sqlite::SqliteBackend;

pub type StorageResult<T> = Result<T, StorageError>;

/// Failure raised by a backend or by JSON (de)serialization.
#[derive(Debug)]
pub enum StorageError {
    /// Backing store cannot be reached right now.
    Unavailable(String),
    Sqlite(rusqlite::Error),
    Serialization(serde_json::Error),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable(reason) => write!(f, "backing store unavailable: {reason}"),
            Self::Sqlite(err) => write!(f, "sqlite error: {err}"),
            Self::Serialization(err) => write!(f, "invalid stored value: {err}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Unavailable(_) => None,
            Self::Sqlite(err) => Some(err),
            Self::Serialization(err) => Some(err),
        }
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization(value)
    }
}

/// String-keyed store of JSON text values.
pub trait KeyValueBackend {
    fn get(&self, key: &str) -> StorageResult<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> StorageResult<()>;
    fn remove(&mut self, key: &str) -> StorageResult<()>;
    /// Drops every entry held by the backend.
    fn clear(&mut self) -> StorageResult<()>;

    fn contains(&self, key: &str) -> StorageResult<bool> {
        Ok(self.get(key)?.is_some())
    }
}
