/// Storage layer for persisting habit data
///
/// The engine persists through a small key-value interface holding JSON
/// documents: one key for the habit collection and one for the history log.
/// SQLite provides the durable backend and an in-memory map serves tests.

pub mod memory;
pub mod migrations;
pub mod sqlite;

// Re-export the main storage types
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use serde_json::Value;
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

    #[error("Migration error: {0}")]
    Migration(String),

    #[error("Write rejected for key '{key}': {reason}")]
    WriteRejected { key: String, reason: String },
}

/// Trait defining the persistence boundary
///
/// Values are JSON documents. Backends must hand back exactly what was saved.
pub trait KeyValueStore {
    /// Load the document stored under `key`, if any
    fn load(&self, key: &str) -> Result<Option<Value>, StorageError>;

    /// Store a document under `key`, replacing any previous value
    fn save(&self, key: &str, value: &Value) -> Result<(), StorageError>;

    /// Store several documents as one unit
    ///
    /// The default writes each key in turn; backends that support
    /// transactions override this so either every key is written or none is.
    fn save_all(&self, entries: &[(&str, Value)]) -> Result<(), StorageError> {
        for (key, value) in entries {
            self.save(key, value)?;
        }
        Ok(())
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn load(&self, key: &str) -> Result<Option<Value>, StorageError> {
        (**self).load(key)
    }

    fn save(&self, key: &str, value: &Value) -> Result<(), StorageError> {
        (**self).save(key, value)
    }

    fn save_all(&self, entries: &[(&str, Value)]) -> Result<(), StorageError> {
        (**self).save_all(entries)
    }
}

/// Names of the two persisted documents
///
/// When a user identity is supplied the keys are namespaced per user so
/// several accounts can share one backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKeys {
    pub habits: String,
    pub history: String,
}

impl StorageKeys {
    pub const HABITS: &'static str = "habits";
    pub const HISTORY: &'static str = "habitHistory";

    /// Keys for a user, or the shared default keys when no user is given
    pub fn for_user(user_id: Option<&str>) -> Self {
        match user_id.map(str::trim).filter(|id| !id.is_empty()) {
            Some(id) => Self {
                habits: format!("user:{}:{}", id, Self::HABITS),
                history: format!("user:{}:{}", id, Self::HISTORY),
            },
            None => Self::default(),
        }
    }
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            habits: Self::HABITS.to_string(),
            history: Self::HISTORY.to_string(),
        }
    }
}
