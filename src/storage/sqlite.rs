/// SQLite implementation of the key-value store
///
/// Documents are stored as JSON text in a single table keyed by name.

use std::path::Path;

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use serde_json::Value;

use crate::storage::{migrations, KeyValueStore, StorageError};

/// SQLite-based storage implementation
///
/// Holds one connection; every `save_all` runs inside a transaction so the
/// habit collection and the history log are always written together.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) a database file and bring its schema up to date
    pub fn new(db_path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let db_path = db_path.as_ref();
        let conn = Connection::open(db_path)
            .map_err(|e| StorageError::Connection(format!("Failed to open database: {}", e)))?;

        let store = Self::with_connection(conn)?;
        tracing::info!("SQLite storage initialized at: {:?}", db_path);
        Ok(store)
    }

    /// Open a private in-memory database
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| StorageError::Connection(format!("Failed to open in-memory database: {}", e)))?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self, StorageError> {
        migrations::initialize_database(&conn)?;
        Ok(Self { conn })
    }

    fn write(conn: &Connection, key: &str, value: &Value) -> Result<(), StorageError> {
        let payload = serde_json::to_string(value)?;
        conn.execute(
            "INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, payload, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }
}

impl KeyValueStore for SqliteStore {
    fn load(&self, key: &str) -> Result<Option<Value>, StorageError> {
        let payload: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;

        match payload {
            Some(text) => Ok(Some(serde_json::from_str(&text)?)),
            None => Ok(None),
        }
    }

    fn save(&self, key: &str, value: &Value) -> Result<(), StorageError> {
        Self::write(&self.conn, key, value)?;
        tracing::debug!("Saved document: {}", key);
        Ok(())
    }

    fn save_all(&self, entries: &[(&str, Value)]) -> Result<(), StorageError> {
        let tx = self.conn.unchecked_transaction()?;
        for (key, value) in entries {
            Self::write(&tx, key, value)?;
        }
        tx.commit()?;

        tracing::debug!("Saved {} documents in one transaction", entries.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn test_load_missing_key() {
        let store = SqliteStore::open_in_memory().unwrap();
        assert!(store.load("habits").unwrap().is_none());
    }

    #[test]
    fn test_save_and_overwrite() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.save("habits", &json!([{"id": "a"}])).unwrap();
        store.save("habits", &json!([])).unwrap();

        assert_eq!(store.load("habits").unwrap(), Some(json!([])));
    }

    #[test]
    fn test_save_all_persists_to_file() {
        let temp_dir = tempdir().unwrap();
        let db_path = temp_dir.path().join("test.db");

        {
            let store = SqliteStore::new(&db_path).unwrap();
            store
                .save_all(&[
                    ("habits", json!([{"id": "h1", "name": "Read"}])),
                    ("habitHistory", json!({"2024-01-01": {"h1": true}})),
                ])
                .unwrap();
        }

        let reopened = SqliteStore::new(&db_path).unwrap();
        assert_eq!(
            reopened.load("habitHistory").unwrap(),
            Some(json!({"2024-01-01": {"h1": true}}))
        );
        assert_eq!(
            reopened.load("habits").unwrap(),
            Some(json!([{"id": "h1", "name": "Read"}]))
        );
    }
}
