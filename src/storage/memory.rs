/// Volatile key-value store
///
/// Keeps serialized documents in a map. Writes can be switched off to
/// simulate a full or read-only backend.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use serde_json::Value;

use crate::storage::{KeyValueStore, StorageError};

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
    reject_writes: Cell<bool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following write fail (or succeed again) with `WriteRejected`
    pub fn set_reject_writes(&self, reject: bool) {
        self.reject_writes.set(reject);
    }

    /// The serialized text stored under a key
    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<Value>, StorageError> {
        match self.entries.borrow().get(key) {
            Some(text) => Ok(Some(serde_json::from_str(text)?)),
            None => Ok(None),
        }
    }

    fn save(&self, key: &str, value: &Value) -> Result<(), StorageError> {
        if self.reject_writes.get() {
            return Err(StorageError::WriteRejected {
                key: key.to_string(),
                reason: "storage is not accepting writes".to_string(),
            });
        }

        let text = serde_json::to_string(value)?;
        self.entries.borrow_mut().insert(key.to_string(), text);
        Ok(())
    }

    fn save_all(&self, entries: &[(&str, Value)]) -> Result<(), StorageError> {
        if let Some((key, _)) = entries.first().filter(|_| self.reject_writes.get()) {
            return Err(StorageError::WriteRejected {
                key: key.to_string(),
                reason: "storage is not accepting writes".to_string(),
            });
        }

        // serialize everything first so a bad document leaves the map untouched
        let mut serialized = Vec::with_capacity(entries.len());
        for (key, value) in entries {
            serialized.push((key.to_string(), serde_json::to_string(value)?));
        }
        self.entries.borrow_mut().extend(serialized);
        Ok(())
    }
}
