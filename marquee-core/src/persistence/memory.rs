use parking_lot::Mutex;
use std::collections::HashMap;

use super::{PersistentStore, validate_key};
use crate::error::PersistenceError;

/// Process-local store. Useful for tests and for hosts without disk access.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with an existing value.
    pub fn with_entry(key: &str, bytes: impl Into<Vec<u8>>) -> Self {
        let store = Self::new();
        store.entries.lock().insert(key.to_string(), bytes.into());
        store
    }

    /// Raw bytes currently stored under `key`.
    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.entries.lock().get(key).cloned()
    }
}

impl PersistentStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, PersistenceError> {
        validate_key(key)?;
        Ok(self.entries.lock().get(key).cloned())
    }

    fn write(&self, key: &str, bytes: &[u8]) -> Result<(), PersistenceError> {
        validate_key(key)?;
        self.entries.lock().insert(key.to_string(), bytes.to_vec());
        Ok(())
    }
}
