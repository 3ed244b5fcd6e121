//! InMemoryKeyValueStore - HashMap-backed store for testing and development.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::{KeyValueStore, StorageError};

/// Internal stored representation of a value.
struct StoredValue {
    value: String,
    version: u64,
}

/// In-memory key-value store backed by a HashMap.
///
/// Every `put` bumps the key's version, so tests can count writes. Clone-friendly via Arc.
#[derive(Clone, Default)]
pub struct InMemoryKeyValueStore {
    storage: Arc<RwLock<HashMap<String, StoredValue>>>,
}

impl InMemoryKeyValueStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of writes made to `key` so far (0 if never written).
    pub fn version(&self, key: &str) -> Result<u64, StorageError> {
        let storage = self
            .storage
            .read()
            .map_err(|_| StorageError::LockPoisoned("version"))?;
        Ok(storage.get(key).map(|s| s.version).unwrap_or(0))
    }
}

impl KeyValueStore for InMemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let storage = self
            .storage
            .read()
            .map_err(|_| StorageError::LockPoisoned("get"))?;
        Ok(storage.get(key).map(|s| s.value.clone()))
    }

    fn put(&self, key: &str, value: String) -> Result<(), StorageError> {
        let mut storage = self
            .storage
            .write()
            .map_err(|_| StorageError::LockPoisoned("put"))?;

        let new_version = storage.get(key).map(|s| s.version + 1).unwrap_or(1);
        storage.insert(
            key.to_string(),
            StoredValue {
                value,
                version: new_version,
            },
        );
        Ok(())
    }
}
