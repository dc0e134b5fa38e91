//! InMemoryKvStore - BTreeMap-backed store for tests, seeding and development.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use super::{KvError, KvStore};

/// In-memory key-value store.
///
/// Keys list in lexicographic order. Clone-friendly via Arc: clones share
/// the same storage.
#[derive(Clone, Default)]
pub struct InMemoryKvStore {
    storage: Arc<RwLock<BTreeMap<String, Vec<u8>>>>,
}

impl InMemoryKvStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.storage.read().map(|s| s.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check_key(key: &str) -> Result<(), KvError> {
        if key.is_empty() {
            return Err(KvError::InvalidKey(key.to_string()));
        }
        Ok(())
    }
}

impl KvStore for InMemoryKvStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, KvError> {
        let storage = self
            .storage
            .read()
            .map_err(|_| KvError::LockPoisoned("get"))?;
        Ok(storage.get(key).cloned())
    }

    fn list_keys(&self) -> Result<Vec<String>, KvError> {
        let storage = self
            .storage
            .read()
            .map_err(|_| KvError::LockPoisoned("list"))?;
        Ok(storage.keys().cloned().collect())
    }

    fn put(&self, key: &str, value: Vec<u8>) -> Result<(), KvError> {
        Self::check_key(key)?;
        let mut storage = self
            .storage
            .write()
            .map_err(|_| KvError::LockPoisoned("put"))?;
        storage.insert(key.to_string(), value);
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<bool, KvError> {
        let mut storage = self
            .storage
            .write()
            .map_err(|_| KvError::LockPoisoned("delete"))?;
        Ok(storage.remove(key).is_some())
    }
}
