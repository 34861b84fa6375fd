//! In-process storage port.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::{StoragePort, StorageError, StorageResult};

/// A storage port backed by a map in memory.
///
/// Nothing survives the process. Useful for tests and for embedding the
/// store where the host already owns persistence.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently held.
    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    /// Check if no keys are held.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of all keys, sorted.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self
            .entries
            .read()
            .map(|e| e.keys().cloned().collect())
            .unwrap_or_default();
        keys.sort();
        keys
    }
}

fn poisoned() -> StorageError {
    StorageError::Unavailable("memory store lock poisoned".to_string())
}

impl StoragePort for MemoryStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let entries = self.entries.read().map_err(|_| poisoned())?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut entries = self.entries.write().map_err(|_| poisoned())?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        let mut entries = self.entries.write().map_err(|_| poisoned())?;
        entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_missing_key() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get("rc_cart").unwrap(), None);
    }

    #[test]
    fn test_set_replaces_value() {
        let storage = MemoryStorage::new();
        storage.set("rc_cart", "[]").unwrap();
        storage.set("rc_cart", "[1]").unwrap();

        assert_eq!(storage.get("rc_cart").unwrap().as_deref(), Some("[1]"));
        assert_eq!(storage.len(), 1);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let storage = MemoryStorage::new();
        storage.set("wishlist", "[]").unwrap();
        storage.remove("wishlist").unwrap();
        storage.remove("wishlist").unwrap();

        assert!(storage.is_empty());
    }

    #[test]
    fn test_keys_sorted() {
        let storage = MemoryStorage::new();
        storage.set("wishlist", "[]").unwrap();
        storage.set("rc_cart", "[]").unwrap();

        assert_eq!(storage.keys(), vec!["rc_cart", "wishlist"]);
    }
}
