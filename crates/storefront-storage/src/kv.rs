//! Typed JSON cache over a storage port.

use serde::{de::DeserializeOwned, Serialize};

use crate::{StoragePort, StorageResult};

/// Type-safe cache over any [`StoragePort`].
///
/// Provides automatic JSON serialization for any type that implements
/// `Serialize` and `DeserializeOwned`.
#[derive(Debug, Clone)]
pub struct Cache<S> {
    port: S,
}

impl<S: StoragePort> Cache<S> {
    /// Wrap a storage port.
    pub fn new(port: S) -> Self {
        Self { port }
    }

    /// Borrow the underlying port.
    pub fn port(&self) -> &S {
        &self.port
    }

    /// Get a value from the cache.
    ///
    /// Returns `None` if the key doesn't exist, and
    /// [`crate::StorageError::Serialize`] if the stored text is not a `T`.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let cart: Option<Vec<CartLine>> = cache.get("rc_cart")?;
    /// ```
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> StorageResult<Option<T>> {
        match self.port.get(key)? {
            Some(text) => Ok(Some(serde_json::from_str(&text)?)),
            None => Ok(None),
        }
    }

    /// Set a value in the cache.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// cache.set("rc_cart", &lines)?;
    /// ```
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> StorageResult<()> {
        let text = serde_json::to_string(value)?;
        self.port.set(key, &text)
    }

    /// Delete a value from the cache.
    pub fn delete(&self, key: &str) -> StorageResult<()> {
        self.port.remove(key)
    }

    /// Check if a key exists in the cache.
    pub fn exists(&self, key: &str) -> StorageResult<bool> {
        Ok(self.port.get(key)?.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MemoryStorage, StorageError};
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Entry {
        id: String,
        quantity: u32,
    }

    #[test]
    fn test_get_missing() {
        let cache = Cache::new(MemoryStorage::new());
        let value: Option<Vec<Entry>> = cache.get("rc_cart").unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn test_set_then_get() {
        let cache = Cache::new(MemoryStorage::new());
        let entries = vec![Entry {
            id: "A".to_string(),
            quantity: 2,
        }];
        cache.set("rc_cart", &entries).unwrap();

        let read: Vec<Entry> = cache.get("rc_cart").unwrap().unwrap();
        assert_eq!(read, entries);
        assert!(cache.exists("rc_cart").unwrap());
    }

    #[test]
    fn test_get_foreign_data_is_serialize_error() {
        let storage = MemoryStorage::new();
        storage.set("rc_cart", "not json").unwrap();
        let cache = Cache::new(&storage);

        let err = cache.get::<Vec<Entry>>("rc_cart").unwrap_err();
        assert!(matches!(err, StorageError::Serialize(_)));
    }

    #[test]
    fn test_delete() {
        let cache = Cache::new(MemoryStorage::new());
        cache.set("wishlist", &Vec::<Entry>::new()).unwrap();
        cache.delete("wishlist").unwrap();
        assert!(!cache.exists("wishlist").unwrap());
    }
}
