//! In-memory storage, used by tests and as a throwaway session store.

use crate::{KeyValueStore, StorageResult};
use parking_lot::Mutex;
use std::collections::HashMap;

/// Process-local store; nothing survives the process.
#[derive(Default)]
pub struct MemoryStorage {
    data: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.data.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.lock().is_empty()
    }
}

impl KeyValueStore for MemoryStorage {
    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.data.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.data.lock().get(key).cloned())
    }

    fn delete(&self, key: &str) -> StorageResult<bool> {
        Ok(self.data.lock().remove(key).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::KeyValueStoreExt;

    #[test]
    fn test_memory_storage() {
        let storage = MemoryStorage::new();

        storage.set("test_key", "test_value").unwrap();
        assert_eq!(storage.get("test_key").unwrap(), Some("test_value".to_string()));

        assert!(storage.has("test_key").unwrap());
        assert!(!storage.has("nonexistent").unwrap());

        assert!(storage.delete("test_key").unwrap());
        assert!(!storage.delete("test_key").unwrap());
        assert_eq!(storage.get("test_key").unwrap(), None);
        assert!(storage.is_empty());
    }

    #[test]
    fn test_json_helpers() {
        let storage = MemoryStorage::new();
        storage.set_json("cart", &vec![1, 2, 3]).unwrap();

        let cart: Vec<u32> = storage.get_json("cart").unwrap().unwrap();
        assert_eq!(cart, vec![1, 2, 3]);
        assert_eq!(storage.get("cart").unwrap().as_deref(), Some("[1,2,3]"));

        let missing: Option<Vec<u32>> = storage.get_json("user").unwrap();
        assert!(missing.is_none());
    }

    #[test]
    fn test_get_json_reports_corrupt_value() {
        let storage = MemoryStorage::new();
        storage.set("cart", "not json").unwrap();

        let result: StorageResult<Option<Vec<u32>>> = storage.get_json("cart");
        assert!(matches!(result, Err(crate::StorageError::Encoding(_))));
    }
}
