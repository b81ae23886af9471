//! Storage trait definitions.

use crate::{StorageError, StorageResult};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Durable string key-value store.
///
/// Plays the role browser local storage plays for a web front end: a small
/// cache mirror, never the source of truth.
pub trait KeyValueStore: Send + Sync {
    /// Store a value
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Retrieve a value
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Delete a value. Returns whether the key existed.
    fn delete(&self, key: &str) -> StorageResult<bool>;

    /// Check if a key exists
    fn has(&self, key: &str) -> StorageResult<bool> {
        Ok(self.get(key)?.is_some())
    }
}

/// JSON helpers available on every store, including `dyn KeyValueStore`.
pub trait KeyValueStoreExt: KeyValueStore {
    /// Serialize `value` as JSON and store it under `key`.
    fn set_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> StorageResult<()> {
        let encoded =
            serde_json::to_string(value).map_err(|e| StorageError::Encoding(e.to_string()))?;
        self.set(key, &encoded)
    }

    /// Read and deserialize the JSON stored under `key`.
    fn get_json<T: DeserializeOwned>(&self, key: &str) -> StorageResult<Option<T>> {
        match self.get(key)? {
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|e| StorageError::Encoding(format!("{}: {}", key, e))),
            None => Ok(None),
        }
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStoreExt for S {}
