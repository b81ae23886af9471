//! JSON-file-backed storage.
//!
//! The whole store is one JSON object on disk. Every mutation rewrites the
//! file through a temporary sibling and a rename, so a crash mid-write
//! leaves the previous contents intact. The in-memory view only changes
//! once the write has landed, so it never runs ahead of the file.

use crate::{KeyValueStore, StorageError, StorageResult};
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Durable store persisted to a single JSON file.
pub struct FileStorage {
    path: PathBuf,
    data: Mutex<BTreeMap<String, String>>,
}

impl FileStorage {
    /// Open the store at `path`, creating parent directories. A missing file
    /// is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> StorageResult<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let data = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            if content.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&content).map_err(|e| {
                    StorageError::Encoding(format!("{}: {}", path.display(), e))
                })?
            }
        } else {
            BTreeMap::new()
        };

        tracing::debug!(path = %path.display(), keys = data.len(), "opened file storage");

        Ok(Self {
            path,
            data: Mutex::new(data),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, data: &BTreeMap<String, String>) -> StorageResult<()> {
        let content = serde_json::to_string_pretty(data)
            .map_err(|e| StorageError::Encoding(e.to_string()))?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, content)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl KeyValueStore for FileStorage {
    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut data = self.data.lock();
        let mut next = data.clone();
        next.insert(key.to_string(), value.to_string());
        self.persist(&next)?;
        *data = next;
        Ok(())
    }

    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.data.lock().get(key).cloned())
    }

    fn delete(&self, key: &str) -> StorageResult<bool> {
        let mut data = self.data.lock();
        if !data.contains_key(key) {
            return Ok(false);
        }
        let mut next = data.clone();
        next.remove(key);
        self.persist(&next)?;
        *data = next;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_is_empty_store() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::open(dir.path().join("nested").join("storage.json")).unwrap();

        assert_eq!(storage.get("authToken").unwrap(), None);
        assert!(storage.path().parent().unwrap().exists());
    }

    #[test]
    fn test_values_survive_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("storage.json");

        {
            let storage = FileStorage::open(&path).unwrap();
            storage.set("authToken", "abc").unwrap();
            storage.set("cart", "[]").unwrap();
            assert!(storage.delete("cart").unwrap());
        }

        let reopened = FileStorage::open(&path).unwrap();
        assert_eq!(reopened.get("authToken").unwrap(), Some("abc".to_string()));
        assert_eq!(reopened.get("cart").unwrap(), None);
    }

    #[test]
    fn test_delete_missing_key_does_not_write() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("storage.json");
        let storage = FileStorage::open(&path).unwrap();

        assert!(!storage.delete("user").unwrap());
        assert!(!path.exists());
    }

    #[test]
    fn test_failed_write_leaves_memory_matching_disk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("storage.json");
        let storage = FileStorage::open(&path).unwrap();
        storage.set("authToken", "T").unwrap();

        // A directory where the temp file goes makes every persist fail.
        std::fs::create_dir(path.with_extension("json.tmp")).unwrap();

        assert!(storage.delete("authToken").is_err());
        assert_eq!(storage.get("authToken").unwrap(), Some("T".to_string()));

        assert!(storage.set("cart", "[]").is_err());
        assert_eq!(storage.get("cart").unwrap(), None);

        let reopened = FileStorage::open(&path).unwrap();
        assert_eq!(reopened.get("authToken").unwrap(), Some("T".to_string()));
    }

    #[test]
    fn test_corrupt_file_is_an_encoding_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("storage.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            FileStorage::open(&path),
            Err(StorageError::Encoding(_))
        ));
    }
}
