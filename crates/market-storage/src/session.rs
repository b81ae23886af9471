//! The process-wide client session.

use crate::{KeyValueStore, KeyValueStoreExt, MemoryStorage, StorageKeys, StorageResult};
use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Bearer token plus the small cache mirrors that live beside it.
///
/// The token is held in memory and written through to storage, so reads
/// never touch the store. An empty token counts as no token.
pub struct Session {
    storage: Box<dyn KeyValueStore>,
    token: RwLock<Option<String>>,
}

impl Session {
    /// Create a session over `storage`, restoring a previously stored token.
    pub fn new(storage: Box<dyn KeyValueStore>) -> Self {
        let token = match storage.get(StorageKeys::AUTH_TOKEN) {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                tracing::warn!(error = %e, "failed to restore stored token");
                None
            }
        };

        tracing::debug!(authenticated = token.is_some(), "session created");

        Self {
            storage,
            token: RwLock::new(token),
        }
    }

    /// Session over a fresh in-memory store.
    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryStorage::new()))
    }

    /// Set the bearer token.
    ///
    /// The in-memory token is updated even when persisting fails, so the
    /// current process stays signed in; the error reports the lost write.
    pub fn set_token(&self, token: &str) -> StorageResult<()> {
        if token.is_empty() {
            return self.clear_token();
        }
        *self.token.write() = Some(token.to_string());
        self.storage.set(StorageKeys::AUTH_TOKEN, token)
    }

    /// Forget the bearer token. Idempotent.
    pub fn clear_token(&self) -> StorageResult<()> {
        *self.token.write() = None;
        self.storage.delete(StorageKeys::AUTH_TOKEN).map(|_| ())
    }

    /// Current token, snapshotted.
    pub fn token(&self) -> Option<String> {
        self.token.read().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.read().is_some()
    }

    /// Mirror the signed-in user's profile.
    pub fn set_user<T: Serialize>(&self, user: &T) -> StorageResult<()> {
        self.storage.set_json(StorageKeys::USER, user)
    }

    /// Cached profile, if any.
    pub fn user<T: DeserializeOwned>(&self) -> StorageResult<Option<T>> {
        self.storage.get_json(StorageKeys::USER)
    }

    /// Mirror the cart contents.
    pub fn set_cart<T: Serialize>(&self, items: &[T]) -> StorageResult<()> {
        self.storage.set_json(StorageKeys::CART, items)
    }

    /// Cached cart contents, if any.
    pub fn cart<T: DeserializeOwned>(&self) -> StorageResult<Option<Vec<T>>> {
        self.storage.get_json(StorageKeys::CART)
    }

    /// Number of items in the cart mirror; 0 when absent or unreadable.
    pub fn cart_len(&self) -> usize {
        match self.cart::<serde_json::Value>() {
            Ok(items) => items.map_or(0, |items| items.len()),
            Err(e) => {
                tracing::warn!(error = %e, "cart mirror unreadable");
                0
            }
        }
    }

    /// Drop the token and every mirror (logout). Idempotent.
    ///
    /// Every key is attempted even after a failure; the first error is
    /// returned so the caller knows the stored session may still be live.
    pub fn clear(&self) -> StorageResult<()> {
        *self.token.write() = None;
        let mut first_err = None;
        for key in StorageKeys::ALL {
            if let Err(e) = self.storage.delete(key) {
                tracing::warn!(key, error = %e, "failed to delete stored key");
                first_err.get_or_insert(e);
            }
        }
        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Underlying store.
    pub fn storage(&self) -> &dyn KeyValueStore {
        self.storage.as_ref()
    }
}
