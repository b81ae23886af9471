//! Local storage for the marketplace client.
//!
//! - [`KeyValueStore`]: the storage seam; swap in [`MemoryStorage`] for tests
//! - [`FileStorage`]: durable JSON-file store used by the CLI
//! - [`Session`]: bearer token plus profile/cart mirrors over any store

mod file;
mod keys;
mod memory;
mod session;
mod traits;

pub use file::FileStorage;
pub use keys::StorageKeys;
pub use memory::MemoryStorage;
pub use session::Session;
pub use traits::{KeyValueStore, KeyValueStoreExt};

use thiserror::Error;

/// Error type for storage operations.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Backend-specific storage error
    #[error("Platform storage error: {0}")]
    Platform(String),

    /// Encoding/decoding error
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;
