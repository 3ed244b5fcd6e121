//! Storage - key-value persistence port.
//!
//! A `KeyValueStore` holds string values under string keys. Writes always replace the
//! whole value; there are no partial updates.

mod file;
mod in_memory;

use std::fmt;

pub use file::FileKeyValueStore;
pub use in_memory::InMemoryKeyValueStore;

/// Error type for key-value store operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// Reading or writing the backing medium failed.
    Io { key: String, message: String },
    /// A shared lock was poisoned by a panicking writer.
    LockPoisoned(&'static str),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Io { key, message } => {
                write!(f, "storage io error on key {}: {}", key, message)
            }
            StorageError::LockPoisoned(operation) => {
                write!(f, "storage lock poisoned during {}", operation)
            }
        }
    }
}

impl std::error::Error for StorageError {}

/// Abstract string storage keyed by name.
pub trait KeyValueStore: Send + Sync {
    /// Value under `key`, or `None` if nothing was ever written.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value under `key`.
    fn put(&self, key: &str, value: String) -> Result<(), StorageError>;
}
