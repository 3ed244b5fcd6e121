//! Favorites - the locally persisted set of liked dog ids.
//!
//! The set lives under a single key as a JSON array and is the only source of truth for
//! favorite membership. Every change rewrites the whole array.
//!
//! ## Example
//!
//! ```ignore
//! use dogmatch::favorites::FavoritesStore;
//! use dogmatch::storage::InMemoryKeyValueStore;
//!
//! let favorites = FavoritesStore::new(InMemoryKeyValueStore::new());
//! favorites.toggle("dog-1")?;
//! assert!(favorites.load().contains("dog-1"));
//! ```

mod set;
mod store;

use std::fmt;

use crate::storage::StorageError;

pub use set::FavoriteSet;
pub use store::FavoritesStore;

/// Storage key holding the favorite id array.
pub const FAVORITES_KEY: &str = "favorites";

/// Event fired after the favorites value is rewritten.
pub const FAVORITES_CHANGED: &str = "FavoritesChanged";

/// Error type for favorites persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FavoritesError {
    /// The key-value store refused the write.
    Storage(StorageError),
    /// The set could not be serialized.
    Encode(String),
}

impl fmt::Display for FavoritesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FavoritesError::Storage(e) => write!(f, "favorites storage error: {}", e),
            FavoritesError::Encode(msg) => write!(f, "favorites encode error: {}", msg),
        }
    }
}

impl std::error::Error for FavoritesError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FavoritesError::Storage(e) => Some(e),
            FavoritesError::Encode(_) => None,
        }
    }
}

impl From<StorageError> for FavoritesError {
    fn from(err: StorageError) -> Self {
        FavoritesError::Storage(err)
    }
}
