//! FavoritesStore - the favorite set persisted under one key.

#[cfg(feature = "emitter")]
use std::sync::{Arc, Mutex};

#[cfg(feature = "emitter")]
use event_emitter_rs::EventEmitter;
use tracing::{debug, warn};

#[cfg(feature = "emitter")]
use super::FAVORITES_CHANGED;
use super::{FavoriteSet, FavoritesError, FAVORITES_KEY};
use crate::storage::KeyValueStore;

/// Reads and replaces the persisted favorite set.
///
/// Every mutation is a full read-modify-write followed by a single replace of the
/// stored value. Callers own the store exclusively while mutating; there is no
/// cross-writer locking.
#[derive(Clone)]
pub struct FavoritesStore<S> {
    store: S,
    #[cfg(feature = "emitter")]
    emitter: Arc<Mutex<EventEmitter>>,
}

impl<S: KeyValueStore> FavoritesStore<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            #[cfg(feature = "emitter")]
            emitter: Arc::new(Mutex::new(EventEmitter::new())),
        }
    }

    /// Current persisted set. Missing, unreadable or malformed data reads as empty.
    pub fn load(&self) -> FavoriteSet {
        let raw = match self.store.get(FAVORITES_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return FavoriteSet::new(),
            Err(e) => {
                warn!(error = %e, "could not read favorites, treating as empty");
                return FavoriteSet::new();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(set) => set,
            Err(e) => {
                warn!(error = %e, "malformed favorites value, treating as empty");
                FavoriteSet::new()
            }
        }
    }

    /// Replace the persisted set with `set`.
    pub fn replace(&self, set: &FavoriteSet) -> Result<(), FavoritesError> {
        let raw = serde_json::to_string(set).map_err(|e| FavoritesError::Encode(e.to_string()))?;
        self.store.put(FAVORITES_KEY, raw.clone())?;
        debug!(count = set.len(), "favorites written");
        self.notify(raw);
        Ok(())
    }

    /// Flip membership of `id` in the persisted set. Returns whether it is now a favorite.
    pub fn toggle(&self, id: &str) -> Result<bool, FavoritesError> {
        let mut set = self.load();
        let now_favorite = set.toggle(id);
        self.replace(&set)?;
        Ok(now_favorite)
    }

    /// Drop `id` from the persisted set. Absent ids leave storage untouched.
    pub fn remove(&self, id: &str) -> Result<bool, FavoritesError> {
        let mut set = self.load();
        if !set.remove(id) {
            return Ok(false);
        }
        self.replace(&set)?;
        Ok(true)
    }

    /// Register a listener called with the JSON id array after every successful write.
    ///
    /// Listeners run on the emitter's own threads, after the write has landed.
    #[cfg(feature = "emitter")]
    pub fn on_change<F>(&self, listener: F)
    where
        F: Fn(String) + Send + Sync + 'static,
    {
        match self.emitter.lock() {
            Ok(mut emitter) => {
                emitter.on(FAVORITES_CHANGED, listener);
            }
            Err(_) => warn!("favorites emitter poisoned, listener not registered"),
        }
    }

    #[cfg(feature = "emitter")]
    fn notify(&self, raw: String) {
        match self.emitter.lock() {
            Ok(mut emitter) => {
                emitter.emit(FAVORITES_CHANGED, raw);
            }
            Err(_) => warn!("favorites emitter poisoned, change not broadcast"),
        }
    }

    #[cfg(not(feature = "emitter"))]
    fn notify(&self, _raw: String) {}
}
