//! FavoritesScreen - liked dogs, removal and match generation.

use tracing::warn;

use crate::dog::{self, Dog};
use crate::favorites::{FavoritesError, FavoritesStore};
use crate::gateway::DogService;
use crate::storage::KeyValueStore;

/// The service's pick, resolved against the records already on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchOutcome {
    pub dog_id: String,
    /// The loaded record for `dog_id`, if the screen had one.
    pub dog: Option<Dog>,
}

impl MatchOutcome {
    pub fn name(&self) -> Option<&str> {
        self.dog.as_ref().map(|dog| dog.name.as_str())
    }

    /// Message shown to the user. A pick with no local record reads `undefined`.
    pub fn announcement(&self) -> String {
        format!(
            "You've been matched with {}!",
            self.name().unwrap_or("undefined")
        )
    }
}

/// State and actions of the favorites screen.
pub struct FavoritesScreen<A, S> {
    api: A,
    store: FavoritesStore<S>,
    favorites: Vec<Dog>,
    loading: bool,
}

impl<A: DogService, S: KeyValueStore> FavoritesScreen<A, S> {
    pub fn new(api: A, store: FavoritesStore<S>) -> Self {
        Self {
            api,
            store,
            favorites: Vec::new(),
            loading: true,
        }
    }

    /// Loaded favorite records, in persisted order.
    pub fn favorites(&self) -> &[Dog] {
        &self.favorites
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Read the persisted ids and resolve them into records.
    ///
    /// No favorites means an empty list and no request. A failed lookup is logged and
    /// leaves the list empty.
    pub async fn load_favorites(&mut self) {
        let ids = self.store.load();
        if ids.is_empty() {
            self.favorites.clear();
        } else {
            match self.api.dogs(ids.as_slice()).await {
                Ok(dogs) => self.favorites = dog::order_by_ids(ids.as_slice(), dogs),
                Err(e) => {
                    warn!(error = %e, "error loading favorites");
                    self.favorites.clear();
                }
            }
        }
        self.loading = false;
    }

    /// Remove `id` from storage and from the loaded records.
    ///
    /// Returns whether storage held the id. Nothing changes in memory if the write
    /// fails.
    pub fn remove_favorite(&mut self, id: &str) -> Result<bool, FavoritesError> {
        let removed = self.store.remove(id)?;
        self.favorites.retain(|dog| dog.id != id);
        Ok(removed)
    }

    /// Ask the service for a match among the loaded favorites.
    ///
    /// The picked id is looked up among the records already loaded, never fetched again.
    /// Returns `None` with no favorites or on a service failure.
    pub async fn generate_match(&self) -> Option<MatchOutcome> {
        if self.favorites.is_empty() {
            return None;
        }
        let ids: Vec<String> = self.favorites.iter().map(|dog| dog.id.clone()).collect();
        let result = match self.api.match_dog(&ids).await {
            Ok(result) => result,
            Err(e) => {
                warn!(error = %e, "error generating match");
                return None;
            }
        };
        let dog = self
            .favorites
            .iter()
            .find(|dog| dog.id == result.dog_id)
            .cloned();
        if dog.is_none() {
            warn!(dog_id = %result.dog_id, "matched dog is not among loaded favorites");
        }
        Some(MatchOutcome {
            dog_id: result.dog_id,
            dog,
        })
    }
}
