//! BrowseScreen - breed search, paging and favorite toggling.

use tracing::{debug, warn};

use super::StaleResponses;
use crate::dog::Dog;
use crate::favorites::{FavoriteSet, FavoritesError, FavoritesStore};
use crate::gateway::{DogService, GatewayError};
use crate::search::{self, ResultPage, SearchQuery, SortOrder};
use crate::storage::KeyValueStore;

/// A search issued by the browse screen, detached from the screen while in flight.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    generation: u64,
    query: SearchQuery,
}

impl SearchRequest {
    /// Sequence number; later requests have larger numbers.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn query(&self) -> &SearchQuery {
        &self.query
    }

    /// Run the search and bulk lookup. Touches nothing but the service.
    pub async fn execute<A: DogService>(self, api: &A) -> SearchOutcome {
        let result = search::fetch_page(api, &self.query).await;
        SearchOutcome {
            generation: self.generation,
            query: self.query,
            result,
        }
    }
}

/// A finished search waiting to be committed to the screen.
#[derive(Debug)]
pub struct SearchOutcome {
    generation: u64,
    query: SearchQuery,
    result: Result<ResultPage, GatewayError>,
}

impl SearchOutcome {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn query(&self) -> &SearchQuery {
        &self.query
    }

    pub fn result(&self) -> &Result<ResultPage, GatewayError> {
        &self.result
    }
}

/// State and actions of the browse screen.
///
/// Filter and sort changes reset to page 1 before searching again. Network failures are
/// logged and leave the last committed results on screen.
pub struct BrowseScreen<A, S> {
    api: A,
    store: FavoritesStore<S>,
    breeds: Vec<String>,
    query: SearchQuery,
    dogs: Vec<Dog>,
    favorites: FavoriteSet,
    total_pages: u32,
    loading: bool,
    generation: u64,
    stale_responses: StaleResponses,
}

impl<A: DogService, S: KeyValueStore> BrowseScreen<A, S> {
    pub fn new(api: A, store: FavoritesStore<S>) -> Self {
        Self {
            api,
            store,
            breeds: Vec::new(),
            query: SearchQuery::new(),
            dogs: Vec::new(),
            favorites: FavoriteSet::new(),
            total_pages: 1,
            loading: true,
            generation: 0,
            stale_responses: StaleResponses::default(),
        }
    }

    /// Choose what happens to results of superseded searches.
    pub fn with_stale_responses(mut self, policy: StaleResponses) -> Self {
        self.stale_responses = policy;
        self
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn breeds(&self) -> &[String] {
        &self.breeds
    }

    pub fn query(&self) -> &SearchQuery {
        &self.query
    }

    /// Edit the query without searching. Used to seed filters before `mount`.
    pub fn query_mut(&mut self) -> &mut SearchQuery {
        &mut self.query
    }

    /// Dogs of the last committed search, in result order.
    pub fn dogs(&self) -> &[Dog] {
        &self.dogs
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn favorites(&self) -> &FavoriteSet {
        &self.favorites
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.favorites.contains(id)
    }

    /// Count shown on the favorites badge.
    pub fn favorite_count(&self) -> usize {
        self.favorites.len()
    }

    /// Whether `request` is the most recent search this screen issued.
    pub fn is_current(&self, request: &SearchRequest) -> bool {
        request.generation == self.generation
    }

    /// Read persisted favorites, load the breed list and run the first search.
    pub async fn mount(&mut self) {
        self.load_saved_favorites();
        self.load_breed_list().await;
        self.run_search().await;
    }

    /// Replace the in-memory favorite set with the persisted one.
    pub fn load_saved_favorites(&mut self) {
        self.favorites = self.store.load();
    }

    /// Fetch the breed vocabulary. On failure the list stays empty.
    pub async fn load_breed_list(&mut self) {
        match self.api.breeds().await {
            Ok(breeds) => self.breeds = breeds,
            Err(e) => warn!(error = %e, "error loading breeds"),
        }
    }

    /// Search with the current query and commit the outcome.
    pub async fn run_search(&mut self) -> bool {
        let request = self.prepare_search();
        let outcome = request.execute(&self.api).await;
        self.commit_search(outcome)
    }

    /// Snapshot the current query into a new request and mark the screen loading.
    pub fn prepare_search(&mut self) -> SearchRequest {
        self.generation += 1;
        self.loading = true;
        debug!(
            generation = self.generation,
            page = self.query.page(),
            "search issued"
        );
        SearchRequest {
            generation: self.generation,
            query: self.query.clone(),
        }
    }

    /// Apply a finished search. Returns whether the displayed results changed.
    ///
    /// Under `StaleResponses::Commit` outcomes apply in arrival order: loading clears on
    /// every outcome and a late answer to an older request replaces a newer one. Under
    /// `StaleResponses::Discard` a superseded outcome leaves the screen untouched, loading
    /// flag included. Failures keep the previous results.
    pub fn commit_search(&mut self, outcome: SearchOutcome) -> bool {
        if outcome.generation != self.generation {
            match self.stale_responses {
                StaleResponses::Commit => {
                    debug!(generation = outcome.generation, latest = self.generation, "committing superseded search");
                }
                StaleResponses::Discard => {
                    debug!(generation = outcome.generation, latest = self.generation, "discarding superseded search");
                    return false;
                }
            }
        }
        self.loading = false;
        let page = match outcome.result {
            Ok(page) => page,
            Err(e) => {
                warn!(error = %e, generation = outcome.generation, "error searching dogs");
                return false;
            }
        };
        self.total_pages = page.total_pages();
        self.dogs = page.dogs;
        self.query.clamp_to(self.total_pages);
        true
    }

    /// Replace the breed filter, go back to page 1 and search.
    pub async fn set_breed_filter<I, B>(&mut self, breeds: I) -> bool
    where
        I: IntoIterator<Item = B>,
        B: Into<String>,
    {
        self.query.set_breeds(breeds);
        self.run_search().await
    }

    /// Change sort order, go back to page 1 and search.
    pub async fn set_sort_order(&mut self, sort: SortOrder) -> bool {
        self.query.set_sort(sort);
        self.run_search().await
    }

    /// Move to `page` (clamped to the known page count) and search.
    pub async fn go_to_page(&mut self, page: u32) -> bool {
        self.query.set_page(page, self.total_pages);
        self.run_search().await
    }

    /// Flip `id` in the favorite set and persist the whole set.
    ///
    /// Returns whether the dog is now a favorite. If the write fails the in-memory set
    /// is left as it was. The toggle applies to the set loaded at mount, so only one
    /// screen may mutate favorites at a time.
    pub fn toggle_favorite(&mut self, id: &str) -> Result<bool, FavoritesError> {
        let mut next = self.favorites.clone();
        let now_favorite = next.toggle(id);
        self.store.replace(&next)?;
        self.favorites = next;
        Ok(now_favorite)
    }
}
