//! dogmatch - dog adoption search client.
//!
//! Browse adoptable dogs by breed with paging, keep a locally persisted favorite set,
//! and ask the remote service to pick a match from those favorites.
//!
//! - [`gateway`]: typed access to the dog service (`HttpGateway`, `InMemoryDogService`).
//! - [`storage`]: key-value persistence port with in-memory and file backends.
//! - [`favorites`]: the favorite id set and its persistence.
//! - [`search`]: query state, page arithmetic and the two-step page fetch.
//! - [`screen`]: the browse and favorites controllers tying it all together.

pub mod config;
pub mod dog;
pub mod favorites;
pub mod gateway;
pub mod screen;
pub mod search;
pub mod storage;

pub use config::{Config, ConfigError};
pub use dog::{Dog, MatchResult, SearchResults};
pub use favorites::{FavoriteSet, FavoritesError, FavoritesStore};
pub use gateway::{DogService, GatewayError, HttpGateway, InMemoryDogService};
pub use screen::{BrowseScreen, FavoritesScreen, MatchOutcome, StaleResponses};
pub use search::{SearchParams, SearchQuery, SortOrder, PAGE_SIZE};
pub use storage::{FileKeyValueStore, InMemoryKeyValueStore, KeyValueStore, StorageError};
