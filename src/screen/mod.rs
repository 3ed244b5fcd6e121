//! Screens - the browse and favorites controllers.
//!
//! Each screen owns its state and is driven through `&mut self` async methods, so one
//! action finishes before the next starts. Both share the favorites value through a
//! [`FavoritesStore`](crate::favorites::FavoritesStore) over the same key-value store.
//!
//! ## Example
//!
//! ```ignore
//! use dogmatch::favorites::FavoritesStore;
//! use dogmatch::screen::{BrowseScreen, FavoritesScreen};
//!
//! let favorites = FavoritesStore::new(store);
//! let mut browse = BrowseScreen::new(gateway.clone(), favorites.clone());
//! browse.mount().await;
//! browse.toggle_favorite(&browse.dogs()[0].id.clone())?;
//!
//! let mut liked = FavoritesScreen::new(gateway, favorites);
//! liked.load_favorites().await;
//! if let Some(outcome) = liked.generate_match().await {
//!     println!("{}", outcome.announcement());
//! }
//! ```

mod browse;
mod favorites;

pub use browse::{BrowseScreen, SearchOutcome, SearchRequest};
pub use favorites::{FavoritesScreen, MatchOutcome};

/// What the browse screen does with the result of a search that has been superseded
/// by a newer one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StaleResponses {
    /// Apply every result as it arrives; the last one to arrive wins.
    #[default]
    Commit,
    /// Drop results whose request is no longer the latest.
    Discard,
}
