//! Browse, favorite and match against the stub, with favorites on disk.

use dogmatch::favorites::{FavoritesStore, FAVORITES_KEY};
use dogmatch::storage::{FileKeyValueStore, KeyValueStore};
use dogmatch::{BrowseScreen, DogService, FavoritesScreen, HttpGateway, SortOrder};

use crate::support::{catalog, logged_in, start_stub};

#[tokio::test]
async fn browse_favorite_and_match_over_http() {
    let dir = tempfile::tempdir().unwrap();
    let gateway = logged_in().await;
    let favorites = FavoritesStore::new(FileKeyValueStore::new(dir.path()));

    let mut browse = BrowseScreen::new(gateway.clone(), favorites.clone());
    browse.mount().await;
    assert_eq!(browse.breeds(), ["Beagle", "German Shepherd"]);
    assert_eq!(browse.total_pages(), 3);
    assert_eq!(browse.dogs().len(), 20);

    browse.set_breed_filter(["German Shepherd"]).await;
    browse.go_to_page(2).await;
    assert_eq!(browse.dogs().len(), 10);
    let picked: Vec<String> = browse.dogs()[..3].iter().map(|d| d.id.clone()).collect();
    for id in &picked {
        assert!(browse.toggle_favorite(id).unwrap());
    }
    assert_eq!(browse.favorite_count(), 3);

    let mut screen = FavoritesScreen::new(gateway.clone(), favorites.clone());
    screen.load_favorites().await;
    let loaded: Vec<String> = screen.favorites().iter().map(|d| d.id.clone()).collect();
    assert_eq!(loaded, picked);

    let outcome = screen.generate_match().await.unwrap();
    assert!(picked.contains(&outcome.dog_id));
    assert!(outcome.announcement().starts_with("You've been matched with Shep "));

    screen.remove_favorite(&picked[0]).unwrap();
    assert_eq!(screen.favorites().len(), 2);

    gateway.logout().await.unwrap();
}

#[tokio::test]
async fn favorites_persist_across_sessions() {
    let dir = tempfile::tempdir().unwrap();
    let base = start_stub(catalog()).await;

    {
        let gateway = HttpGateway::new(base.clone()).unwrap();
        gateway.login("Ada", "ada@example.com").await.unwrap();
        let store = FavoritesStore::new(FileKeyValueStore::new(dir.path()));
        let mut browse = BrowseScreen::new(gateway.clone(), store);
        browse.mount().await;
        browse.set_sort_order(SortOrder::Descending).await;
        let first = browse.dogs()[0].id.clone();
        assert!(first.starts_with("gs-"));
        browse.toggle_favorite(&first).unwrap();
        gateway.logout().await.unwrap();
    }

    let disk = FileKeyValueStore::new(dir.path());
    let raw = disk.get(FAVORITES_KEY).unwrap().unwrap();
    assert!(raw.starts_with("[\"gs-"));

    let gateway = HttpGateway::new(base).unwrap();
    gateway.login("Ada", "ada@example.com").await.unwrap();
    let mut browse = BrowseScreen::new(gateway, FavoritesStore::new(disk));
    browse.mount().await;
    assert_eq!(browse.favorite_count(), 1);
}

#[tokio::test]
async fn expired_session_degrades_screens_without_panicking() {
    let dir = tempfile::tempdir().unwrap();
    let gateway = logged_in().await;
    gateway.logout().await.unwrap();

    let favorites = FavoritesStore::new(FileKeyValueStore::new(dir.path()));
    favorites.toggle("gs-01").unwrap();

    let mut browse = BrowseScreen::new(gateway.clone(), favorites.clone());
    browse.mount().await;
    assert!(browse.breeds().is_empty());
    assert!(browse.dogs().is_empty());
    assert!(!browse.is_loading());
    assert!(browse.is_favorite("gs-01"));

    let mut screen = FavoritesScreen::new(gateway, favorites);
    screen.load_favorites().await;
    assert!(screen.favorites().is_empty());
    assert!(screen.generate_match().await.is_none());
}
