//! Overlapping searches. Outcomes are committed in the order they arrive.

use std::time::Duration;

use dogmatch::favorites::FavoritesStore;
use dogmatch::storage::InMemoryKeyValueStore;
use dogmatch::{BrowseScreen, StaleResponses};
use tokio::sync::mpsc;

use crate::support::{kennel, SlowBreedService};

type SlowScreen = BrowseScreen<SlowBreedService<dogmatch::InMemoryDogService>, InMemoryKeyValueStore>;

fn slow_boxer_screen(policy: StaleResponses) -> SlowScreen {
    let api = SlowBreedService::new(kennel(), &[("Boxer", Duration::from_millis(150))]);
    BrowseScreen::new(api, FavoritesStore::new(InMemoryKeyValueStore::new()))
        .with_stale_responses(policy)
}

/// Issue a Boxer search, then a Pug search, run both at once and commit each as it
/// lands. The Boxer search is slow, so it lands last.
async fn race(screen: &mut SlowScreen) -> (bool, bool) {
    screen.query_mut().set_breeds(["Boxer"]);
    let first = screen.prepare_search();
    screen.query_mut().set_breeds(["Pug"]);
    let second = screen.prepare_search();
    assert!(!screen.is_current(&first));
    assert!(screen.is_current(&second));

    let (tx, mut rx) = mpsc::unbounded_channel();
    for request in [first, second] {
        let api = screen.api().clone();
        let tx = tx.clone();
        tokio::spawn(async move {
            let outcome = request.execute(&api).await;
            let _ = tx.send(outcome);
        });
    }
    drop(tx);

    let mut applied = Vec::new();
    while let Some(outcome) = rx.recv().await {
        let generation = outcome.generation();
        applied.push((generation, screen.commit_search(outcome)));
    }
    assert_eq!(applied.len(), 2);
    // Pug (generation 2) arrives first.
    assert_eq!(applied[0].0, 2);
    (applied[0].1, applied[1].1)
}

#[tokio::test]
async fn late_superseded_search_overwrites_newer_results() {
    let mut screen = slow_boxer_screen(StaleResponses::Commit);
    let (pug_applied, boxer_applied) = race(&mut screen).await;

    assert!(pug_applied);
    assert!(boxer_applied);
    // The query says Pug, but the screen shows the Boxer results that landed last.
    assert!(screen.query().breeds().contains("Pug"));
    assert!(!screen.dogs().is_empty());
    assert!(screen.dogs().iter().all(|d| d.breed == "Boxer"));
    assert_eq!(screen.total_pages(), 2);
    assert!(!screen.is_loading());
}

#[tokio::test]
async fn discard_policy_keeps_the_latest_request() {
    let mut screen = slow_boxer_screen(StaleResponses::Discard);
    let (pug_applied, boxer_applied) = race(&mut screen).await;

    assert!(pug_applied);
    assert!(!boxer_applied);
    assert_eq!(screen.dogs().len(), 10);
    assert!(screen.dogs().iter().all(|d| d.breed == "Pug"));
    assert_eq!(screen.total_pages(), 1);
}

#[tokio::test]
async fn discarded_early_answer_keeps_screen_loading() {
    let mut screen = slow_boxer_screen(StaleResponses::Discard);
    screen.mount().await;
    let shown = screen.dogs().to_vec();

    screen.query_mut().set_breeds(["Boxer"]);
    let first = screen.prepare_search();
    screen.query_mut().set_breeds(["Pug"]);
    let second = screen.prepare_search();

    let outcome = first.execute(screen.api()).await;
    assert!(!screen.commit_search(outcome));
    assert!(screen.is_loading());
    assert_eq!(screen.dogs(), shown.as_slice());

    let outcome = second.execute(screen.api()).await;
    assert!(screen.commit_search(outcome));
    assert!(!screen.is_loading());
    assert!(screen.dogs().iter().all(|d| d.breed == "Pug"));
}

#[tokio::test]
async fn searches_that_land_in_order_show_the_latest() {
    let mut screen = slow_boxer_screen(StaleResponses::Commit);
    screen.query_mut().set_breeds(["Akita"]);
    let first = screen.prepare_search();
    screen.query_mut().set_breeds(["Pug"]);
    let second = screen.prepare_search();

    let outcome = first.execute(screen.api()).await;
    screen.commit_search(outcome);
    let outcome = second.execute(screen.api()).await;
    screen.commit_search(outcome);

    assert!(screen.dogs().iter().all(|d| d.breed == "Pug"));
}
