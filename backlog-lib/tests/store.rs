mod common;

use std::collections::HashSet;

use backlog_core::{GamePayload, SeriesKind};
use backlog_lib::EntityStore;
use common::{Call, MockGateway, game_series, series_game};

fn numbered_games(count: usize) -> MockGateway {
    let names: Vec<String> = (1..=count).map(|i| format!("Game {}", i)).collect();
    let refs: Vec<&str> = names.iter().map(String::as_str).collect();
    MockGateway::with_games(&refs)
}

fn payload(name: &str) -> GamePayload {
    GamePayload {
        name: name.to_string(),
        image_url: String::new(),
        time_played: String::new(),
        completion_status: Default::default(),
        rating: 5,
        problems: String::new(),
        notes: String::new(),
        platinum_status: false,
        trophies_earned: 0,
        trophies_total: 0,
    }
}

#[tokio::test]
async fn initial_load_fetches_first_page_and_both_series() {
    let mut store = EntityStore::new(numbered_games(30), 24);
    store.load_initial().await.unwrap();

    assert_eq!(store.games().len(), 24);
    let calls = store.gateway().calls();
    assert!(calls.contains(&Call::ListGames { limit: 24, skip: 0 }));
    assert!(calls.contains(&Call::ListGameSeries));
    assert!(calls.contains(&Call::ListMovieSeries));
}

#[tokio::test]
async fn append_load_starts_after_loaded_games() {
    let mut store = EntityStore::new(numbered_games(30), 24);
    store.load_games(true).await.unwrap();
    store.gateway().clear_calls();

    let added = store.load_games(false).await.unwrap();

    assert_eq!(
        store.gateway().calls(),
        vec![Call::ListGames { limit: 24, skip: 24 }]
    );
    assert_eq!(added, 6);
    assert_eq!(store.games().len(), 30);
}

#[tokio::test]
async fn consecutive_append_loads_never_overlap() {
    let mut store = EntityStore::new(numbered_games(60), 24);
    store.load_games(true).await.unwrap();
    store.load_games(false).await.unwrap();
    store.load_games(false).await.unwrap();

    let skips: Vec<usize> = store
        .gateway()
        .calls()
        .into_iter()
        .filter_map(|c| match c {
            Call::ListGames { skip, .. } => Some(skip),
            _ => None,
        })
        .collect();
    assert_eq!(skips, vec![0, 24, 48]);

    let ids: HashSet<&str> = store.games().iter().map(|g| g.id.as_str()).collect();
    assert_eq!(ids.len(), 60);
    assert_eq!(store.games().len(), 60);
}

#[tokio::test]
async fn failed_load_keeps_collection_and_records_error() {
    let mut store = EntityStore::new(numbered_games(3), 24);
    store.load_games(true).await.unwrap();

    store.gateway().fail_on("list_games");
    let err = store.load_games(false).await.unwrap_err();
    assert_eq!(err.what, "games");
    assert_eq!(store.games().len(), 3);
    assert!(store.games_error().is_some());

    store.gateway().recover("list_games");
    store.load_games(true).await.unwrap();
    assert_eq!(store.games_error(), None);
    assert_eq!(store.games().len(), 3);
}

#[tokio::test]
async fn partial_series_failure_keeps_the_other_collection() {
    let mock = MockGateway::new();
    mock.push_game_series(game_series("s1", "Souls", Vec::new()));
    mock.push_movie_series(common::movie_series("m1", "Alien", &["Alien"]));
    let mut store = EntityStore::new(mock, 24);
    assert!(store.load_series().await);

    store.gateway().fail_on("list_movie_series");
    store
        .gateway()
        .push_game_series(game_series("s2", "Zelda", Vec::new()));
    assert!(!store.load_series().await);

    assert_eq!(store.game_series().len(), 2);
    assert_eq!(store.movie_series().len(), 1);
}

#[tokio::test]
async fn creating_a_game_resets_paging_and_reloads_series() {
    let mut store = EntityStore::new(numbered_games(50), 24);
    store.load_games(true).await.unwrap();
    store.load_games(false).await.unwrap();
    assert_eq!(store.games().len(), 48);
    store.gateway().clear_calls();

    let created = store.create_game(&payload("Celeste")).await.unwrap();
    assert_eq!(created.name, "Celeste");

    assert_eq!(
        store.gateway().calls()[..2],
        [
            Call::CreateGame("Celeste".to_string()),
            Call::ListGames { limit: 24, skip: 0 },
        ]
    );
    assert!(store.gateway().calls().contains(&Call::ListMovieSeries));
    assert_eq!(store.games().len(), 24);
}

#[tokio::test]
async fn deleting_a_game_removes_it_from_series_children() {
    let mock = MockGateway::with_games(&["Dark Souls", "Bloodborne", "Sekiro"]);
    mock.push_game_series(game_series(
        "s1",
        "FromSoftware",
        vec![
            series_game("1", "Dark Souls"),
            series_game("3", "Sekiro"),
        ],
    ));
    let mut store = EntityStore::new(mock, 24);
    store.load_initial().await.unwrap();

    store.delete_game("3").await.unwrap();

    assert!(store.find_game("3").is_none());
    assert_eq!(store.games().len(), 2);
    for series in store.game_series() {
        assert!(series.games.iter().all(|g| g.id.as_deref() != Some("3")));
    }
    assert!(!store.series_stale());
}

#[tokio::test]
async fn delete_stands_when_series_reload_fails() {
    let mock = MockGateway::with_games(&["Dark Souls", "Bloodborne", "Sekiro"]);
    mock.push_game_series(game_series(
        "s1",
        "FromSoftware",
        vec![series_game("3", "Sekiro")],
    ));
    let mut store = EntityStore::new(mock, 24);
    store.load_initial().await.unwrap();

    store.gateway().fail_on("list_game_series");
    store.delete_game("3").await.unwrap();

    assert!(store.find_game("3").is_none());
    assert!(store.series_stale());
    // the cached nested copy is still there until a reload succeeds
    assert_eq!(store.game_series()[0].games.len(), 1);

    store.gateway().recover("list_game_series");
    assert!(store.load_series().await);
    assert!(!store.series_stale());
    assert!(store.game_series()[0].games.is_empty());
}

#[tokio::test]
async fn failed_delete_changes_nothing() {
    let mut store = EntityStore::new(MockGateway::with_games(&["Hades"]), 24);
    store.load_initial().await.unwrap();
    store.gateway().fail_on("delete_game");
    store.gateway().clear_calls();

    let err = store.delete_game("1").await.unwrap_err();
    assert_eq!(err.action, "delete game");
    assert_eq!(store.games().len(), 1);
    // no reconciliation after a failed mutation
    assert_eq!(store.gateway().calls(), vec![Call::DeleteGame("1".to_string())]);
}

#[tokio::test]
async fn find_series_by_kind() {
    let mock = MockGateway::new();
    mock.push_game_series(game_series("7", "Halo", Vec::new()));
    mock.push_movie_series(common::movie_series("7", "Star Wars", &[]));
    let mut store = EntityStore::new(mock, 24);
    store.load_series().await;

    let game = store.find_series(SeriesKind::Game, "7").unwrap();
    let movie = store.find_series(SeriesKind::Movie, "7").unwrap();
    assert_eq!(game.series_name(), "Halo");
    assert_eq!(movie.series_name(), "Star Wars");
    assert!(store.find_series(SeriesKind::Game, "8").is_none());
}

#[test]
fn zero_page_size_is_raised_to_one() {
    let store = EntityStore::new(MockGateway::new(), 0);
    assert_eq!(store.page_size(), 1);
}

#[tokio::test]
async fn health_check_is_logged_and_can_fail() {
    use backlog_client::Gateway;

    let gateway = MockGateway::new();
    assert_eq!(gateway.health().await.unwrap().message, "ok");

    gateway.fail_on("health");
    assert!(gateway.health().await.is_err());
    assert_eq!(gateway.calls(), vec![Call::Health, Call::Health]);
}
