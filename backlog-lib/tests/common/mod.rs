#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Mutex;

use backlog_client::{ClientError, Deleted, GameChildAdded, Gateway, HealthStatus};
use backlog_core::{
    CompletionStatus, Game, GamePayload, GameSeries, Movie, MovieSeries, NewSeries, Series,
    SeriesGame, SeriesGamePayload, SeriesKind, SeriesRename,
};

/// One request as seen by the mock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Health,
    ListGames { limit: usize, skip: usize },
    GetGame(String),
    CreateGame(String),
    UpdateGame(String),
    DeleteGame(String),
    ListGameSeries,
    ListMovieSeries,
    GetSeries(SeriesKind, String),
    CreateSeries(SeriesKind, String),
    UpdateSeries(SeriesKind, String),
    DeleteSeries(SeriesKind, String),
    AddGameToSeries(String),
    AddMovieToSeries(String),
}

#[derive(Default)]
struct State {
    games: Vec<Game>,
    game_series: Vec<GameSeries>,
    movie_series: Vec<MovieSeries>,
    next_id: u64,
    calls: Vec<Call>,
    fail_on: HashSet<&'static str>,
}

impl State {
    fn fresh_id(&mut self) -> String {
        self.next_id += 1;
        format!("id-{}", self.next_id)
    }

    fn check(&self, op: &'static str) -> Result<(), ClientError> {
        if self.fail_on.contains(op) {
            Err(ClientError::Server {
                status: 500,
                message: format!("{} failed", op),
            })
        } else {
            Ok(())
        }
    }
}

/// In-memory stand-in for the remote service. Behaves like the server:
/// deleting a game also removes it from every game series.
#[derive(Default)]
pub struct MockGateway {
    state: Mutex<State>,
}

impl MockGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_games(names: &[&str]) -> Self {
        let mock = Self::new();
        for (i, name) in names.iter().enumerate() {
            mock.push_game(game(&(i + 1).to_string(), name));
        }
        mock
    }

    pub fn push_game(&self, game: Game) {
        self.state.lock().unwrap().games.push(game);
    }

    pub fn push_game_series(&self, series: GameSeries) {
        self.state.lock().unwrap().game_series.push(series);
    }

    pub fn push_movie_series(&self, series: MovieSeries) {
        self.state.lock().unwrap().movie_series.push(series);
    }

    /// Make every request of operation `op` fail with a 500.
    pub fn fail_on(&self, op: &'static str) {
        self.state.lock().unwrap().fail_on.insert(op);
    }

    pub fn recover(&self, op: &'static str) {
        self.state.lock().unwrap().fail_on.remove(op);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state.lock().unwrap().calls.clear();
    }

    /// Calls that change remote state.
    pub fn writes(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| {
                !matches!(
                    c,
                    Call::Health
                        | Call::ListGames { .. }
                        | Call::GetGame(_)
                        | Call::ListGameSeries
                        | Call::ListMovieSeries
                        | Call::GetSeries(..)
                )
            })
            .collect()
    }

    pub fn remote_games(&self) -> Vec<Game> {
        self.state.lock().unwrap().games.clone()
    }

    pub fn remote_movie_series(&self) -> Vec<MovieSeries> {
        self.state.lock().unwrap().movie_series.clone()
    }

    fn record(&self, call: Call, op: &'static str) -> Result<std::sync::MutexGuard<'_, State>, ClientError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(call);
        state.check(op)?;
        Ok(state)
    }
}

pub fn game(id: &str, name: &str) -> Game {
    Game {
        id: id.to_string(),
        name: name.to_string(),
        image_url: None,
        time_played: None,
        completion_status: CompletionStatus::NotStarted,
        rating: Some(5),
        trophies_earned: None,
        trophies_total: None,
        platinum_status: false,
        problems: None,
        notes: None,
        created_at: None,
    }
}

pub fn series_game(id: &str, name: &str) -> SeriesGame {
    SeriesGame {
        id: Some(id.to_string()),
        name: name.to_string(),
        image_url: None,
        rating: Some(5),
        completion_status: None,
    }
}

pub fn game_series(id: &str, name: &str, games: Vec<SeriesGame>) -> GameSeries {
    GameSeries {
        id: id.to_string(),
        series_name: name.to_string(),
        games,
        created_at: None,
    }
}

pub fn movie_series(id: &str, name: &str, titles: &[&str]) -> MovieSeries {
    MovieSeries {
        id: id.to_string(),
        series_name: name.to_string(),
        movies: titles
            .iter()
            .map(|t| Movie {
                title: t.to_string(),
                notes: String::new(),
            })
            .collect(),
        created_at: None,
    }
}

fn not_found(what: &str, id: &str) -> ClientError {
    ClientError::NotFound(format!("{} {} not found", what, id))
}

fn game_from_payload(id: String, payload: &GamePayload) -> Game {
    let non_empty = |s: &str| (!s.is_empty()).then(|| s.to_string());
    Game {
        id,
        name: payload.name.clone(),
        image_url: non_empty(&payload.image_url),
        time_played: non_empty(&payload.time_played),
        completion_status: payload.completion_status,
        rating: Some(payload.rating),
        trophies_earned: Some(payload.trophies_earned),
        trophies_total: Some(payload.trophies_total),
        platinum_status: payload.platinum_status,
        problems: non_empty(&payload.problems),
        notes: non_empty(&payload.notes),
        created_at: None,
    }
}

impl Gateway for MockGateway {
    async fn health(&self) -> Result<HealthStatus, ClientError> {
        let _state = self.record(Call::Health, "health")?;
        Ok(HealthStatus {
            message: "ok".to_string(),
        })
    }

    async fn list_games(&self, limit: usize, skip: usize) -> Result<Vec<Game>, ClientError> {
        let state = self.record(Call::ListGames { limit, skip }, "list_games")?;
        Ok(state.games.iter().skip(skip).take(limit).cloned().collect())
    }

    async fn get_game(&self, id: &str) -> Result<Game, ClientError> {
        let state = self.record(Call::GetGame(id.to_string()), "get_game")?;
        state
            .games
            .iter()
            .find(|g| g.id == id)
            .cloned()
            .ok_or_else(|| not_found("Game", id))
    }

    async fn create_game(&self, payload: &GamePayload) -> Result<Game, ClientError> {
        let mut state = self.record(Call::CreateGame(payload.name.clone()), "create_game")?;
        let id = state.fresh_id();
        let game = game_from_payload(id, payload);
        state.games.push(game.clone());
        Ok(game)
    }

    async fn update_game(&self, id: &str, payload: &GamePayload) -> Result<Game, ClientError> {
        let mut state = self.record(Call::UpdateGame(id.to_string()), "update_game")?;
        let slot = state
            .games
            .iter_mut()
            .find(|g| g.id == id)
            .ok_or_else(|| not_found("Game", id))?;
        *slot = game_from_payload(id.to_string(), payload);
        Ok(slot.clone())
    }

    async fn delete_game(&self, id: &str) -> Result<Deleted, ClientError> {
        let mut state = self.record(Call::DeleteGame(id.to_string()), "delete_game")?;
        let before = state.games.len();
        state.games.retain(|g| g.id != id);
        if state.games.len() == before {
            return Err(not_found("Game", id));
        }
        for series in &mut state.game_series {
            series.games.retain(|g| g.id.as_deref() != Some(id));
        }
        Ok(Deleted {
            message: "Game deleted".to_string(),
        })
    }

    async fn list_game_series(&self) -> Result<Vec<GameSeries>, ClientError> {
        let state = self.record(Call::ListGameSeries, "list_game_series")?;
        Ok(state.game_series.clone())
    }

    async fn list_movie_series(&self) -> Result<Vec<MovieSeries>, ClientError> {
        let state = self.record(Call::ListMovieSeries, "list_movie_series")?;
        Ok(state.movie_series.clone())
    }

    async fn get_series(&self, kind: SeriesKind, id: &str) -> Result<Series, ClientError> {
        let state = self.record(Call::GetSeries(kind, id.to_string()), "get_series")?;
        let found = match kind {
            SeriesKind::Game => state
                .game_series
                .iter()
                .find(|s| s.id == id)
                .cloned()
                .map(Series::Game),
            SeriesKind::Movie => state
                .movie_series
                .iter()
                .find(|s| s.id == id)
                .cloned()
                .map(Series::Movie),
        };
        found.ok_or_else(|| not_found("Series", id))
    }

    async fn create_series(
        &self,
        kind: SeriesKind,
        payload: &NewSeries,
    ) -> Result<Series, ClientError> {
        let mut state = self.record(
            Call::CreateSeries(kind, payload.series_name.clone()),
            "create_series",
        )?;
        let id = state.fresh_id();
        Ok(match kind {
            SeriesKind::Game => {
                let series = game_series(&id, &payload.series_name, Vec::new());
                state.game_series.push(series.clone());
                Series::Game(series)
            }
            SeriesKind::Movie => {
                let series = MovieSeries {
                    id,
                    series_name: payload.series_name.clone(),
                    movies: payload.movies.clone(),
                    created_at: None,
                };
                state.movie_series.push(series.clone());
                Series::Movie(series)
            }
        })
    }

    async fn update_series(
        &self,
        kind: SeriesKind,
        id: &str,
        payload: &SeriesRename,
    ) -> Result<Series, ClientError> {
        let mut state = self.record(Call::UpdateSeries(kind, id.to_string()), "update_series")?;
        match kind {
            SeriesKind::Game => {
                let series = state
                    .game_series
                    .iter_mut()
                    .find(|s| s.id == id)
                    .ok_or_else(|| not_found("Series", id))?;
                series.series_name = payload.series_name.clone();
                Ok(Series::Game(series.clone()))
            }
            SeriesKind::Movie => {
                let series = state
                    .movie_series
                    .iter_mut()
                    .find(|s| s.id == id)
                    .ok_or_else(|| not_found("Series", id))?;
                series.series_name = payload.series_name.clone();
                Ok(Series::Movie(series.clone()))
            }
        }
    }

    async fn delete_series(&self, kind: SeriesKind, id: &str) -> Result<Deleted, ClientError> {
        let mut state = self.record(Call::DeleteSeries(kind, id.to_string()), "delete_series")?;
        let removed = match kind {
            SeriesKind::Game => {
                let before = state.game_series.len();
                state.game_series.retain(|s| s.id != id);
                before != state.game_series.len()
            }
            SeriesKind::Movie => {
                let before = state.movie_series.len();
                state.movie_series.retain(|s| s.id != id);
                before != state.movie_series.len()
            }
        };
        if !removed {
            return Err(not_found("Series", id));
        }
        Ok(Deleted {
            message: "Series deleted".to_string(),
        })
    }

    async fn add_game_to_series(
        &self,
        series_id: &str,
        payload: &SeriesGamePayload,
    ) -> Result<GameChildAdded, ClientError> {
        let mut state = self.record(
            Call::AddGameToSeries(series_id.to_string()),
            "add_game_to_series",
        )?;
        let child_id = state.fresh_id();
        let series = state
            .game_series
            .iter_mut()
            .find(|s| s.id == series_id)
            .ok_or_else(|| not_found("Series", series_id))?;
        let mut child = series_game(&child_id, &payload.name);
        child.rating = Some(payload.rating);
        series.games.push(child);
        Ok(GameChildAdded::Series(series.clone()))
    }

    async fn add_movie_to_series(
        &self,
        series_id: &str,
        movie: &Movie,
    ) -> Result<MovieSeries, ClientError> {
        let mut state = self.record(
            Call::AddMovieToSeries(series_id.to_string()),
            "add_movie_to_series",
        )?;
        let series = state
            .movie_series
            .iter_mut()
            .find(|s| s.id == series_id)
            .ok_or_else(|| not_found("Series", series_id))?;
        series.movies.push(movie.clone());
        Ok(series.clone())
    }
}
