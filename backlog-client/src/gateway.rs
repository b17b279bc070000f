use std::future::Future;

use backlog_core::{
    Game, GamePayload, GameSeries, Movie, MovieSeries, NewSeries, Series, SeriesGamePayload,
    SeriesKind, SeriesRename,
};

use crate::error::ClientError;
use crate::types::{Deleted, GameChildAdded, HealthStatus};

/// Typed access to the remote resources.
///
/// Implementations translate each call into exactly one remote request.
/// Retries, caching and reconciliation belong to the caller.
pub trait Gateway {
    fn health(&self) -> impl Future<Output = Result<HealthStatus, ClientError>> + Send;

    // -- games --

    /// One page of games, `limit` records starting at offset `skip`.
    fn list_games(
        &self,
        limit: usize,
        skip: usize,
    ) -> impl Future<Output = Result<Vec<Game>, ClientError>> + Send;

    fn get_game(&self, id: &str) -> impl Future<Output = Result<Game, ClientError>> + Send;

    fn create_game(
        &self,
        payload: &GamePayload,
    ) -> impl Future<Output = Result<Game, ClientError>> + Send;

    fn update_game(
        &self,
        id: &str,
        payload: &GamePayload,
    ) -> impl Future<Output = Result<Game, ClientError>> + Send;

    fn delete_game(&self, id: &str) -> impl Future<Output = Result<Deleted, ClientError>> + Send;

    // -- series --

    fn list_game_series(&self)
    -> impl Future<Output = Result<Vec<GameSeries>, ClientError>> + Send;

    fn list_movie_series(
        &self,
    ) -> impl Future<Output = Result<Vec<MovieSeries>, ClientError>> + Send;

    fn get_series(
        &self,
        kind: SeriesKind,
        id: &str,
    ) -> impl Future<Output = Result<Series, ClientError>> + Send;

    fn create_series(
        &self,
        kind: SeriesKind,
        payload: &NewSeries,
    ) -> impl Future<Output = Result<Series, ClientError>> + Send;

    fn update_series(
        &self,
        kind: SeriesKind,
        id: &str,
        payload: &SeriesRename,
    ) -> impl Future<Output = Result<Series, ClientError>> + Send;

    fn delete_series(
        &self,
        kind: SeriesKind,
        id: &str,
    ) -> impl Future<Output = Result<Deleted, ClientError>> + Send;

    // -- nested children --

    fn add_game_to_series(
        &self,
        series_id: &str,
        payload: &SeriesGamePayload,
    ) -> impl Future<Output = Result<GameChildAdded, ClientError>> + Send;

    fn add_movie_to_series(
        &self,
        series_id: &str,
        movie: &Movie,
    ) -> impl Future<Output = Result<MovieSeries, ClientError>> + Send;
}
