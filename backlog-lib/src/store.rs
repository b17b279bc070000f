//! Session cache of the three remote collections.
//!
//! The store is the only place collections change. Loads replace or extend a
//! collection with what the remote returned; mutations go through the
//! gateway first and are then reconciled per [`Mutation::reconcile`].

use backlog_client::{ClientError, Gateway};
use backlog_core::{Game, GamePayload, GameSeries, MovieSeries, Series, SeriesKind};

use crate::error::{LoadError, MutationError};
use crate::policy::{Mutation, Reconcile};
use crate::relations::RelationshipManager;

pub struct EntityStore<G> {
    gateway: G,
    page_size: usize,
    games: Vec<Game>,
    game_series: Vec<GameSeries>,
    movie_series: Vec<MovieSeries>,
    /// Message of the last failed games load, cleared when a new one starts.
    games_error: Option<String>,
    /// Set when a post-mutation series reload did not complete, so nested
    /// child lists may still show removed or missing members.
    series_stale: bool,
}

impl<G: Gateway> EntityStore<G> {
    /// `page_size` is fixed for the lifetime of the store; zero is treated
    /// as one.
    pub fn new(gateway: G, page_size: usize) -> Self {
        Self {
            gateway,
            page_size: page_size.max(1),
            games: Vec::new(),
            game_series: Vec::new(),
            movie_series: Vec::new(),
            games_error: None,
            series_stale: false,
        }
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn games(&self) -> &[Game] {
        &self.games
    }

    pub fn game_series(&self) -> &[GameSeries] {
        &self.game_series
    }

    pub fn movie_series(&self) -> &[MovieSeries] {
        &self.movie_series
    }

    pub fn find_game(&self, id: &str) -> Option<&Game> {
        self.games.iter().find(|g| g.id == id)
    }

    /// A cached series of either kind, cloned for use as an edit seed.
    pub fn find_series(&self, kind: SeriesKind, id: &str) -> Option<Series> {
        match kind {
            SeriesKind::Game => self
                .game_series
                .iter()
                .find(|s| s.id == id)
                .cloned()
                .map(Series::Game),
            SeriesKind::Movie => self
                .movie_series
                .iter()
                .find(|s| s.id == id)
                .cloned()
                .map(Series::Movie),
        }
    }

    pub fn games_error(&self) -> Option<&str> {
        self.games_error.as_deref()
    }

    pub fn series_stale(&self) -> bool {
        self.series_stale
    }

    pub fn relations(&mut self) -> RelationshipManager<'_, G> {
        RelationshipManager::new(self)
    }

    // -- loads --

    /// Fetch one page of games.
    ///
    /// With `reset` the page replaces the collection. Otherwise it is
    /// appended, and the offset is the number of games already loaded. On
    /// failure the collection is left as it was and `games_error` is set.
    /// Returns the number of games the page contained.
    pub async fn load_games(&mut self, reset: bool) -> Result<usize, LoadError> {
        let skip = if reset { 0 } else { self.games.len() };
        self.games_error = None;
        log::debug!(
            "Loading games (limit {}, skip {}, {})",
            self.page_size,
            skip,
            if reset { "reset" } else { "append" },
        );
        let result = self.gateway.list_games(self.page_size, skip).await;
        self.apply_games(reset, result)
    }

    /// Fetch both series collections concurrently.
    ///
    /// Each collection is replaced only if its own fetch succeeded; a failed
    /// fetch is logged and leaves the previous data in place. Returns true
    /// when both collections were refreshed.
    pub async fn load_series(&mut self) -> bool {
        let (game_series, movie_series) = futures::join!(
            self.gateway.list_game_series(),
            self.gateway.list_movie_series(),
        );
        self.apply_series(game_series, movie_series)
    }

    /// First load of a session: a reset games load and both series fetches,
    /// all in flight together. Only the games failure is reported.
    pub async fn load_initial(&mut self) -> Result<(), LoadError> {
        self.games_error = None;
        let (games, game_series, movie_series) = futures::join!(
            self.gateway.list_games(self.page_size, 0),
            self.gateway.list_game_series(),
            self.gateway.list_movie_series(),
        );
        self.apply_series(game_series, movie_series);
        self.apply_games(true, games).map(|_| ())
    }

    fn apply_games(
        &mut self,
        reset: bool,
        result: Result<Vec<Game>, ClientError>,
    ) -> Result<usize, LoadError> {
        match result {
            Ok(page) => {
                let count = page.len();
                if reset {
                    self.games = page;
                } else {
                    self.games.extend(page);
                }
                log::debug!("Loaded {} games ({} cached)", count, self.games.len());
                Ok(count)
            }
            Err(e) => {
                let err = LoadError::new("games", e);
                log::warn!("{}", err);
                self.games_error = Some(err.to_string());
                Err(err)
            }
        }
    }

    fn apply_series(
        &mut self,
        game_series: Result<Vec<GameSeries>, ClientError>,
        movie_series: Result<Vec<MovieSeries>, ClientError>,
    ) -> bool {
        let mut complete = true;
        match game_series {
            Ok(list) => self.game_series = list,
            Err(e) => {
                log::warn!("{}", LoadError::new("game series", e));
                complete = false;
            }
        }
        match movie_series {
            Ok(list) => self.movie_series = list,
            Err(e) => {
                log::warn!("{}", LoadError::new("movie series", e));
                complete = false;
            }
        }
        if complete {
            self.series_stale = false;
        }
        complete
    }

    // -- game mutations --

    /// Create a game, then reset-load games and reload series.
    pub async fn create_game(&mut self, payload: &GamePayload) -> Result<Game, MutationError> {
        let mutation = Mutation::CreateGame;
        let created = self
            .gateway
            .create_game(payload)
            .await
            .map_err(|e| MutationError::new(mutation.describe(), e))?;
        log::info!("Created game '{}' ({})", created.name, created.id);
        self.reconcile(mutation, None).await;
        Ok(created)
    }

    /// Update a game, then reset-load games and reload series.
    pub async fn update_game(
        &mut self,
        id: &str,
        payload: &GamePayload,
    ) -> Result<Game, MutationError> {
        let mutation = Mutation::UpdateGame;
        let updated = self
            .gateway
            .update_game(id, payload)
            .await
            .map_err(|e| MutationError::new(mutation.describe(), e))?;
        log::info!("Updated game '{}' ({})", updated.name, updated.id);
        self.reconcile(mutation, None).await;
        Ok(updated)
    }

    /// Delete a game remotely, drop it from the cached list, then reload
    /// series so it disappears from nested lists as well. The local removal
    /// stands even if that reload fails; `series_stale` reports it.
    pub async fn delete_game(&mut self, id: &str) -> Result<(), MutationError> {
        let mutation = Mutation::DeleteGame;
        self.gateway
            .delete_game(id)
            .await
            .map_err(|e| MutationError::new(mutation.describe(), e))?;
        log::info!("Deleted game {}", id);
        self.reconcile(mutation, Some(id)).await;
        Ok(())
    }

    /// Bring the cache back in line after a successful mutation. Reload
    /// failures are not errors of the mutation; they surface through
    /// `games_error` and `series_stale`.
    pub(crate) async fn reconcile(&mut self, mutation: Mutation, removed_game: Option<&str>) {
        let series_ok = match mutation.reconcile() {
            Reconcile::ResetGamesThenSeries => {
                // the error is already recorded in games_error
                let _ = self.load_games(true).await;
                self.load_series().await
            }
            Reconcile::RemoveLocallyThenSeries => {
                if let Some(id) = removed_game {
                    self.games.retain(|g| g.id != id);
                }
                self.load_series().await
            }
            Reconcile::ReloadSeries => self.load_series().await,
        };

        if !series_ok {
            log::warn!(
                "Series may be out of date after '{}'; they will refresh on the next successful load",
                mutation.describe(),
            );
            self.series_stale = true;
        }
    }
}
