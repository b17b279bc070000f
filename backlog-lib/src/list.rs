//! Paging and client-side search over the cached games.

use backlog_client::Gateway;
use backlog_core::Game;

use crate::error::LoadError;
use crate::store::EntityStore;

/// Holds the search text and drives page loads on the store. The page size
/// is the store's, fixed when the session is built.
#[derive(Debug, Clone, Default)]
pub struct ListController {
    search: String,
}

impl ListController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the next page, starting at the number of games already loaded.
    pub async fn load_more<G: Gateway>(
        &self,
        store: &mut EntityStore<G>,
    ) -> Result<usize, LoadError> {
        store.load_games(false).await
    }

    /// Replace the loaded games with the first page.
    pub async fn reload<G: Gateway>(&self, store: &mut EntityStore<G>) -> Result<usize, LoadError> {
        store.load_games(true).await
    }

    /// Re-issue the reset load after a failed games load.
    pub async fn retry<G: Gateway>(&self, store: &mut EntityStore<G>) -> Result<usize, LoadError> {
        self.reload(store).await
    }

    /// Set the search text. Never fetches.
    pub fn search(&mut self, text: impl Into<String>) {
        self.search = text.into();
    }

    pub fn clear_search(&mut self) {
        self.search.clear();
    }

    pub fn search_text(&self) -> &str {
        &self.search
    }

    /// The games to show for the current search text.
    pub fn visible<'g>(&self, games: &'g [Game]) -> Vec<&'g Game> {
        filter_games(games, &self.search)
    }
}

/// Case-insensitive substring match on `name`, preserving order. An empty
/// needle matches everything.
pub fn filter_games<'g>(games: &'g [Game], text: &str) -> Vec<&'g Game> {
    if text.is_empty() {
        return games.iter().collect();
    }
    let needle = text.to_lowercase();
    games
        .iter()
        .filter(|g| g.name.to_lowercase().contains(&needle))
        .collect()
}
