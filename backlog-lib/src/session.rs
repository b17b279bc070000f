//! One browsing session: the store, the list view over it and the edit form.

use backlog_client::Gateway;
use backlog_core::Game;

use crate::edit::{EditSession, Submitted};
use crate::error::{LoadError, MutationError, SubmitError};
use crate::list::ListController;
use crate::relations::{Confirm, DeleteOutcome, RelationshipManager};
use crate::store::EntityStore;

pub struct Session<G> {
    store: EntityStore<G>,
    list: ListController,
    edit: EditSession,
}

impl<G: Gateway> Session<G> {
    pub fn new(gateway: G, page_size: usize) -> Self {
        Self {
            store: EntityStore::new(gateway, page_size),
            list: ListController::new(),
            edit: EditSession::new(),
        }
    }

    /// Initial load: first page of games plus both series collections.
    pub async fn start(&mut self) -> Result<(), LoadError> {
        self.store.load_initial().await
    }

    pub fn store(&self) -> &EntityStore<G> {
        &self.store
    }

    pub fn list(&self) -> &ListController {
        &self.list
    }

    pub fn edit(&self) -> &EditSession {
        &self.edit
    }

    pub fn edit_mut(&mut self) -> &mut EditSession {
        &mut self.edit
    }

    pub fn relations(&mut self) -> RelationshipManager<'_, G> {
        self.store.relations()
    }

    pub async fn load_more(&mut self) -> Result<usize, LoadError> {
        self.list.load_more(&mut self.store).await
    }

    pub async fn reload(&mut self) -> Result<usize, LoadError> {
        self.list.reload(&mut self.store).await
    }

    pub async fn retry(&mut self) -> Result<usize, LoadError> {
        self.list.retry(&mut self.store).await
    }

    /// Refresh both series collections.
    pub async fn load_series(&mut self) -> bool {
        self.store.load_series().await
    }

    pub fn search(&mut self, text: impl Into<String>) {
        self.list.search(text);
    }

    pub fn clear_search(&mut self) {
        self.list.clear_search();
    }

    pub fn visible_games(&self) -> Vec<&Game> {
        self.list.visible(self.store.games())
    }

    /// Submit the open edit form against this session's store.
    pub async fn submit(&mut self) -> Result<Submitted, SubmitError> {
        self.edit.submit(&mut self.store).await
    }

    /// Delete a game after `confirm` agrees. The prompt names the cached
    /// game when it is known.
    pub async fn delete_game(
        &mut self,
        id: &str,
        confirm: &mut impl Confirm,
    ) -> Result<DeleteOutcome, MutationError> {
        let prompt = match self.store.find_game(id) {
            Some(game) => format!("Delete game '{}'?", game.name),
            None => format!("Delete game {}?", id),
        };
        if !confirm.confirm(&prompt) {
            log::debug!("Delete of game {} declined", id);
            return Ok(DeleteOutcome::Declined);
        }
        self.store.delete_game(id).await?;
        Ok(DeleteOutcome::Deleted)
    }
}
