//! Series lifecycle and series membership.
//!
//! Children are only ever added through [`RelationshipManager::add_child`];
//! nested lists are never edited locally and only change when the series
//! collections are reloaded from the remote.

use backlog_client::Gateway;
use backlog_core::{Movie, NewSeries, Series, SeriesGamePayload, SeriesKind, SeriesRename};

use crate::error::MutationError;
use crate::policy::Mutation;
use crate::store::EntityStore;

/// Yes/no gate in front of destructive operations.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// The confirmation gate said no; nothing was sent.
    Declined,
}

/// A new child for an existing series. The variant decides which series
/// family and endpoint are used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChildPayload {
    Game(SeriesGamePayload),
    Movie(Movie),
}

impl ChildPayload {
    pub fn kind(&self) -> SeriesKind {
        match self {
            Self::Game(_) => SeriesKind::Game,
            Self::Movie(_) => SeriesKind::Movie,
        }
    }
}

/// Borrowed view of the store for series operations. Obtained with
/// [`EntityStore::relations`].
pub struct RelationshipManager<'a, G> {
    store: &'a mut EntityStore<G>,
}

impl<'a, G: Gateway> RelationshipManager<'a, G> {
    pub(crate) fn new(store: &'a mut EntityStore<G>) -> Self {
        Self { store }
    }

    pub async fn create_series(
        &mut self,
        kind: SeriesKind,
        payload: &NewSeries,
    ) -> Result<Series, MutationError> {
        let created = self
            .store
            .gateway()
            .create_series(kind, payload)
            .await
            .map_err(|e| MutationError::new(format!("create {}", kind.label()), e))?;
        log::info!(
            "Created {} '{}' ({})",
            kind,
            created.series_name(),
            created.id()
        );
        self.store.reconcile(Mutation::CreateSeries, None).await;
        Ok(created)
    }

    /// Rename a series. Existing children are not part of the request.
    pub async fn update_series(
        &mut self,
        kind: SeriesKind,
        id: &str,
        payload: &SeriesRename,
    ) -> Result<Series, MutationError> {
        let updated = self
            .store
            .gateway()
            .update_series(kind, id, payload)
            .await
            .map_err(|e| MutationError::new(format!("update {}", kind.label()), e))?;
        log::info!("Renamed {} {} to '{}'", kind, id, updated.series_name());
        self.store.reconcile(Mutation::UpdateSeries, None).await;
        Ok(updated)
    }

    /// Delete a series after `confirm` agrees. A declined prompt issues no
    /// request.
    pub async fn delete_series(
        &mut self,
        kind: SeriesKind,
        id: &str,
        confirm: &mut impl Confirm,
    ) -> Result<DeleteOutcome, MutationError> {
        let prompt = match self.store.find_series(kind, id) {
            Some(series) => format!("Delete {} '{}'?", kind, series.series_name()),
            None => format!("Delete {} {}?", kind, id),
        };
        if !confirm.confirm(&prompt) {
            log::debug!("Delete of {} {} declined", kind, id);
            return Ok(DeleteOutcome::Declined);
        }

        self.store
            .gateway()
            .delete_series(kind, id)
            .await
            .map_err(|e| MutationError::new(format!("delete {}", kind.label()), e))?;
        log::info!("Deleted {} {}", kind, id);
        self.store.reconcile(Mutation::DeleteSeries, None).await;
        Ok(DeleteOutcome::Deleted)
    }

    /// Append a child to a series. The cached nested list only changes once
    /// the series reload that follows has completed.
    pub async fn add_child(
        &mut self,
        series_id: &str,
        payload: &ChildPayload,
    ) -> Result<(), MutationError> {
        let gateway = self.store.gateway();
        let result = match payload {
            ChildPayload::Game(game) => gateway.add_game_to_series(series_id, game).await.map(|_| ()),
            ChildPayload::Movie(movie) => {
                gateway.add_movie_to_series(series_id, movie).await.map(|_| ())
            }
        };
        result.map_err(|e| {
            MutationError::new(format!("add to {} {}", payload.kind().label(), series_id), e)
        })?;
        log::info!("Added child to {} {}", payload.kind(), series_id);
        self.store.reconcile(Mutation::AddChild, None).await;
        Ok(())
    }
}
