//! Reconciliation policy per mutation.
//!
//! The store never patches a record it was not told about by the remote.
//! After each mutation it brings the affected collections back in line by
//! one of the strategies below; which one is fixed per operation.

/// How the cached collections are refreshed after a mutation succeeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reconcile {
    /// Reset-load the games list (pagination progress is discarded), then
    /// reload both series collections.
    ResetGamesThenSeries,
    /// Remove the record from the cached games list immediately, then reload
    /// both series collections so nested copies disappear too.
    RemoveLocallyThenSeries,
    /// Reload both series collections only.
    ReloadSeries,
}

/// Every mutation the session can issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    CreateGame,
    UpdateGame,
    DeleteGame,
    CreateSeries,
    UpdateSeries,
    DeleteSeries,
    AddChild,
}

impl Mutation {
    pub const fn reconcile(self) -> Reconcile {
        match self {
            Self::CreateGame | Self::UpdateGame => Reconcile::ResetGamesThenSeries,
            Self::DeleteGame => Reconcile::RemoveLocallyThenSeries,
            Self::CreateSeries | Self::UpdateSeries | Self::DeleteSeries | Self::AddChild => {
                Reconcile::ReloadSeries
            }
        }
    }

    /// Verb phrase used in logs and error messages.
    pub fn describe(self) -> &'static str {
        match self {
            Self::CreateGame => "create game",
            Self::UpdateGame => "update game",
            Self::DeleteGame => "delete game",
            Self::CreateSeries => "create series",
            Self::UpdateSeries => "update series",
            Self::DeleteSeries => "delete series",
            Self::AddChild => "add to series",
        }
    }
}
