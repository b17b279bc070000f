use thiserror::Error;

use backlog_client::ClientError;
use backlog_core::ValidationError;

/// A list fetch failed. Recoverable: the previous collection is untouched
/// and the caller may retry.
#[derive(Debug, Error)]
#[error("Could not load {what}: {source}")]
pub struct LoadError {
    pub what: &'static str,
    #[source]
    pub source: ClientError,
}

impl LoadError {
    pub(crate) fn new(what: &'static str, source: ClientError) -> Self {
        Self { what, source }
    }
}

/// A create, update, delete or add-child request failed. Surfaced to the
/// caller, never retried automatically.
#[derive(Debug, Error)]
#[error("Failed to {action}: {source}")]
pub struct MutationError {
    pub action: String,
    #[source]
    pub source: ClientError,
}

impl MutationError {
    pub(crate) fn new(action: impl Into<String>, source: ClientError) -> Self {
        Self {
            action: action.into(),
            source,
        }
    }
}

/// Why an edit form could not be committed.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// Rejected locally; nothing was sent.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The draft was valid but the remote rejected or never received it.
    #[error(transparent)]
    Mutation(#[from] MutationError),
}
