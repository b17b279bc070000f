use thiserror::Error;

use backlog_client::ClientError;
use backlog_core::ValidationError;
use backlog_lib::{LoadError, MutationError, SubmitError};

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// I/O error
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// A direct gateway call failed
    #[error("{0}")]
    Client(#[from] ClientError),

    /// A list fetch failed
    #[error("{0}")]
    Load(#[from] LoadError),

    /// A write was rejected or never arrived
    #[error("{0}")]
    Mutation(#[from] MutationError),

    /// Input rejected before anything was sent
    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),

    /// Runtime creation or async error
    #[error("Runtime error: {0}")]
    Runtime(String),

    /// Requested record is not in the loaded data
    #[error("Not found: {0}")]
    NotFound(String),
}

impl From<SubmitError> for CliError {
    fn from(e: SubmitError) -> Self {
        match e {
            SubmitError::Validation(v) => Self::Validation(v),
            SubmitError::Mutation(m) => Self::Mutation(m),
        }
    }
}

impl CliError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub(crate) fn runtime(msg: impl Into<String>) -> Self {
        Self::Runtime(msg.into())
    }

    pub(crate) fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }
}
