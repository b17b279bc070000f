//! Session core for the backlog tracker.
//!
//! Everything here is generic over [`backlog_client::Gateway`], so the same
//! code runs against the HTTP service and against in-memory test doubles.
//! A [`Session`] ties together the cached collections ([`EntityStore`]), the
//! paged and searchable games list ([`ListController`]) and the single open
//! edit form ([`EditSession`]).

pub mod edit;
pub mod error;
pub mod list;
pub mod policy;
pub mod relations;
pub mod session;
pub mod store;

pub use edit::{
    Draft, DraftWarning, EditSession, EditState, Field, Form, GameDraft, Mode, MovieDraft,
    SeriesDraft, SeriesGameDraft, Submitted,
};
pub use error::{LoadError, MutationError, SubmitError};
pub use list::{ListController, filter_games};
pub use policy::{Mutation, Reconcile};
pub use relations::{ChildPayload, Confirm, DeleteOutcome, RelationshipManager};
pub use session::Session;
pub use store::EntityStore;
