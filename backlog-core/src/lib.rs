//! Data model shared by the backlog crates.
//!
//! Records as the remote service returns them (`Game`, `GameSeries`,
//! `MovieSeries`), the payloads sent back to it, and the validation errors
//! raised before anything is submitted.

pub mod error;
pub mod payload;
pub mod types;

pub use error::ValidationError;
pub use payload::{GamePayload, NewSeries, SeriesGamePayload, SeriesRename};
pub use types::{
    CompletionStatus, DEFAULT_RATING, Game, GameSeries, MAX_RATING, MIN_RATING, Movie,
    MovieSeries, Series, SeriesGame, SeriesKind, SeriesKindParseError, clamp_count, clamp_rating,
};
