//! Request bodies sent to the remote service.
//!
//! Payloads are only built from validated drafts, so every field is already
//! normalized: ratings clamped, counters non-negative, optional text
//! defaulted to the empty string.

use serde::Serialize;

use crate::types::{CompletionStatus, Movie};

/// Body for game create and update. Update accepts a partial body on the
/// remote side; the client always sends the full normalized record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GamePayload {
    pub name: String,
    pub image_url: String,
    pub time_played: String,
    pub completion_status: CompletionStatus,
    pub rating: u8,
    pub problems: String,
    pub notes: String,
    pub platinum_status: bool,
    pub trophies_earned: u32,
    pub trophies_total: u32,
}

/// Reduced game body for adding a game to a game series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeriesGamePayload {
    pub name: String,
    pub image_url: String,
    pub rating: u8,
}

/// Body for series creation. `movies` carries entries staged on the create
/// form and is omitted when empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewSeries {
    pub series_name: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub movies: Vec<Movie>,
}

impl NewSeries {
    pub fn named(series_name: impl Into<String>) -> Self {
        Self {
            series_name: series_name.into(),
            movies: Vec::new(),
        }
    }
}

/// Body for series update. Only the name is editable; existing children are
/// never sent back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeriesRename {
    pub series_name: String,
}
