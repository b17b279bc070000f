//! Records held in the three cached collections.
//!
//! Field names follow the remote wire format. Optional numeric fields stay
//! `Option` here because stored records may carry `null`; the edit form
//! backfills them when it seeds a draft.

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ValidationError;

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 10;
pub const DEFAULT_RATING: u8 = 1;

/// Clamp a raw rating into `MIN_RATING..=MAX_RATING`.
pub fn clamp_rating(raw: i64) -> u8 {
    raw.clamp(MIN_RATING as i64, MAX_RATING as i64) as u8
}

/// Clamp a raw counter (trophies) into the non-negative `u32` range.
pub fn clamp_count(raw: i64) -> u32 {
    raw.clamp(0, u32::MAX as i64) as u32
}

// ── Game ────────────────────────────────────────────────────────────────────

/// How far through a game the player is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CompletionStatus {
    #[default]
    #[serde(rename = "Not Started")]
    NotStarted,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
    Platinum,
}

const ALL_STATUSES: &[CompletionStatus] = &[
    CompletionStatus::NotStarted,
    CompletionStatus::InProgress,
    CompletionStatus::Completed,
    CompletionStatus::Platinum,
];

impl CompletionStatus {
    pub fn all() -> &'static [CompletionStatus] {
        ALL_STATUSES
    }

    /// The label used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotStarted => "Not Started",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
            Self::Platinum => "Platinum",
        }
    }
}

impl std::fmt::Display for CompletionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CompletionStatus {
    type Err = ValidationError;

    /// Case-insensitive; spaces, dashes and underscores are interchangeable
    /// ("in progress", "in-progress", "IN_PROGRESS").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .flat_map(char::to_lowercase)
            .collect();
        match key.as_str() {
            "notstarted" => Ok(Self::NotStarted),
            "inprogress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "platinum" => Ok(Self::Platinum),
            _ => Err(ValidationError::UnknownStatus(s.to_string())),
        }
    }
}

/// A tracked game as stored by the remote service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub time_played: Option<String>,
    #[serde(default)]
    pub completion_status: CompletionStatus,
    #[serde(default)]
    pub rating: Option<u8>,
    #[serde(default)]
    pub trophies_earned: Option<u32>,
    #[serde(default)]
    pub trophies_total: Option<u32>,
    #[serde(default)]
    pub platinum_status: bool,
    #[serde(default)]
    pub problems: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<NaiveDateTime>,
}

impl Game {
    /// Earned trophies as a percentage of the total, clamped to 0..=100.
    /// Zero when the total is unknown or zero.
    pub fn trophy_percent(&self) -> f64 {
        let total = self.trophies_total.unwrap_or(0);
        if total == 0 {
            return 0.0;
        }
        let earned = self.trophies_earned.unwrap_or(0);
        (earned as f64 / total as f64 * 100.0).clamp(0.0, 100.0)
    }
}

// ── Series ──────────────────────────────────────────────────────────────────

/// Which family of series a request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeriesKind {
    Game,
    Movie,
}

impl SeriesKind {
    /// Remote collection path segment (`game-series` / `movie-series`).
    pub fn resource(&self) -> &'static str {
        match self {
            Self::Game => "game-series",
            Self::Movie => "movie-series",
        }
    }

    /// Path segment of the nested child collection.
    pub fn child_resource(&self) -> &'static str {
        match self {
            Self::Game => "games",
            Self::Movie => "movies",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Game => "game series",
            Self::Movie => "movie series",
        }
    }
}

impl std::fmt::Display for SeriesKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when a string cannot be parsed into a `SeriesKind`.
#[derive(Debug, Clone)]
pub struct SeriesKindParseError(pub String);

impl std::fmt::Display for SeriesKindParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown series kind: '{}' (expected game or movie)", self.0)
    }
}

impl std::error::Error for SeriesKindParseError {}

impl std::str::FromStr for SeriesKind {
    type Err = SeriesKindParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "game" | "games" | "game-series" => Ok(Self::Game),
            "movie" | "movies" | "movie-series" | "film" => Ok(Self::Movie),
            _ => Err(SeriesKindParseError(s.to_string())),
        }
    }
}

/// A game nested inside a series. Carries a subset of `Game`; records added
/// through the series endpoint may have no id of their own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesGame {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub rating: Option<u8>,
    #[serde(default)]
    pub completion_status: Option<CompletionStatus>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSeries {
    pub id: String,
    pub series_name: String,
    #[serde(default)]
    pub games: Vec<SeriesGame>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<NaiveDateTime>,
}

/// A movie entry. Used both as the nested record and as the add-child
/// payload; an empty `notes` means "no notes".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    pub title: String,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieSeries {
    pub id: String,
    pub series_name: String,
    #[serde(default)]
    pub movies: Vec<Movie>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<NaiveDateTime>,
}

/// Either kind of series, for operations that are generic over the kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Series {
    Game(GameSeries),
    Movie(MovieSeries),
}

impl Series {
    pub fn kind(&self) -> SeriesKind {
        match self {
            Self::Game(_) => SeriesKind::Game,
            Self::Movie(_) => SeriesKind::Movie,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Self::Game(s) => &s.id,
            Self::Movie(s) => &s.id,
        }
    }

    pub fn series_name(&self) -> &str {
        match self {
            Self::Game(s) => &s.series_name,
            Self::Movie(s) => &s.series_name,
        }
    }

    /// Number of nested children.
    pub fn len(&self) -> usize {
        match self {
            Self::Game(s) => s.games.len(),
            Self::Movie(s) => s.movies.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ── Helpers ─────────────────────────────────────────────────────────────────

/// Accepts naive ISO-8601 timestamps (the service's default) as well as
/// RFC 3339. Anything unparseable becomes `None` rather than failing the
/// whole record.
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_timestamp))
}

fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    raw.parse::<NaiveDateTime>().ok().or_else(|| {
        chrono::DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|dt| dt.naive_utc())
    })
}

#[cfg(test)]
#[path = "tests/types_tests.rs"]
mod tests;
