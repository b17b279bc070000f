use serde::Deserialize;

use backlog_core::{GameSeries, SeriesGame};

/// Response of the API root health check.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthStatus {
    pub message: String,
}

/// Confirmation returned by every delete endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Deleted {
    #[serde(default)]
    pub message: String,
}

/// The game-series add-child endpoint answers with either the updated
/// series or just the created child, depending on the service version.
/// Any other success body lands in `Other`; callers only rely on the
/// request having succeeded.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum GameChildAdded {
    Series(GameSeries),
    Child(SeriesGame),
    Other(serde_json::Value),
}

/// Error body shape used by the service (`{"detail": ...}`). `detail` is a
/// string for most errors and a list of field errors for 422s.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub detail: serde_json::Value,
}
