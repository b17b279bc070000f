//! The edit form state machine.
//!
//! At most one form is open at a time. A form is a [`Draft`] plus what it
//! targets ([`Form`]) and whether it creates or updates ([`Mode`]). Field
//! edits replace one field of the draft; nothing is validated until
//! [`EditSession::submit`], which rejects an invalid draft before any
//! request is made.

use backlog_client::Gateway;
use backlog_core::{
    CompletionStatus, DEFAULT_RATING, Game, GamePayload, Movie, NewSeries, Series,
    SeriesGamePayload, SeriesKind, SeriesRename, ValidationError, clamp_count, clamp_rating,
};

use crate::error::SubmitError;
use crate::relations::ChildPayload;
use crate::store::EntityStore;

/// What the open form edits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Form {
    Game,
    Series(SeriesKind),
    /// A new child for the series `series_id`.
    Child { kind: SeriesKind, series_id: String },
}

impl Form {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Game => "game",
            Self::Series(SeriesKind::Game) => "game series",
            Self::Series(SeriesKind::Movie) => "movie series",
            Self::Child {
                kind: SeriesKind::Game,
                ..
            } => "series game",
            Self::Child {
                kind: SeriesKind::Movie,
                ..
            } => "movie",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Create,
    Update { id: String },
}

/// A single editable field. Which fields exist depends on the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    ImageUrl,
    TimePlayed,
    CompletionStatus,
    Rating,
    TrophiesEarned,
    TrophiesTotal,
    PlatinumStatus,
    Problems,
    Notes,
    SeriesName,
    Title,
}

impl Field {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::ImageUrl => "image_url",
            Self::TimePlayed => "time_played",
            Self::CompletionStatus => "completion_status",
            Self::Rating => "rating",
            Self::TrophiesEarned => "trophies_earned",
            Self::TrophiesTotal => "trophies_total",
            Self::PlatinumStatus => "platinum_status",
            Self::Problems => "problems",
            Self::Notes => "notes",
            Self::SeriesName => "series_name",
            Self::Title => "title",
        }
    }
}

// ── Drafts ──────────────────────────────────────────────────────────────────

/// Game form contents. Numbers are kept raw (`i64`) until submit, where the
/// rating is clamped and counters floored at zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameDraft {
    pub name: String,
    pub image_url: String,
    pub time_played: String,
    pub completion_status: CompletionStatus,
    pub rating: i64,
    pub problems: String,
    pub notes: String,
    pub platinum_status: bool,
    pub trophies_earned: i64,
    pub trophies_total: i64,
}

impl Default for GameDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            image_url: String::new(),
            time_played: String::new(),
            completion_status: CompletionStatus::NotStarted,
            rating: DEFAULT_RATING as i64,
            problems: String::new(),
            notes: String::new(),
            platinum_status: false,
            trophies_earned: 0,
            trophies_total: 0,
        }
    }
}

impl GameDraft {
    /// Seed from a stored game; missing numbers fall back to the defaults.
    pub fn from_game(game: &Game) -> Self {
        Self {
            name: game.name.clone(),
            image_url: game.image_url.clone().unwrap_or_default(),
            time_played: game.time_played.clone().unwrap_or_default(),
            completion_status: game.completion_status,
            rating: game.rating.unwrap_or(DEFAULT_RATING) as i64,
            problems: game.problems.clone().unwrap_or_default(),
            notes: game.notes.clone().unwrap_or_default(),
            platinum_status: game.platinum_status,
            trophies_earned: game.trophies_earned.unwrap_or(0) as i64,
            trophies_total: game.trophies_total.unwrap_or(0) as i64,
        }
    }

    fn set(&mut self, field: Field, value: &str) -> Result<(), ValidationError> {
        match field {
            Field::Name => self.name = value.to_string(),
            Field::ImageUrl => self.image_url = value.to_string(),
            Field::TimePlayed => self.time_played = value.to_string(),
            Field::CompletionStatus => self.completion_status = value.parse()?,
            Field::Rating => self.rating = parse_number(value),
            Field::TrophiesEarned => self.trophies_earned = parse_number(value),
            Field::TrophiesTotal => self.trophies_total = parse_number(value),
            Field::PlatinumStatus => self.platinum_status = parse_flag(value),
            Field::Problems => self.problems = value.to_string(),
            Field::Notes => self.notes = value.to_string(),
            Field::SeriesName | Field::Title => return Err(not_applicable(field, "game")),
        }
        Ok(())
    }

    fn to_payload(&self) -> Result<GamePayload, ValidationError> {
        require(&self.name, "Name")?;
        Ok(GamePayload {
            name: self.name.clone(),
            image_url: self.image_url.clone(),
            time_played: self.time_played.clone(),
            completion_status: self.completion_status,
            rating: clamp_rating(self.rating),
            problems: self.problems.clone(),
            notes: self.notes.clone(),
            platinum_status: self.platinum_status,
            trophies_earned: clamp_count(self.trophies_earned),
            trophies_total: clamp_count(self.trophies_total),
        })
    }

    fn warnings(&self) -> Vec<DraftWarning> {
        let earned = clamp_count(self.trophies_earned);
        let total = clamp_count(self.trophies_total);
        if earned > total {
            vec![DraftWarning::TrophiesExceedTotal { earned, total }]
        } else {
            Vec::new()
        }
    }
}

/// Series form contents. Movies may be staged only while creating a movie
/// series.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeriesDraft {
    pub series_name: String,
    pub staged_movies: Vec<Movie>,
}

/// The reduced game form used when adding a game to a series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesGameDraft {
    pub name: String,
    pub image_url: String,
    pub rating: i64,
}

impl Default for SeriesGameDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            image_url: String::new(),
            rating: DEFAULT_RATING as i64,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MovieDraft {
    pub title: String,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Draft {
    Game(GameDraft),
    Series(SeriesDraft),
    SeriesGame(SeriesGameDraft),
    Movie(MovieDraft),
}

impl Draft {
    fn defaults_for(form: &Form) -> Self {
        match form {
            Form::Game => Self::Game(GameDraft::default()),
            Form::Series(_) => Self::Series(SeriesDraft::default()),
            Form::Child {
                kind: SeriesKind::Game,
                ..
            } => Self::SeriesGame(SeriesGameDraft::default()),
            Form::Child {
                kind: SeriesKind::Movie,
                ..
            } => Self::Movie(MovieDraft::default()),
        }
    }

    fn set(&mut self, field: Field, value: &str) -> Result<(), ValidationError> {
        match self {
            Self::Game(draft) => draft.set(field, value),
            Self::Series(draft) => match field {
                Field::SeriesName => {
                    draft.series_name = value.to_string();
                    Ok(())
                }
                _ => Err(not_applicable(field, "series")),
            },
            Self::SeriesGame(draft) => {
                match field {
                    Field::Name => draft.name = value.to_string(),
                    Field::ImageUrl => draft.image_url = value.to_string(),
                    Field::Rating => draft.rating = parse_number(value),
                    _ => return Err(not_applicable(field, "series game")),
                }
                Ok(())
            }
            Self::Movie(draft) => {
                match field {
                    Field::Title => draft.title = value.to_string(),
                    Field::Notes => draft.notes = value.to_string(),
                    _ => return Err(not_applicable(field, "movie")),
                }
                Ok(())
            }
        }
    }
}

/// Something odd about a draft that does not block submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftWarning {
    TrophiesExceedTotal { earned: u32, total: u32 },
}

impl std::fmt::Display for DraftWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TrophiesExceedTotal { earned, total } => write!(
                f,
                "trophies earned ({}) exceeds trophies total ({})",
                earned, total
            ),
        }
    }
}

/// Result of a successful submit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Submitted {
    pub warnings: Vec<DraftWarning>,
}

// ── Session ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditState {
    #[default]
    Closed,
    Editing { form: Form, mode: Mode, draft: Draft },
}

/// A validated, normalized request ready to be sent.
enum Commit {
    CreateGame(GamePayload),
    UpdateGame {
        id: String,
        payload: GamePayload,
    },
    CreateSeries {
        kind: SeriesKind,
        payload: NewSeries,
    },
    UpdateSeries {
        kind: SeriesKind,
        id: String,
        payload: SeriesRename,
    },
    AddChild {
        series_id: String,
        payload: ChildPayload,
    },
}

#[derive(Debug, Clone, Default)]
pub struct EditSession {
    state: EditState,
}

impl EditSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &EditState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, EditState::Editing { .. })
    }

    pub fn form(&self) -> Option<&Form> {
        match &self.state {
            EditState::Editing { form, .. } => Some(form),
            EditState::Closed => None,
        }
    }

    pub fn mode(&self) -> Option<&Mode> {
        match &self.state {
            EditState::Editing { mode, .. } => Some(mode),
            EditState::Closed => None,
        }
    }

    pub fn draft(&self) -> Option<&Draft> {
        match &self.state {
            EditState::Editing { draft, .. } => Some(draft),
            EditState::Closed => None,
        }
    }

    /// Open a create form seeded with defaults. Replaces any open form.
    pub fn open_create(&mut self, form: Form) {
        let draft = Draft::defaults_for(&form);
        self.open(form, Mode::Create, draft);
    }

    /// Open an update form for a stored game.
    pub fn open_update_game(&mut self, game: &Game) {
        let draft = Draft::Game(GameDraft::from_game(game));
        self.open(
            Form::Game,
            Mode::Update {
                id: game.id.clone(),
            },
            draft,
        );
    }

    /// Open an update form for a series. Only the name is editable; the
    /// children are not carried into the draft.
    pub fn open_update_series(&mut self, series: &Series) {
        let draft = Draft::Series(SeriesDraft {
            series_name: series.series_name().to_string(),
            staged_movies: Vec::new(),
        });
        self.open(
            Form::Series(series.kind()),
            Mode::Update {
                id: series.id().to_string(),
            },
            draft,
        );
    }

    fn open(&mut self, form: Form, mode: Mode, draft: Draft) {
        if let Some(previous) = self.form() {
            log::debug!("Discarding open {} form", previous.label());
        }
        self.state = EditState::Editing { form, mode, draft };
    }

    /// Replace one field of the open draft.
    ///
    /// Numeric fields that do not parse become 0; the flag field is true for
    /// "true", "yes", "on", "y" or "1" in any case.
    pub fn set_field(&mut self, field: Field, value: &str) -> Result<(), ValidationError> {
        match &mut self.state {
            EditState::Editing { draft, .. } => draft.set(field, value),
            EditState::Closed => Err(ValidationError::NoDraft),
        }
    }

    /// Stage a movie on a movie series create form. Blank titles are
    /// ignored; returns whether the movie was staged.
    pub fn stage_movie(&mut self, title: &str, notes: &str) -> Result<bool, ValidationError> {
        match &mut self.state {
            EditState::Editing {
                form: Form::Series(SeriesKind::Movie),
                mode: Mode::Create,
                draft: Draft::Series(draft),
            } => {
                if title.trim().is_empty() {
                    return Ok(false);
                }
                draft.staged_movies.push(Movie {
                    title: title.to_string(),
                    notes: notes.to_string(),
                });
                Ok(true)
            }
            EditState::Editing { form, .. } => Err(ValidationError::FieldNotApplicable {
                field: "movies",
                form: form.label(),
            }),
            EditState::Closed => Err(ValidationError::NoDraft),
        }
    }

    /// Non-blocking warnings for the open draft.
    pub fn warnings(&self) -> Vec<DraftWarning> {
        match self.draft() {
            Some(Draft::Game(draft)) => draft.warnings(),
            _ => Vec::new(),
        }
    }

    /// Validate the open draft and send it.
    ///
    /// A validation failure returns before any request is made and leaves
    /// the form open. A failed request also leaves it open so it can be
    /// retried. On success the form closes.
    pub async fn submit<G: Gateway>(
        &mut self,
        store: &mut EntityStore<G>,
    ) -> Result<Submitted, SubmitError> {
        let commit = self.prepare()?;
        let warnings = self.warnings();
        for warning in &warnings {
            log::warn!("Submitting with warning: {}", warning);
        }

        match commit {
            Commit::CreateGame(payload) => {
                store.create_game(&payload).await?;
            }
            Commit::UpdateGame { id, payload } => {
                store.update_game(&id, &payload).await?;
            }
            Commit::CreateSeries { kind, payload } => {
                store.relations().create_series(kind, &payload).await?;
            }
            Commit::UpdateSeries { kind, id, payload } => {
                store.relations().update_series(kind, &id, &payload).await?;
            }
            Commit::AddChild { series_id, payload } => {
                store.relations().add_child(&series_id, &payload).await?;
            }
        }

        self.state = EditState::Closed;
        Ok(Submitted { warnings })
    }

    /// Discard the draft.
    pub fn cancel(&mut self) {
        self.state = EditState::Closed;
    }

    fn prepare(&self) -> Result<Commit, ValidationError> {
        let EditState::Editing { form, mode, draft } = &self.state else {
            return Err(ValidationError::NoDraft);
        };

        match (form, mode, draft) {
            (Form::Game, Mode::Create, Draft::Game(d)) => Ok(Commit::CreateGame(d.to_payload()?)),
            (Form::Game, Mode::Update { id }, Draft::Game(d)) => Ok(Commit::UpdateGame {
                id: id.clone(),
                payload: d.to_payload()?,
            }),
            (Form::Series(kind), Mode::Create, Draft::Series(d)) => {
                require(&d.series_name, "Series name")?;
                Ok(Commit::CreateSeries {
                    kind: *kind,
                    payload: NewSeries {
                        series_name: d.series_name.clone(),
                        movies: d.staged_movies.clone(),
                    },
                })
            }
            (Form::Series(kind), Mode::Update { id }, Draft::Series(d)) => {
                require(&d.series_name, "Series name")?;
                Ok(Commit::UpdateSeries {
                    kind: *kind,
                    id: id.clone(),
                    payload: SeriesRename {
                        series_name: d.series_name.clone(),
                    },
                })
            }
            (Form::Child { series_id, .. }, _, Draft::SeriesGame(d)) => {
                require(&d.name, "Name")?;
                Ok(Commit::AddChild {
                    series_id: series_id.clone(),
                    payload: ChildPayload::Game(SeriesGamePayload {
                        name: d.name.clone(),
                        image_url: d.image_url.clone(),
                        rating: clamp_rating(d.rating),
                    }),
                })
            }
            (Form::Child { series_id, .. }, _, Draft::Movie(d)) => {
                require(&d.title, "Title")?;
                Ok(Commit::AddChild {
                    series_id: series_id.clone(),
                    payload: ChildPayload::Movie(Movie {
                        title: d.title.clone(),
                        notes: d.notes.clone(),
                    }),
                })
            }
            // open() only ever pairs a form with its own draft type
            (form, _, _) => Err(ValidationError::FieldNotApplicable {
                field: "draft",
                form: form.label(),
            }),
        }
    }
}

fn require(value: &str, field: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::MissingField(field))
    } else {
        Ok(())
    }
}

fn not_applicable(field: Field, form: &'static str) -> ValidationError {
    ValidationError::FieldNotApplicable {
        field: field.name(),
        form,
    }
}

/// Read the leading integer of `value` (optional sign, then digits), so
/// "12.5" reads as 12 and "7abc" as 7. Values beyond `i64` saturate; no
/// leading digits reads as 0.
fn parse_number(value: &str) -> i64 {
    let trimmed = value.trim();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let digits = rest.bytes().take_while(u8::is_ascii_digit);

    let mut n: i64 = 0;
    for d in digits {
        let d = i64::from(d - b'0');
        n = if negative {
            n.saturating_mul(10).saturating_sub(d)
        } else {
            n.saturating_mul(10).saturating_add(d)
        };
    }
    n
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "true" | "yes" | "on" | "y" | "1"
    )
}

#[cfg(test)]
#[path = "tests/edit_tests.rs"]
mod tests;
