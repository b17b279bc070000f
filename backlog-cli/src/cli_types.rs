//! CLI type definitions: command enums and argument structs.

use clap::{Args, Parser, Subcommand};

use backlog_core::SeriesKind;

#[derive(Parser)]
#[command(name = "backlog")]
#[command(about = "Track a game backlog and game/movie series", long_about = None)]
pub(crate) struct Cli {
    /// Service origin (e.g. http://127.0.0.1:8000); overrides config and env
    #[arg(long, global = true)]
    pub url: Option<String>,

    /// Games fetched per page
    #[arg(long, global = true)]
    pub page_size: Option<usize>,

    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Check that the service is reachable
    Ping,

    /// Browse and edit games
    Games {
        #[command(subcommand)]
        action: GamesAction,
    },

    /// Browse and edit game and movie series
    Series {
        #[command(subcommand)]
        action: SeriesAction,
    },

    /// Manage the service connection settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Optional game fields shared by `games add` and `games edit`.
#[derive(Args, Clone, Default)]
pub(crate) struct GameFieldArgs {
    /// Cover image URL
    #[arg(long)]
    pub image_url: Option<String>,

    /// Free-form play time (e.g. "40h")
    #[arg(long)]
    pub time_played: Option<String>,

    /// Not Started, In Progress, Completed or Platinum
    #[arg(long)]
    pub status: Option<String>,

    /// Rating from 1 to 10 (out-of-range values are clamped)
    #[arg(long, allow_hyphen_values = true)]
    pub rating: Option<String>,

    #[arg(long, allow_hyphen_values = true)]
    pub trophies_earned: Option<String>,

    #[arg(long, allow_hyphen_values = true)]
    pub trophies_total: Option<String>,

    /// Platinum earned (true/false)
    #[arg(long)]
    pub platinum: Option<String>,

    #[arg(long)]
    pub problems: Option<String>,

    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(Subcommand)]
pub(crate) enum GamesAction {
    /// List loaded games
    List {
        /// Number of pages to load
        #[arg(long, default_value_t = 1)]
        pages: usize,

        /// Only show games whose name contains this text
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Show one game
    Show { id: String },

    /// Add a game
    Add {
        #[arg(long)]
        name: String,

        #[command(flatten)]
        fields: GameFieldArgs,
    },

    /// Edit an existing game; only the given fields change
    Edit {
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[command(flatten)]
        fields: GameFieldArgs,
    },

    /// Delete a game
    Delete {
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub(crate) enum SeriesAction {
    /// List series
    List {
        /// Only list one kind (game or movie)
        #[arg(long)]
        kind: Option<SeriesKind>,
    },

    /// Show one series with its children
    Show { kind: SeriesKind, id: String },

    /// Create a series
    Create {
        kind: SeriesKind,

        #[arg(long)]
        name: String,

        /// Movie to include, as TITLE or TITLE:NOTES (movie series only, repeatable)
        #[arg(long = "movie")]
        movies: Vec<String>,
    },

    /// Rename a series
    Rename {
        kind: SeriesKind,
        id: String,

        #[arg(long)]
        name: String,
    },

    /// Delete a series
    Delete {
        kind: SeriesKind,
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Add a game to a game series
    AddGame {
        id: String,

        #[arg(long)]
        name: String,

        #[arg(long)]
        image_url: Option<String>,

        #[arg(long, allow_hyphen_values = true)]
        rating: Option<String>,
    },

    /// Add a movie to a movie series
    AddMovie {
        id: String,

        #[arg(long)]
        title: String,

        #[arg(long)]
        notes: Option<String>,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show current settings and their sources
    Show,

    /// Print the config file path
    Path,

    /// Write settings to the config file (takes the global --url and
    /// --page-size)
    Set {
        /// Request timeout in seconds
        #[arg(long)]
        timeout: Option<u64>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn series_kind_is_parsed_from_positional() {
        let cli = Cli::try_parse_from(["backlog", "series", "show", "movie", "7"]).unwrap();
        match cli.command {
            Commands::Series {
                action: SeriesAction::Show { kind, id },
            } => {
                assert_eq!(kind, SeriesKind::Movie);
                assert_eq!(id, "7");
            }
            _ => panic!("expected series show"),
        }
    }

    #[test]
    fn repeated_movie_flags_are_collected() {
        let cli = Cli::try_parse_from([
            "backlog",
            "series",
            "create",
            "movie",
            "--name",
            "Alien",
            "--movie",
            "Alien:1979",
            "--movie",
            "Aliens",
        ])
        .unwrap();
        match cli.command {
            Commands::Series {
                action: SeriesAction::Create { movies, .. },
            } => assert_eq!(movies, vec!["Alien:1979", "Aliens"]),
            _ => panic!("expected series create"),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "backlog",
            "games",
            "list",
            "--pages",
            "3",
            "--page-size",
            "10",
            "--quiet",
        ])
        .unwrap();
        assert_eq!(cli.page_size, Some(10));
        assert!(cli.quiet);
        assert!(matches!(
            cli.command,
            Commands::Games {
                action: GamesAction::List { pages: 3, .. }
            }
        ));
    }

    #[test]
    fn negative_rating_is_accepted_as_a_value() {
        let cli =
            Cli::try_parse_from(["backlog", "games", "add", "--name", "Celeste", "--rating", "-3"])
                .unwrap();
        match cli.command {
            Commands::Games {
                action: GamesAction::Add { fields, .. },
            } => assert_eq!(fields.rating.as_deref(), Some("-3")),
            _ => panic!("expected games add"),
        }
    }

    #[test]
    fn config_set_uses_global_connection_flags() {
        let cli = Cli::try_parse_from([
            "backlog", "config", "set", "--url", "http://nas:8000", "--timeout", "5",
        ])
        .unwrap();
        assert_eq!(cli.url.as_deref(), Some("http://nas:8000"));
        assert!(matches!(
            cli.command,
            Commands::Config {
                action: ConfigAction::Set { timeout: Some(5) }
            }
        ));
    }
}
