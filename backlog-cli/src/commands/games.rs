use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use backlog_client::Gateway;
use backlog_core::{CompletionStatus, Game};
use backlog_lib::{DeleteOutcome, EditSession, Field, Form};

use super::{confirm_on_stdin, done, or_dash, report_reconcile, submit_form};
use crate::cli_types::{GameFieldArgs, GamesAction};
use crate::spinner::with_spinner;
use crate::{CliError, Context};

pub(crate) async fn run_games(ctx: &Context, action: GamesAction) -> Result<(), CliError> {
    match action {
        GamesAction::List { pages, search } => run_games_list(ctx, pages, search).await,
        GamesAction::Show { id } => run_games_show(ctx, &id).await,
        GamesAction::Add { name, fields } => run_games_add(ctx, &name, &fields).await,
        GamesAction::Edit { id, name, fields } => {
            run_games_edit(ctx, &id, name.as_deref(), &fields).await
        }
        GamesAction::Delete { id, yes } => run_games_delete(ctx, &id, yes).await,
    }
}

async fn run_games_list(
    ctx: &Context,
    pages: usize,
    search: Option<String>,
) -> Result<(), CliError> {
    let mut session = ctx.session()?;
    with_spinner(ctx.quiet, "Loading games...", session.start()).await?;

    for page in 2..=pages {
        let added = with_spinner(
            ctx.quiet,
            format!("Loading page {}...", page),
            session.load_more(),
        )
        .await?;
        if added < session.store().page_size() {
            log::debug!("Page {} was short ({} games); no more to load", page, added);
            break;
        }
    }

    if let Some(text) = search {
        session.search(text);
    }

    let visible = session.visible_games();
    let loaded = session.store().games().len();
    if visible.is_empty() {
        log::info!("{}", "No games.".if_supports_color(Stdout, |t| t.dimmed()));
    }
    for game in &visible {
        print_game_line(game);
    }

    log::info!("");
    let summary = if session.list().search_text().is_empty() {
        format!("{} games loaded", loaded)
    } else {
        format!(
            "{} of {} loaded games match '{}'",
            visible.len(),
            loaded,
            session.list().search_text(),
        )
    };
    log::info!("{}", summary.if_supports_color(Stdout, |t| t.dimmed()));
    Ok(())
}

async fn run_games_show(ctx: &Context, id: &str) -> Result<(), CliError> {
    let gateway = ctx.gateway()?;
    let game = with_spinner(ctx.quiet, "Fetching game...", gateway.get_game(id)).await?;
    print_game_detail(&game);
    Ok(())
}

async fn run_games_add(ctx: &Context, name: &str, fields: &GameFieldArgs) -> Result<(), CliError> {
    let mut session = ctx.session()?;
    let edit = session.edit_mut();
    edit.open_create(Form::Game);
    edit.set_field(Field::Name, name)?;
    apply_game_fields(edit, fields)?;

    submit_form(ctx, &mut session, "Saving game...").await?;
    done(format!("Added game '{}'", name.trim()));
    Ok(())
}

async fn run_games_edit(
    ctx: &Context,
    id: &str,
    name: Option<&str>,
    fields: &GameFieldArgs,
) -> Result<(), CliError> {
    let mut session = ctx.session()?;
    let game = with_spinner(
        ctx.quiet,
        "Fetching game...",
        session.store().gateway().get_game(id),
    )
    .await?;

    let edit = session.edit_mut();
    edit.open_update_game(&game);
    if let Some(name) = name {
        edit.set_field(Field::Name, name)?;
    }
    apply_game_fields(edit, fields)?;

    submit_form(ctx, &mut session, "Saving game...").await?;
    done(format!("Updated game '{}'", name.unwrap_or(&game.name).trim()));
    Ok(())
}

async fn run_games_delete(ctx: &Context, id: &str, yes: bool) -> Result<(), CliError> {
    let mut session = ctx.session()?;
    // Load so the prompt can name the game
    with_spinner(ctx.quiet, "Loading games...", session.start()).await?;
    if session.store().find_game(id).is_none() {
        let game = with_spinner(
            ctx.quiet,
            "Fetching game...",
            session.store().gateway().get_game(id),
        )
        .await?;
        log::info!("  {} ({})", game.name.if_supports_color(Stdout, |t| t.bold()), id);
    }

    let mut confirm = |prompt: &str| yes || confirm_on_stdin(prompt);
    let outcome = with_spinner(
        ctx.quiet || !yes,
        "Deleting game...",
        session.delete_game(id, &mut confirm),
    )
    .await?;

    match outcome {
        DeleteOutcome::Deleted => {
            report_reconcile(&session);
            done(format!("Deleted game {}", id));
        }
        DeleteOutcome::Declined => {
            log::info!("  {}", "Skipped".if_supports_color(Stdout, |t| t.dimmed()));
        }
    }
    Ok(())
}

/// Copy the flags that were given onto the open game draft.
fn apply_game_fields(edit: &mut EditSession, fields: &GameFieldArgs) -> Result<(), CliError> {
    let pairs = [
        (Field::ImageUrl, &fields.image_url),
        (Field::TimePlayed, &fields.time_played),
        (Field::CompletionStatus, &fields.status),
        (Field::Rating, &fields.rating),
        (Field::TrophiesEarned, &fields.trophies_earned),
        (Field::TrophiesTotal, &fields.trophies_total),
        (Field::PlatinumStatus, &fields.platinum),
        (Field::Problems, &fields.problems),
        (Field::Notes, &fields.notes),
    ];
    for (field, value) in pairs {
        if let Some(value) = value {
            edit.set_field(field, value)?;
        }
    }
    Ok(())
}

fn status_label(status: CompletionStatus) -> String {
    let label = status.as_str();
    match status {
        CompletionStatus::NotStarted => label.if_supports_color(Stdout, |t| t.dimmed()).to_string(),
        CompletionStatus::InProgress => label.if_supports_color(Stdout, |t| t.yellow()).to_string(),
        CompletionStatus::Completed => label.if_supports_color(Stdout, |t| t.green()).to_string(),
        CompletionStatus::Platinum => label.if_supports_color(Stdout, |t| t.cyan()).to_string(),
    }
}

fn trophy_label(game: &Game) -> Option<String> {
    let total = game.trophies_total.filter(|t| *t > 0)?;
    Some(format!(
        "{}/{} ({:.0}%)",
        game.trophies_earned.unwrap_or(0),
        total,
        game.trophy_percent(),
    ))
}

fn print_game_line(game: &Game) {
    let rating = game
        .rating
        .map(|r| format!("{}/10", r))
        .unwrap_or_else(|| "-".to_string());
    let trophies = trophy_label(game)
        .map(|t| format!("  {}", t.if_supports_color(Stdout, |t| t.dimmed())))
        .unwrap_or_default();
    log::info!(
        "  {} {} [{}] {}{}",
        format!("{:>4}", game.id).if_supports_color(Stdout, |t| t.dimmed()),
        game.name.if_supports_color(Stdout, |t| t.bold()),
        status_label(game.completion_status),
        rating,
        trophies,
    );
}

fn print_game_detail(game: &Game) {
    log::info!("{}", game.name.if_supports_color(Stdout, |t| t.bold()));
    log::info!("");

    let label = |name: &str| format!("{:<12}", format!("{}:", name));
    log::info!("  {} {}", label("id").if_supports_color(Stdout, |t| t.cyan()), game.id);
    log::info!(
        "  {} {}",
        label("status").if_supports_color(Stdout, |t| t.cyan()),
        status_label(game.completion_status),
    );
    log::info!(
        "  {} {}",
        label("rating").if_supports_color(Stdout, |t| t.cyan()),
        game.rating.map(|r| r.to_string()).as_deref().unwrap_or("-"),
    );
    log::info!(
        "  {} {}",
        label("played").if_supports_color(Stdout, |t| t.cyan()),
        or_dash(game.time_played.as_deref()),
    );
    log::info!(
        "  {} {}{}",
        label("trophies").if_supports_color(Stdout, |t| t.cyan()),
        trophy_label(game).as_deref().unwrap_or("-"),
        if game.platinum_status {
            format!(" {}", "(platinum)".if_supports_color(Stdout, |t| t.cyan()))
        } else {
            String::new()
        },
    );
    log::info!(
        "  {} {}",
        label("image").if_supports_color(Stdout, |t| t.cyan()),
        or_dash(game.image_url.as_deref()),
    );
    log::info!(
        "  {} {}",
        label("problems").if_supports_color(Stdout, |t| t.cyan()),
        or_dash(game.problems.as_deref()),
    );
    log::info!(
        "  {} {}",
        label("notes").if_supports_color(Stdout, |t| t.cyan()),
        or_dash(game.notes.as_deref()),
    );
    if let Some(created) = game.created_at {
        log::info!(
            "  {} {}",
            label("added").if_supports_color(Stdout, |t| t.cyan()),
            created.format("%Y-%m-%d %H:%M"),
        );
    }
}
