use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use backlog_client::Gateway;
use backlog_core::{GameSeries, MovieSeries, Series, SeriesKind};
use backlog_lib::{DeleteOutcome, Field, Form};

use super::{confirm_on_stdin, done, or_dash, report_reconcile, submit_form};
use crate::cli_types::SeriesAction;
use crate::spinner::with_spinner;
use crate::{CliError, Context};

pub(crate) async fn run_series(ctx: &Context, action: SeriesAction) -> Result<(), CliError> {
    match action {
        SeriesAction::List { kind } => run_series_list(ctx, kind).await,
        SeriesAction::Show { kind, id } => run_series_show(ctx, kind, &id).await,
        SeriesAction::Create { kind, name, movies } => {
            run_series_create(ctx, kind, &name, &movies).await
        }
        SeriesAction::Rename { kind, id, name } => run_series_rename(ctx, kind, &id, &name).await,
        SeriesAction::Delete { kind, id, yes } => run_series_delete(ctx, kind, &id, yes).await,
        SeriesAction::AddGame {
            id,
            name,
            image_url,
            rating,
        } => run_series_add_game(ctx, &id, &name, image_url.as_deref(), rating.as_deref()).await,
        SeriesAction::AddMovie { id, title, notes } => {
            run_series_add_movie(ctx, &id, &title, notes.as_deref()).await
        }
    }
}

async fn run_series_list(ctx: &Context, kind: Option<SeriesKind>) -> Result<(), CliError> {
    let mut session = ctx.session()?;
    let complete = with_spinner(ctx.quiet, "Loading series...", session.load_series()).await;
    if !complete {
        log::warn!(
            "{} Some series could not be loaded",
            "!".if_supports_color(Stdout, |t| t.yellow()),
        );
    }

    let store = session.store();
    if kind != Some(SeriesKind::Movie) {
        log::info!("{}", "Game series".if_supports_color(Stdout, |t| t.bold()));
        print_empty_marker(store.game_series().is_empty());
        for series in store.game_series() {
            print_series_line(&series.id, &series.series_name, series.games.len(), "games");
        }
    }
    if kind.is_none() {
        log::info!("");
    }
    if kind != Some(SeriesKind::Game) {
        log::info!("{}", "Movie series".if_supports_color(Stdout, |t| t.bold()));
        print_empty_marker(store.movie_series().is_empty());
        for series in store.movie_series() {
            print_series_line(&series.id, &series.series_name, series.movies.len(), "movies");
        }
    }
    Ok(())
}

async fn run_series_show(ctx: &Context, kind: SeriesKind, id: &str) -> Result<(), CliError> {
    let gateway = ctx.gateway()?;
    let series = with_spinner(
        ctx.quiet,
        format!("Fetching {}...", kind),
        gateway.get_series(kind, id),
    )
    .await?;
    match &series {
        Series::Game(s) => print_game_series(s),
        Series::Movie(s) => print_movie_series(s),
    }
    Ok(())
}

async fn run_series_create(
    ctx: &Context,
    kind: SeriesKind,
    name: &str,
    movies: &[String],
) -> Result<(), CliError> {
    let mut session = ctx.session()?;
    let edit = session.edit_mut();
    edit.open_create(Form::Series(kind));
    edit.set_field(Field::SeriesName, name)?;
    for entry in movies {
        let (title, notes) = entry.split_once(':').unwrap_or((entry.as_str(), ""));
        if !edit.stage_movie(title.trim(), notes.trim())? {
            log::warn!("Skipping movie with an empty title: '{}'", entry);
        }
    }

    submit_form(ctx, &mut session, &format!("Creating {}...", kind)).await?;
    done(format!("Created {} '{}'", kind, name.trim()));
    Ok(())
}

async fn run_series_rename(
    ctx: &Context,
    kind: SeriesKind,
    id: &str,
    name: &str,
) -> Result<(), CliError> {
    let mut session = ctx.session()?;
    let series = with_spinner(
        ctx.quiet,
        format!("Fetching {}...", kind),
        session.store().gateway().get_series(kind, id),
    )
    .await?;
    let old_name = series.series_name().to_string();

    let edit = session.edit_mut();
    edit.open_update_series(&series);
    edit.set_field(Field::SeriesName, name)?;

    submit_form(ctx, &mut session, &format!("Renaming {}...", kind)).await?;
    done(format!("Renamed '{}' to '{}'", old_name, name.trim()));
    Ok(())
}

async fn run_series_delete(
    ctx: &Context,
    kind: SeriesKind,
    id: &str,
    yes: bool,
) -> Result<(), CliError> {
    let mut session = ctx.session()?;
    // Load so the prompt can name the series
    with_spinner(ctx.quiet, "Loading series...", session.load_series()).await;
    if session.store().find_series(kind, id).is_none() {
        return Err(CliError::not_found(format!("{} {}", kind, id)));
    }

    let mut confirm = |prompt: &str| yes || confirm_on_stdin(prompt);
    let outcome = with_spinner(
        ctx.quiet || !yes,
        format!("Deleting {}...", kind),
        session.relations().delete_series(kind, id, &mut confirm),
    )
    .await?;

    match outcome {
        DeleteOutcome::Deleted => {
            report_reconcile(&session);
            done(format!("Deleted {} {}", kind, id));
        }
        DeleteOutcome::Declined => {
            log::info!("  {}", "Skipped".if_supports_color(Stdout, |t| t.dimmed()));
        }
    }
    Ok(())
}

async fn run_series_add_game(
    ctx: &Context,
    series_id: &str,
    name: &str,
    image_url: Option<&str>,
    rating: Option<&str>,
) -> Result<(), CliError> {
    let mut session = ctx.session()?;
    let edit = session.edit_mut();
    edit.open_create(Form::Child {
        kind: SeriesKind::Game,
        series_id: series_id.to_string(),
    });
    edit.set_field(Field::Name, name)?;
    if let Some(url) = image_url {
        edit.set_field(Field::ImageUrl, url)?;
    }
    if let Some(rating) = rating {
        edit.set_field(Field::Rating, rating)?;
    }

    submit_form(ctx, &mut session, "Adding game...").await?;
    done(format!("Added '{}' to game series {}", name.trim(), series_id));
    Ok(())
}

async fn run_series_add_movie(
    ctx: &Context,
    series_id: &str,
    title: &str,
    notes: Option<&str>,
) -> Result<(), CliError> {
    let mut session = ctx.session()?;
    let edit = session.edit_mut();
    edit.open_create(Form::Child {
        kind: SeriesKind::Movie,
        series_id: series_id.to_string(),
    });
    edit.set_field(Field::Title, title)?;
    if let Some(notes) = notes {
        edit.set_field(Field::Notes, notes)?;
    }

    submit_form(ctx, &mut session, "Adding movie...").await?;
    done(format!("Added '{}' to movie series {}", title.trim(), series_id));
    Ok(())
}

fn print_empty_marker(empty: bool) {
    if empty {
        log::info!("  {}", "none".if_supports_color(Stdout, |t| t.dimmed()));
    }
}

fn print_series_line(id: &str, name: &str, count: usize, noun: &str) {
    log::info!(
        "  {} {} {}",
        format!("{:>4}", id).if_supports_color(Stdout, |t| t.dimmed()),
        name,
        format!("({} {})", count, noun).if_supports_color(Stdout, |t| t.dimmed()),
    );
}

fn print_game_series(series: &GameSeries) {
    log::info!(
        "{} {}",
        series.series_name.if_supports_color(Stdout, |t| t.bold()),
        format!("(game series {})", series.id).if_supports_color(Stdout, |t| t.dimmed()),
    );
    if series.games.is_empty() {
        print_empty_marker(true);
    }
    for game in &series.games {
        let status = game
            .completion_status
            .map(|s| s.as_str())
            .unwrap_or("-");
        let rating = game
            .rating
            .map(|r| format!("{}/10", r))
            .unwrap_or_else(|| "-".to_string());
        log::info!(
            "  - {} [{}] {}",
            game.name.if_supports_color(Stdout, |t| t.bold()),
            status,
            rating,
        );
    }
}

fn print_movie_series(series: &MovieSeries) {
    log::info!(
        "{} {}",
        series.series_name.if_supports_color(Stdout, |t| t.bold()),
        format!("(movie series {})", series.id).if_supports_color(Stdout, |t| t.dimmed()),
    );
    if series.movies.is_empty() {
        print_empty_marker(true);
    }
    for movie in &series.movies {
        log::info!(
            "  - {} {}",
            movie.title.if_supports_color(Stdout, |t| t.bold()),
            or_dash(Some(movie.notes.as_str())).if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
}
