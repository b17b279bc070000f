pub(crate) mod config;
pub(crate) mod games;
pub(crate) mod ping;
pub(crate) mod series;

use std::io::Write;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use backlog_client::HttpGateway;
use backlog_lib::Session;

use crate::spinner::with_spinner;
use crate::{CliError, Context};

/// Ask a yes/no question on stdin. Anything but "y"/"yes" is a no.
pub(crate) fn confirm_on_stdin(prompt: &str) -> bool {
    print!("  {} [y/N] ", prompt);
    if std::io::stdout().flush().is_err() {
        return false;
    }
    let mut input = String::new();
    if std::io::stdin().read_line(&mut input).is_err() {
        return false;
    }
    matches!(input.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Submit the session's open form and report what followed: draft warnings
/// and any reload that did not complete.
pub(crate) async fn submit_form(
    ctx: &Context,
    session: &mut Session<HttpGateway>,
    msg: &str,
) -> Result<(), CliError> {
    let submitted = with_spinner(ctx.quiet, msg, session.submit()).await?;
    for warning in &submitted.warnings {
        log::warn!(
            "{} {}",
            "!".if_supports_color(Stdout, |t| t.yellow()),
            warning,
        );
    }
    report_reconcile(session);
    Ok(())
}

/// Warn when the reload after a write left the cache behind the remote.
pub(crate) fn report_reconcile(session: &Session<HttpGateway>) {
    if let Some(err) = session.store().games_error() {
        log::warn!(
            "{} Saved, but the games list could not be refreshed: {}",
            "!".if_supports_color(Stdout, |t| t.yellow()),
            err,
        );
    }
    if session.store().series_stale() {
        log::warn!(
            "{} Saved, but series could not be refreshed; membership shown may be out of date",
            "!".if_supports_color(Stdout, |t| t.yellow()),
        );
    }
}

pub(crate) fn done(msg: impl std::fmt::Display) {
    log::info!(
        "{} {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        msg,
    );
}

/// Optional text for display: `-` when missing or blank.
pub(crate) fn or_dash(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => "-",
    }
}
