use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use backlog_client::Gateway;

use crate::spinner::with_spinner;
use crate::{CliError, Context};

/// Hit the API root and report what it says.
pub(crate) async fn run_ping(ctx: &Context) -> Result<(), CliError> {
    let gateway = ctx.gateway()?;
    let status = with_spinner(
        ctx.quiet,
        format!("Connecting to {}...", gateway.api_root()),
        gateway.health(),
    )
    .await?;

    log::info!(
        "{} {} is up: {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        gateway.api_root().if_supports_color(Stdout, |t| t.cyan()),
        status.message,
    );
    Ok(())
}
