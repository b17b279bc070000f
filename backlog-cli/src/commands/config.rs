use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use backlog_client::{ClientConfig, ConfigSource};

use crate::CliError;

/// Show the resolved settings and where each one came from.
pub(crate) fn run_config_show() -> Result<(), CliError> {
    let path = backlog_client::config_path();
    let sources = backlog_client::config_sources();

    log::info!(
        "{}",
        "Backlog Configuration".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("");

    match &path {
        Some(p) if p.exists() => {
            log::info!(
                "  Config file: {} {}",
                p.display().if_supports_color(Stdout, |t| t.cyan()),
                "(exists)".if_supports_color(Stdout, |t| t.green()),
            );
        }
        Some(p) => {
            log::info!(
                "  Config file: {} {}",
                p.display().if_supports_color(Stdout, |t| t.cyan()),
                "(not found)".if_supports_color(Stdout, |t| t.dimmed()),
            );
        }
        None => {
            log::info!(
                "  Config file: {}",
                "could not determine path".if_supports_color(Stdout, |t| t.red()),
            );
        }
    }
    log::info!("");

    let config = ClientConfig::load()?;
    let fields: [(&str, &ConfigSource, String); 3] = [
        ("base_url", &sources.base_url, config.origin().to_string()),
        ("page_size", &sources.page_size, config.page_size.to_string()),
        (
            "timeout_secs",
            &sources.timeout_secs,
            config.timeout_secs.to_string(),
        ),
    ];

    for (name, source, value) in fields {
        log::info!(
            "  {} {} {}",
            format!("{}:", name).if_supports_color(Stdout, |t| t.cyan()),
            value,
            format!("({})", source).if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    log::info!("");
    log::info!(
        "  API root: {}",
        config.api_root().if_supports_color(Stdout, |t| t.bold()),
    );
    Ok(())
}

/// Print the config file path.
pub(crate) fn run_config_path() -> Result<(), CliError> {
    match backlog_client::config_path() {
        Some(p) => {
            log::info!("{}", p.display());
            Ok(())
        }
        None => Err(CliError::config("could not determine config directory")),
    }
}

/// Write the given settings over the current ones and save.
pub(crate) fn run_config_set(
    url: Option<String>,
    page_size: Option<usize>,
    timeout: Option<u64>,
) -> Result<(), CliError> {
    if url.is_none() && page_size.is_none() && timeout.is_none() {
        log::warn!("Nothing to set. Pass --url, --page-size or --timeout.");
        return Ok(());
    }

    let config = ClientConfig::load()?.with_overrides(url, page_size, timeout);
    config
        .validate()
        .map_err(|e| CliError::config(e.to_string()))?;

    let path = backlog_client::save_to_file(&config)?;
    log::info!(
        "{} Settings saved to {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        path.display().if_supports_color(Stdout, |t| t.cyan()),
    );
    Ok(())
}
