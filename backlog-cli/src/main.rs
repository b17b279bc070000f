//! backlog CLI
//!
//! Command-line front end for a game backlog service: games with completion
//! and trophy tracking, plus game and movie series.

mod cli_types;
mod commands;
mod error;
mod spinner;

use std::future::Future;
use std::io::Write;

use clap::Parser;
use log::LevelFilter;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use backlog_client::{ClientConfig, HttpGateway};
use backlog_lib::Session;

use cli_types::{Cli, Commands, ConfigAction};
pub(crate) use error::CliError;

/// Modules whose log output is shown at the chosen level. Everything else
/// (reqwest, hyper) stays at warn unless `RUST_LOG` says otherwise.
const OWN_MODULES: &[&str] = &["backlog", "backlog_lib", "backlog_client"];

/// Resolved settings shared by every remote command.
pub(crate) struct Context {
    pub config: ClientConfig,
    pub quiet: bool,
}

impl Context {
    pub(crate) fn gateway(&self) -> Result<HttpGateway, CliError> {
        Ok(HttpGateway::new(&self.config)?)
    }

    pub(crate) fn session(&self) -> Result<Session<HttpGateway>, CliError> {
        Ok(Session::new(self.gateway()?, self.config.page_size))
    }
}

fn main() {
    let cli = Cli::parse();
    init_logger(cli.quiet, cli.verbose);

    if let Err(e) = run(cli) {
        log::error!(
            "{} {}",
            "\u{2718}".if_supports_color(Stdout, |t| t.red()),
            e,
        );
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let Cli {
        url,
        page_size,
        quiet,
        command,
        ..
    } = cli;

    match command {
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::run_config_show(),
            ConfigAction::Path => commands::config::run_config_path(),
            ConfigAction::Set { timeout } => {
                commands::config::run_config_set(url, page_size, timeout)
            }
        },
        Commands::Ping => {
            let ctx = context(url, page_size, quiet)?;
            block_on(commands::ping::run_ping(&ctx))
        }
        Commands::Games { action } => {
            let ctx = context(url, page_size, quiet)?;
            block_on(commands::games::run_games(&ctx, action))
        }
        Commands::Series { action } => {
            let ctx = context(url, page_size, quiet)?;
            block_on(commands::series::run_series(&ctx, action))
        }
    }
}

/// Config file and environment, then command-line flags on top.
fn context(
    url: Option<String>,
    page_size: Option<usize>,
    quiet: bool,
) -> Result<Context, CliError> {
    let config = ClientConfig::load()?.with_overrides(url, page_size, None);
    config
        .validate()
        .map_err(|e| CliError::config(e.to_string()))?;
    log::debug!(
        "Using {} (page size {}, timeout {}s)",
        config.api_root(),
        config.page_size,
        config.timeout_secs,
    );
    Ok(Context { config, quiet })
}

fn block_on<F>(fut: F) -> Result<(), CliError>
where
    F: Future<Output = Result<(), CliError>>,
{
    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::runtime(format!("Failed to create tokio runtime: {}", e)))?;
    rt.block_on(fut)
}

/// Info lines are the command's normal output and print bare on stdout.
/// `--verbose` adds timestamps, levels and debug messages; `--quiet` keeps
/// only warnings and errors.
fn init_logger(quiet: bool, verbose: bool) {
    let level = if quiet {
        LevelFilter::Warn
    } else if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let mut builder = env_logger::Builder::new();
    builder.filter_level(LevelFilter::Warn);
    for module in OWN_MODULES {
        builder.filter_module(module, level);
    }
    builder.parse_env(env_logger::Env::default());
    builder.target(env_logger::Target::Stdout);
    builder.format(move |buf, record| {
        if verbose {
            writeln!(
                buf,
                "{} {:<5} [{}] {}",
                chrono::Local::now().format("%H:%M:%S%.3f"),
                record.level(),
                record.target(),
                record.args(),
            )
        } else {
            writeln!(buf, "{}", record.args())
        }
    });
    builder.init();
}
