//! Progress spinner around a single remote call.

use std::future::Future;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// A ticking spinner with `msg`, or a hidden one when `quiet`.
pub(crate) fn spinner(quiet: bool, msg: impl Into<String>) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("  {spinner:.cyan} {msg}") {
        pb.set_style(style.tick_chars("/-\\|"));
    }
    pb.set_message(msg.into());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Run `fut` with a spinner showing, clearing it when the future resolves.
pub(crate) async fn with_spinner<F, T>(quiet: bool, msg: impl Into<String>, fut: F) -> T
where
    F: Future<Output = T>,
{
    let pb = spinner(quiet, msg);
    let out = fut.await;
    pb.finish_and_clear();
    out
}
