use std::path::PathBuf;

use tracing_subscriber::EnvFilter;

mod app;
mod audio;
mod config;
mod library;
mod playback;
mod playlist;
mod runtime;
mod ui;
mod viz;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _log_guard = init_logging();

    let settings = config::Settings::load()?;
    if let Err(msg) = settings.validate() {
        return Err(msg.into());
    }

    runtime::run(settings)
}

/// Set up file-based logging; stdout belongs to the TUI.
///
/// Logs land in `$XDG_STATE_HOME/rondo/rondo.log` (or `~/.local/state/...`).
/// Filtering is controlled through the `RONDO_LOG` environment variable.
fn init_logging() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let state_home = if let Some(xdg) = std::env::var_os("XDG_STATE_HOME") {
        PathBuf::from(xdg)
    } else if let Some(home) = std::env::var_os("HOME") {
        PathBuf::from(home).join(".local").join("state")
    } else {
        return None;
    };

    let log_dir = state_home.join("rondo");
    std::fs::create_dir_all(&log_dir).ok()?;

    let appender = tracing_appender::rolling::never(&log_dir, "rondo.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_env("RONDO_LOG").unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(writer)
        .with_ansi(false)
        .init();

    Some(guard)
}
