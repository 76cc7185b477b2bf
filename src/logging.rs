use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const LOG_FILE: &str = "outline-tree.log";
const DEFAULT_FILTER: &str = "outline_tree=info";

/// Keeps the background log writer alive; logs stop when it is dropped.
pub struct LoggingGuard {
    _guard: WorkerGuard,
}

/// Send `tracing` output to a daily rolling file. The terminal belongs to the
/// UI, so nothing is written to stdout or stderr.
///
/// Returns `None` when no log directory is usable or a subscriber is already set.
pub fn init() -> Option<LoggingGuard> {
    let log_dir = log_dir()?;

    let file_appender = tracing_appender::rolling::daily(&log_dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let subscriber = tracing_subscriber::registry().with(env_filter).with(
        tracing_subscriber::fmt::layer()
            .with_writer(writer)
            .with_ansi(false)
            .with_target(true)
            .with_file(true)
            .with_line_number(true),
    );

    if subscriber.try_init().is_err() {
        return None;
    }

    tracing::info!(log_dir = %log_dir.display(), "tracing initialized");

    Some(LoggingGuard { _guard: guard })
}

fn log_dir() -> Option<PathBuf> {
    let state_dir = std::env::var_os("XDG_STATE_HOME")
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .or_else(|| {
            std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".local").join("state"))
        })
        .unwrap_or_else(std::env::temp_dir);
    let dir = state_dir.join("outline-tree").join("logs");
    std::fs::create_dir_all(&dir).ok()?;
    Some(dir)
}
