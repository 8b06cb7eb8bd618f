//! Subscriber setup shared by the binaries.
//!
//! Filtering follows `RUST_LOG`, defaulting to [`DEFAULT_FILTER`].

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

pub const DEFAULT_FILTER: &str = "subtile=info";

fn filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Log to `dir/file_name`. Use this when stdout is owned by a display.
///
/// Keep the guard alive for the whole run; dropping it flushes the writer.
pub fn init_file(dir: impl AsRef<Path>, file_name: &str) -> WorkerGuard {
    let appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter())
        .with_writer(writer)
        .with_ansi(false)
        .try_init();
    guard
}

/// Log to stderr, leaving stdout for data.
pub fn init_stderr() -> WorkerGuard {
    let (writer, guard) = tracing_appender::non_blocking(std::io::stderr());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter())
        .with_writer(writer)
        .try_init();
    guard
}
