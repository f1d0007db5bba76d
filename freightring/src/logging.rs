//! Logging infrastructure.
//!
//! Sets up the `tracing` subscriber behind [`crate::log::TracingLogger`]:
//! - writes the session trace to a log file (cleared on session start)
//! - mirrors it to stdout for live tailing
//! - single-line format, so each trace event stays one atomic line
//! - filterable via the `RUST_LOG` environment variable

use std::fs;
use std::io;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Guard that must be kept alive for the duration of logging.
///
/// Dropping it flushes and closes the log file writer.
pub struct LoggingGuard {
    _file_guard: WorkerGuard,
}

/// Initializes the logging system.
///
/// Creates the log directory if needed, truncates the previous session's
/// log file, and installs a global subscriber writing to both the file
/// and stdout. The env filter defaults to `info` when `RUST_LOG` is
/// unset.
///
/// # Arguments
///
/// * `log_dir` - Directory for log files (e.g. "logs")
/// * `log_file` - Log filename (e.g. "freightring.log")
///
/// # Errors
///
/// Returns an error if the directory cannot be created or the previous
/// log file cannot be truncated.
pub fn init_logging(log_dir: &str, log_file: &str) -> Result<LoggingGuard, io::Error> {
    fs::create_dir_all(log_dir)?;

    // Truncate rather than delete, so an externally held handle to the
    // previous session's file stays valid.
    let log_path = Path::new(log_dir).join(log_file);
    fs::write(&log_path, "")?;

    let file_appender = tracing_appender::rolling::never(log_dir, log_file);
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false)
        .with_target(false);

    let stdout_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stdout)
        .with_ansi(true)
        .with_target(false);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(stdout_layer)
        .init();

    Ok(LoggingGuard {
        _file_guard: file_guard,
    })
}

/// Default log directory.
pub fn default_log_dir() -> &'static str {
    "logs"
}

/// Default log file name.
pub fn default_log_file() -> &'static str {
    "freightring.log"
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_paths() {
        assert_eq!(default_log_dir(), "logs");
        assert_eq!(default_log_file(), "freightring.log");
    }

    // init_logging installs a process-global subscriber that can only be
    // set once, so the directory and truncation behavior is tested
    // through the same file operations it performs.

    #[test]
    fn test_log_directory_and_file_are_created() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("nested").join("logs");
        let dir_str = dir.to_str().unwrap();

        fs::create_dir_all(dir_str).unwrap();
        let log_path = dir.join("session.log");
        fs::write(&log_path, "").unwrap();

        assert!(log_path.exists());
        assert_eq!(fs::read_to_string(&log_path).unwrap(), "");
    }

    #[test]
    fn test_previous_session_log_is_truncated() {
        let temp = TempDir::new().unwrap();
        let log_path = temp.path().join("session.log");
        fs::write(&log_path, "stale trace lines").unwrap();

        fs::write(&log_path, "").unwrap();

        assert_eq!(fs::read_to_string(&log_path).unwrap(), "");
    }
}
