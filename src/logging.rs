//! File logging. The terminal belongs to the ui, so nothing is ever written to stdout or stderr.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{InitError, RollingFileAppender, Rotation};
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::{fmt, EnvFilter};

const APP_DIR_NAME: &str = "pomoclock";
const LOG_FILE_NAME: &str = "pomoclock.log";

/// `$XDG_STATE_HOME/pomoclock`, else `$HOME/.local/state/pomoclock`, else the working directory.
pub fn default_log_dir() -> PathBuf {
    log_dir_from(
        std::env::var_os("XDG_STATE_HOME").map(PathBuf::from),
        std::env::var_os("HOME").map(PathBuf::from),
    )
}

fn log_dir_from(xdg_state_home: Option<PathBuf>, home: Option<PathBuf>) -> PathBuf {
    match (xdg_state_home, home) {
        (Some(state), _) if state.is_absolute() => state.join(APP_DIR_NAME),
        (_, Some(home)) => home.join(".local").join("state").join(APP_DIR_NAME),
        _ => PathBuf::from("."),
    }
}

/// `RUST_LOG` wins over `fallback` when it is set. Either one being malformed is an error.
fn env_filter(rust_log: Option<String>, fallback: &str) -> Result<EnvFilter, LoggingError> {
    match rust_log {
        Some(directives) => EnvFilter::try_new(&directives)
            .map_err(|e| LoggingError::EnvFilter(directives, e)),
        None => EnvFilter::try_new(fallback)
            .map_err(|e| LoggingError::Filter(fallback.to_string(), e)),
    }
}

/// The returned guard flushes pending log lines when dropped; keep it alive until exit.
pub fn init_logging(log_dir: &Path, log_level: &str) -> Result<WorkerGuard, LoggingError> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = env_filter(rust_log, log_level)?;

    std::fs::create_dir_all(log_dir)
        .map_err(|source| LoggingError::CreateDir {
            path: log_dir.to_path_buf(),
            source,
        })?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(LOG_FILE_NAME)
        .build(log_dir)?;
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    let subscriber = fmt()
        .with_writer(writer)
        .with_env_filter(filter)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|_| LoggingError::AlreadyInitialized)?;

    tracing::info!(
        log_dir = %log_dir.display(),
        "{} v{} started",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );

    Ok(guard)
}

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("failed to create log directory {}: {source}", .path.display())]
    CreateDir { path: PathBuf, source: io::Error },
    #[error("failed to open log file: {0}")]
    Appender(#[from] InitError),
    #[error("invalid log filter \"{0}\": {1}")]
    Filter(String, ParseError),
    #[error("invalid RUST_LOG filter \"{0}\": {1}")]
    EnvFilter(String, ParseError),
    #[error("a global logger was already installed")]
    AlreadyInitialized,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xdg_state_home_is_preferred() {
        let dir = log_dir_from(Some("/state".into()), Some("/home/me".into()));

        assert_eq!(dir, PathBuf::from("/state/pomoclock"));
    }

    #[test]
    fn relative_xdg_state_home_is_ignored() {
        let dir = log_dir_from(Some("state".into()), Some("/home/me".into()));

        assert_eq!(dir, PathBuf::from("/home/me/.local/state/pomoclock"));
    }

    #[test]
    fn falls_back_to_working_directory() {
        assert_eq!(log_dir_from(None, None), PathBuf::from("."));
    }

    #[test]
    fn invalid_fallback_filter_is_reported() {
        let err = env_filter(None, "pomoclock=notalevel").unwrap_err();

        assert!(matches!(err, LoggingError::Filter(ref s, _) if s == "pomoclock=notalevel"));
    }

    #[test]
    fn invalid_rust_log_is_reported() {
        let err = env_filter(Some("pomoclock=notalevel".to_string()), "info").unwrap_err();

        assert!(matches!(err, LoggingError::EnvFilter(ref s, _) if s == "pomoclock=notalevel"));
    }

    #[test]
    fn rust_log_takes_precedence_over_fallback() {
        assert!(env_filter(Some("debug".to_string()), "pomoclock=notalevel").is_ok());
    }

    #[test]
    fn plain_levels_are_valid_filters() {
        for level in ["error", "warn", "info", "debug", "trace"] {
            assert!(EnvFilter::try_new(level).is_ok());
        }
    }
}
