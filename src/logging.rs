//! Logging setup for the desktop client and the CLI.
//!
//! Every launch gets its own file under `<app dir>/logs`, named after the
//! launch time so the names sort chronologically. Events are mirrored to a
//! console stream chosen by the caller.

use std::{
    fs::{self, File, OpenOptions},
    path::{Path, PathBuf},
    sync::OnceLock,
};

use time::{OffsetDateTime, UtcOffset, format_description::FormatItem, macros::format_description};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Registry, fmt, fmt::writer::BoxMakeWriter, prelude::*};

use crate::app_dirs::{self, AppDirError};

/// Number of launch logs kept, including the current one.
const MAX_LOG_FILES: usize = 10;
const LOG_FILE_PREFIX: &str = "civic_classifier_";
const LOG_FILE_EXTENSION: &str = ".log";

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Console stream that receives the human-readable copy of each event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConsoleTarget {
    /// The desktop client logs to stdout.
    Stdout,
    /// The CLI keeps stdout for results and logs to stderr.
    Stderr,
}

impl ConsoleTarget {
    fn writer(self) -> BoxMakeWriter {
        match self {
            ConsoleTarget::Stdout => BoxMakeWriter::new(std::io::stdout),
            ConsoleTarget::Stderr => BoxMakeWriter::new(std::io::stderr),
        }
    }
}

/// Errors that may occur while initializing logging.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error(transparent)]
    AppDir(#[from] AppDirError),
    #[error("Failed to open log file {path}: {source}")]
    OpenLogFile {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Listing or deleting older launch logs failed.
    #[error("Failed to prune logs in {path}: {source}")]
    Prune {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to format log filename time: {0}")]
    FormatTime(#[from] time::error::Format),
    #[error("Failed to install global tracing subscriber: {0}")]
    SetGlobal(#[from] tracing::subscriber::SetGlobalDefaultError),
}

/// Initialize tracing for the desktop client (stdout + log file).
pub fn init() -> Result<(), LoggingError> {
    init_with(ConsoleTarget::Stdout)
}

/// Initialize tracing with the given console target plus the log file.
///
/// Subsequent calls are no-ops. Failures are returned so callers can keep
/// running without a log file.
pub fn init_with(console: ConsoleTarget) -> Result<(), LoggingError> {
    if LOG_GUARD.get().is_some() {
        return Ok(());
    }

    let log_dir = app_dirs::logs_dir()?;
    let log_path = log_dir.join(launch_log_name(launch_time())?);
    let file = open_log_file(&log_path)?;
    prune_old_logs(&log_dir, MAX_LOG_FILES)?;

    let (file_writer, guard) = tracing_appender::non_blocking(file);
    let timer = local_timer();
    let subscriber = Registry::default()
        .with(env_filter())
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_timer(timer.clone())
                .with_writer(file_writer),
        )
        .with(fmt::layer().with_timer(timer).with_writer(console.writer()));
    tracing::subscriber::set_global_default(subscriber)?;
    let _ = LOG_GUARD.set(guard);

    tracing::info!(path = %log_path.display(), "Logging initialized");
    Ok(())
}

fn open_log_file(path: &Path) -> Result<File, LoggingError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| LoggingError::OpenLogFile {
            path: path.to_path_buf(),
            source,
        })
}

/// Delete the oldest launch logs so at most `keep` remain.
///
/// Only files named like launch logs are considered; ordering comes from the
/// timestamp embedded in the name.
fn prune_old_logs(dir: &Path, keep: usize) -> Result<(), LoggingError> {
    let prune_err = |source| LoggingError::Prune {
        path: dir.to_path_buf(),
        source,
    };
    let mut launch_logs: Vec<PathBuf> = fs::read_dir(dir)
        .map_err(prune_err)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && is_launch_log(path))
        .collect();
    if launch_logs.len() <= keep {
        return Ok(());
    }
    launch_logs.sort();
    let excess = launch_logs.len() - keep;
    for path in launch_logs.drain(..excess) {
        fs::remove_file(&path).map_err(prune_err)?;
    }
    Ok(())
}

fn is_launch_log(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with(LOG_FILE_PREFIX) && name.ends_with(LOG_FILE_EXTENSION))
}

fn launch_log_name(at: OffsetDateTime) -> Result<String, LoggingError> {
    const NAME_FORMAT: &[FormatItem<'_>] =
        format_description!("[year]-[month]-[day]_[hour]-[minute]-[second]");
    Ok(format!(
        "{LOG_FILE_PREFIX}{}{LOG_FILE_EXTENSION}",
        at.format(NAME_FORMAT)?
    ))
}

fn local_timer() -> fmt::time::OffsetTime<&'static [FormatItem<'static>]> {
    const DISPLAY_FORMAT: &[FormatItem<'static>] =
        format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
    let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
    fmt::time::OffsetTime::new(offset, DISPLAY_FORMAT)
}

fn launch_time() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}
