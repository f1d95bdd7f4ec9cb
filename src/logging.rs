//! Tracing subscriber setup
//!
//! The interactive UI owns the terminal, so it logs to a file only. One-shot
//! commands log to stderr.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;

use crate::{ChartsearchError, Result};

/// Where log lines go
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    /// Append to a file, no ANSI colors
    File(PathBuf),
    /// Standard error, colored
    Stderr,
}

/// Install the global subscriber
///
/// The returned guard flushes buffered lines when dropped; keep it alive for
/// the life of the program.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened or a global subscriber
/// is already installed.
pub fn init(target: &LogTarget, verbose: bool) -> Result<WorkerGuard> {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    match target {
        LogTarget::File(path) => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            let (writer, guard) = tracing_appender::non_blocking(file);

            tracing_subscriber::fmt()
                .with_writer(writer)
                .with_ansi(false)
                .with_max_level(level)
                .try_init()
                .map_err(|e| ChartsearchError::Logging(e.to_string()))?;
            Ok(guard)
        }
        LogTarget::Stderr => {
            let (writer, guard) = tracing_appender::non_blocking(std::io::stderr());

            tracing_subscriber::fmt()
                .with_writer(writer)
                .with_ansi(true)
                .with_max_level(level)
                .try_init()
                .map_err(|e| ChartsearchError::Logging(e.to_string()))?;
            Ok(guard)
        }
    }
}
