//! Append-only action log.
//!
//! Every notable action or failure of a run becomes one timestamped line. The
//! file is opened, appended to and closed on each call, so nothing is held
//! open between entries and earlier lines survive a crash mid-run.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone)]
pub struct ActionLog {
    path: PathBuf,
}

impl ActionLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends `message` with the current local time.
    ///
    /// A sink that cannot be written is reported on the diagnostic channel
    /// and does not interrupt the run.
    pub fn record(&self, message: impl AsRef<str>) {
        let line = format_entry(Local::now().naive_local(), message.as_ref());

        let result = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .and_then(|mut file| file.write_all(line.as_bytes()));

        if let Err(e) = result {
            tracing::warn!(path = %self.path.display(), error = %e, "Failed to write action log");
        }
    }
}

/// Formats one log line, newline included
pub fn format_entry(timestamp: NaiveDateTime, message: &str) -> String {
    format!("[{}] {}\n", timestamp.format(TIMESTAMP_FORMAT), message)
}
