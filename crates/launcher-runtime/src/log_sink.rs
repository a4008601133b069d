//! Append-only server log file.
//!
//! The server's stdout and stderr are redirected straight into this file at
//! the OS level; the launcher itself only writes the start markers that
//! delimit one run from the next.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tracing::debug;

use launcher_core::ProcessError;

/// Delimiter written before every server spawn.
pub const START_MARKER: &str = "=== PhotoPrism Server Starting ===";

/// Content written into a log file that is created for viewing.
const EMPTY_LOG_HEADER: &str = "PhotoPrism Log\n";

/// Format the marker line for a run starting at `at`.
pub fn start_marker(at: DateTime<Local>) -> String {
    format!("\n[{}] {START_MARKER}\n", at.format("%Y-%m-%d %H:%M:%S %z"))
}

/// Handle to the server log file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSink {
    path: PathBuf,
}

impl LogSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open the file for appending, creating it and its directory if absent.
    pub fn open(&self) -> io::Result<File> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
    }

    /// Append raw bytes.
    pub fn append(&self, bytes: &[u8]) -> io::Result<()> {
        let mut file = self.open()?;
        file.write_all(bytes)?;
        file.flush()
    }

    /// Write a start marker and return the file for the child's output.
    pub fn begin_run(&self) -> io::Result<File> {
        let mut file = self.open()?;
        file.write_all(start_marker(Local::now()).as_bytes())?;
        file.flush()?;
        debug!(path = %self.path.display(), "Wrote server start marker");
        Ok(file)
    }

    /// Make sure the file exists so it can be shown to the user.
    ///
    /// A missing file is created with a short header; an existing one is left
    /// untouched.
    pub fn ensure_exists(&self) -> Result<(), ProcessError> {
        if self.path.is_file() {
            return Ok(());
        }
        self.append(EMPTY_LOG_HEADER.as_bytes())
            .map_err(|e| ProcessError::LogFile {
                path: self.path.clone(),
                reason: e.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::tempdir;

    #[test]
    fn marker_format() {
        let at = Local.with_ymd_and_hms(2024, 3, 1, 9, 5, 7).unwrap();
        let marker = start_marker(at);

        assert!(marker.starts_with("\n[2024-03-01 09:05:07 "));
        assert!(marker.ends_with("] === PhotoPrism Server Starting ===\n"));
    }

    #[test]
    fn append_creates_missing_file_and_directory() {
        let temp = tempdir().unwrap();
        let sink = LogSink::new(temp.path().join("Logs/PhotoPrism/photoprism.log"));

        sink.append(b"one\n").unwrap();
        sink.append(b"two\n").unwrap();

        assert_eq!(fs::read_to_string(sink.path()).unwrap(), "one\ntwo\n");
    }

    #[test]
    fn begin_run_appends_marker() {
        let temp = tempdir().unwrap();
        let sink = LogSink::new(temp.path().join("photoprism.log"));
        sink.append(b"previous run\n").unwrap();

        let mut file = sink.begin_run().unwrap();
        file.write_all(b"server output\n").unwrap();

        let content = fs::read_to_string(sink.path()).unwrap();
        assert!(content.starts_with("previous run\n\n["));
        assert!(content.contains(START_MARKER));
        assert!(content.ends_with("===\nserver output\n"));
    }

    #[test]
    fn ensure_exists_seeds_header_once() {
        let temp = tempdir().unwrap();
        let sink = LogSink::new(temp.path().join("photoprism.log"));

        sink.ensure_exists().unwrap();
        sink.ensure_exists().unwrap();

        assert_eq!(fs::read_to_string(sink.path()).unwrap(), "PhotoPrism Log\n");
    }

    #[test]
    fn ensure_exists_reports_log_file_error() {
        let temp = tempdir().unwrap();
        let blocker = temp.path().join("blocker");
        fs::write(&blocker, b"file").unwrap();
        let sink = LogSink::new(blocker.join("photoprism.log"));

        let err = sink.ensure_exists().unwrap_err();
        assert!(matches!(err, ProcessError::LogFile { .. }));
    }
}
