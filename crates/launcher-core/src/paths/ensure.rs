//! Directory creation and verification utilities.
//!
//! Creates directories and verifies they are writable, plus the provisioning pass that materialises every directory of a
//! [`ResolvedPaths`]. Provisioning is best-effort: failures are collected in a
//! [`ProvisionReport`] instead of aborting, and callers decide whether to log
//! or surface them.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::error::PathError;
use super::resolver::ResolvedPaths;

/// Ensure `path` is a writable directory, creating it and its parents if missing.
pub fn ensure_directory(path: &Path) -> Result<(), PathError> {
    if path.exists() {
        if !path.is_dir() {
            return Err(PathError::NotADirectory(path.to_path_buf()));
        }
    } else {
        fs::create_dir_all(path).map_err(|e| PathError::CreateFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
    }

    verify_writable(path)?;
    Ok(())
}

/// Verify a directory is writable by attempting to create a test file.
pub fn verify_writable(path: &Path) -> Result<(), PathError> {
    let test_file = path.join(".photoprism_write_test");
    let result = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&test_file);

    match result {
        Ok(mut file) => {
            file.write_all(b"test")
                .map_err(|e| PathError::NotWritable {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                })?;
            drop(file);
            let _ = fs::remove_file(&test_file);
            Ok(())
        }
        Err(err) => Err(PathError::NotWritable {
            path: path.to_path_buf(),
            reason: err.to_string(),
        }),
    }
}

/// Outcome of a provisioning pass.
#[derive(Debug, Default)]
pub struct ProvisionReport {
    /// Directories that did not exist before this pass and do now.
    pub created: Vec<PathBuf>,
    /// Directories that could not be created or are not writable.
    pub failures: Vec<PathError>,
}

impl ProvisionReport {
    /// True when every directory exists and is writable.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Create every directory of `paths` that is missing, including parents.
///
/// Idempotent: a second pass over an already provisioned tree creates nothing
/// and reports no failures. A failing directory does not stop the pass.
pub fn provision(paths: &ResolvedPaths) -> ProvisionReport {
    let mut report = ProvisionReport::default();

    for dir in paths.directories() {
        let existed = dir.is_dir();
        match ensure_directory(dir) {
            Ok(()) if !existed => {
                debug!(path = %dir.display(), "Created directory");
                report.created.push(dir.to_path_buf());
            }
            Ok(()) => {}
            Err(err) => report.failures.push(err),
        }
    }

    report
}
