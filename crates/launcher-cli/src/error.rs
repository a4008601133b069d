//! CLI-specific error types and mappings.
//!
//! This module provides error types for the CLI adapter and mappings
//! from `CoreError` to exit codes and user-facing messages.

use launcher_core::{CoreError, ProcessError};
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Argument error.
    #[error("Invalid arguments: {0}")]
    Arguments(String),

    /// IO error (file not found, permission denied, etc.).
    #[error("IO error: {0}")]
    Io(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Process execution error.
    #[error("{0}")]
    Process(String),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow Unix conventions:
    /// - 1: General error
    /// - 2: Misuse of shell command (invalid arguments)
    /// - 64-78: Reserved for specific error categories (see sysexits.h)
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Arguments(_) => 2, // EX_USAGE
            Self::Process(_) => 71,  // EX_OSERR
            Self::Io(_) => 74,       // EX_IOERR
            Self::Config(_) => 78,   // EX_CONFIG
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Store(store_err) => Self::Config(store_err.to_string()),
            CoreError::Process(proc_err) => proc_err.into(),
            CoreError::Settings(settings_err) => Self::Config(settings_err.to_string()),
            CoreError::Path(path_err) => Self::Arguments(path_err.to_string()),
        }
    }
}

impl From<ProcessError> for CliError {
    fn from(err: ProcessError) -> Self {
        match err {
            ProcessError::InvalidConfiguration(msg) => Self::Config(msg),
            ProcessError::LogFile { .. } => Self::Io(err.to_string()),
            ProcessError::BinaryNotFound { .. } | ProcessError::SpawnFailed { .. } => {
                Self::Process(err.to_string())
            }
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use launcher_core::{PathError, StoreError};
    use std::path::PathBuf;

    #[test]
    fn core_errors_map_to_exit_codes() {
        let store: CliError = CoreError::Store(StoreError::Storage("x".into())).into();
        assert_eq!(store.exit_code(), 78);

        let path: CliError = CoreError::Path(PathError::EmptyPath).into();
        assert_eq!(path.exit_code(), 2);
    }

    #[test]
    fn missing_binary_is_an_os_error() {
        let err: CliError = ProcessError::BinaryNotFound {
            path: PathBuf::from("/opt/photoprism-server"),
        }
        .into();

        assert_eq!(err.exit_code(), 71);
        assert!(err.to_string().contains("/opt/photoprism-server"));
    }

    #[test]
    fn io_errors_map_to_ioerr() {
        let err: CliError = std::io::Error::other("disk").into();
        assert_eq!(err.exit_code(), 74);
    }
}
