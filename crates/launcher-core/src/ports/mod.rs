//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the core domain expects from infrastructure.
//! They contain no implementation details and use only domain types.
//!
//! # Design Rules
//!
//! - No file formats or process handles in any signature
//! - Settings persistence is a narrow `load`/`save` pair
//! - Event emission is fire-and-forget

pub mod event_emitter;
pub mod settings_store;

use std::path::PathBuf;

use thiserror::Error;

pub use event_emitter::{LauncherEventEmitter, NoopEmitter};
pub use settings_store::{MemorySettingsStore, SettingsStore};

#[cfg(test)]
pub use settings_store::MockSettingsStore;

/// Domain-specific errors for settings persistence.
///
/// This error type abstracts away storage implementation details (file I/O,
/// serialization format) from the services that read configuration.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Storage backend error (filesystem, platform preference store, etc.).
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization or deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Errors reported by the process supervisor.
///
/// Only these reach the user as blocking notifications; everything else the
/// supervisor encounters is logged and absorbed.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// The server executable is missing from the installation.
    #[error("PhotoPrism server binary not found.\n\nExpected at: {}", .path.display())]
    BinaryNotFound { path: PathBuf },

    /// The executable exists but the OS refused to launch it.
    #[error("Failed to start PhotoPrism server at {}: {reason}", .path.display())]
    SpawnFailed { path: PathBuf, reason: String },

    /// The configuration cannot be used to start a server.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The server log file could not be opened or created.
    #[error("Cannot open log file {}: {reason}", .path.display())]
    LogFile { path: PathBuf, reason: String },
}

/// Core error type for semantic domain errors.
///
/// Adapters should map this to their own error types (CLI exit codes,
/// dialog messages).
#[derive(Debug, Error)]
pub enum CoreError {
    /// Settings persistence failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Process operation failed.
    #[error(transparent)]
    Process(#[from] ProcessError),

    /// Settings validation error.
    #[error(transparent)]
    Settings(#[from] crate::settings::SettingsError),

    /// Path resolution or directory operation failed.
    #[error(transparent)]
    Path(#[from] crate::paths::PathError),
}
