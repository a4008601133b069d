//! Core domain types and port definitions for the PhotoPrism launcher.
//!
//! This crate has no process or file-format knowledge beyond directory
//! provisioning: it resolves where things live, decides what environment a
//! server run receives, and defines the ports adapters implement.

pub mod environment;
pub mod events;
pub mod paths;
pub mod ports;
pub mod services;
pub mod settings;

// Re-export commonly used types for convenience
pub use environment::{AdminCredentials, ServerEnvironment, build_environment};
pub use events::{ExitSummary, LauncherEvent, ServerState};
pub use ports::{
    CoreError, LauncherEventEmitter, MemorySettingsStore, NoopEmitter, ProcessError,
    SettingsStore, StoreError,
};
pub use services::ConfigService;
pub use settings::{Configuration, SettingsError, StoredSettings, validate_configuration};

// Re-export path utilities
pub use paths::{
    BundleLayout, PathError, PlatformDirs, ProvisionReport,
    ResolvedPaths, ensure_directory, normalize_user_path, provision, settings_file_path,
    verify_writable,
};
