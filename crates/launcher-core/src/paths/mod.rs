//! Path utilities for the launcher's directories and bundled resources.
//!
//! This module provides the canonical path resolution for all launcher components:
//! - Platform-standard user directories and the settings file
//! - Photo library, storage and log locations derived from the configured roots
//! - Bundled server executable, shared libraries and assets
//! - Best-effort directory provisioning
//!
//! # Design
//!
//! - Returns `PathBuf` and `PathError` for clear error handling
//! - Resolution is pure; only `ensure` touches the filesystem
//! - OS-specific logic is kept in `platform` and `bundle`

mod bundle;
mod ensure;
mod error;
mod platform;
mod resolver;

// Error type
pub use error::PathError;

// Platform detection
pub use platform::{
    APP_DIR_NAME, PlatformDirs, SETTINGS_PATH_ENV, normalize_user_path, settings_file_path,
};

// Installed bundle
pub use bundle::{BUNDLE_DIR_ENV, BundleLayout, SERVER_BINARY_NAME};

// Directory operations
pub use ensure::{ProvisionReport, ensure_directory, provision, verify_writable};

// Pure resolver
pub use resolver::{
    CONFIG_DIR, IMPORT_DIR, LOG_FILE_NAME, ORIGINALS_DIR, ResolvedPaths, STORAGE_DIR,
};
