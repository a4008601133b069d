//! Settings domain types and validation.
//!
//! `StoredSettings` is the persisted shape: every key is optional because the
//! store may be empty on first launch or hand-edited. `Configuration` is the
//! fully resolved value the rest of the launcher works with.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::paths::PlatformDirs;

/// Persisted launcher settings.
///
/// Field names on disk are the launcher's historical preference keys.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct StoredSettings {
    /// Root of the photo library (originals and import live below it).
    #[serde(rename = "PicturesFolder", skip_serializing_if = "Option::is_none")]
    pub pictures_folder: Option<PathBuf>,

    /// Root of the server's working data (storage and config live below it).
    #[serde(rename = "DataFolder", skip_serializing_if = "Option::is_none")]
    pub data_folder: Option<PathBuf>,

    /// Start the server as soon as the launcher opens.
    #[serde(rename = "StartServerOnLaunch", skip_serializing_if = "Option::is_none")]
    pub start_server_on_launch: Option<bool>,
}

impl StoredSettings {
    /// Fill missing folder keys with platform defaults.
    ///
    /// Returns `true` when something was filled in and the settings should be
    /// written back. Present values are never overwritten.
    pub fn fill_defaults(&mut self, platform: &PlatformDirs) -> bool {
        let mut changed = false;

        if self.pictures_folder.is_none() {
            self.pictures_folder = Some(platform.default_pictures_root());
            changed = true;
        }
        if self.data_folder.is_none() {
            self.data_folder = Some(platform.default_data_root());
            changed = true;
        }

        changed
    }

    /// Resolve into a `Configuration`, falling back to defaults for missing keys.
    pub fn to_configuration(&self, platform: &PlatformDirs) -> Configuration {
        Configuration {
            pictures_root: self
                .pictures_folder
                .clone()
                .unwrap_or_else(|| platform.default_pictures_root()),
            data_root: self
                .data_folder
                .clone()
                .unwrap_or_else(|| platform.default_data_root()),
            auto_start_on_launch: self.start_server_on_launch.unwrap_or(false),
        }
    }
}

/// Resolved launcher configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    /// Root of the photo library.
    pub pictures_root: PathBuf,
    /// Root of the server's working data.
    pub data_root: PathBuf,
    /// Start the server as soon as the launcher opens.
    pub auto_start_on_launch: bool,
}

impl Configuration {
    /// Configuration built purely from platform defaults.
    pub fn defaults(platform: &PlatformDirs) -> Self {
        StoredSettings::default().to_configuration(platform)
    }
}

/// Settings validation error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SettingsError {
    #[error("{which} cannot be empty")]
    EmptyRoot { which: &'static str },

    #[error("{which} must be an absolute path, got {}", .path.display())]
    RelativeRoot { which: &'static str, path: PathBuf },
}

/// Validate that both roots are usable before a server start is accepted.
pub fn validate_configuration(config: &Configuration) -> Result<(), SettingsError> {
    validate_root("Pictures folder", &config.pictures_root)?;
    validate_root("Data folder", &config.data_root)
}

fn validate_root(which: &'static str, path: &Path) -> Result<(), SettingsError> {
    if path.as_os_str().is_empty() {
        return Err(SettingsError::EmptyRoot { which });
    }
    if !path.is_absolute() {
        return Err(SettingsError::RelativeRoot {
            which,
            path: path.to_path_buf(),
        });
    }
    Ok(())
}
