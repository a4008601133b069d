//! Platform-specific path detection and resolution.
//!
//! This module locates the platform-standard user directories the launcher
//! builds its defaults from (pictures, application data, logs) and the
//! settings file. Everything downstream receives these as plain values so
//! resolution stays deterministic in tests.

use std::env;
use std::fmt;
use std::path::{Path, PathBuf};

use super::error::PathError;

/// Directory name appended to every platform-standard root.
pub const APP_DIR_NAME: &str = "PhotoPrism";

/// Directory name holding the launcher's own settings file.
pub const SETTINGS_DIR_NAME: &str = "PhotoPrism Launcher";

/// File name of the persisted launcher settings.
pub const SETTINGS_FILE_NAME: &str = "settings.json";

/// Environment variable overriding the settings file location.
pub const SETTINGS_PATH_ENV: &str = "PHOTOPRISM_LAUNCHER_SETTINGS";

/// Platform-standard user directories.
///
/// Each field is the platform root *without* the `PhotoPrism` component;
/// use the accessor methods to get the launcher-specific locations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformDirs {
    /// The user's pictures directory (e.g. `~/Pictures`).
    pub pictures: PathBuf,
    /// The per-user application data directory (e.g. `~/Library/Application Support`).
    pub application_data: PathBuf,
    /// The per-user log directory (e.g. `~/Library/Logs`).
    pub logs: PathBuf,
}

impl PlatformDirs {
    /// Detect the platform directories for the current user.
    ///
    /// The pictures directory falls back to `~/Pictures` when the platform
    /// does not advertise one (headless Linux installs commonly don't).
    pub fn detect() -> Result<Self, PathError> {
        let home = dirs::home_dir().ok_or(PathError::NoHomeDir)?;
        let pictures = dirs::picture_dir().unwrap_or_else(|| home.join("Pictures"));
        let application_data = dirs::data_dir().ok_or(PathError::NoDataDir)?;
        let logs = log_root(&home).ok_or(PathError::NoLogDir)?;

        Ok(Self {
            pictures,
            application_data,
            logs,
        })
    }

    /// Build platform directories rooted under a single base directory.
    ///
    /// Used for sandboxed runs and tests.
    pub fn under(base: &Path) -> Self {
        Self {
            pictures: base.join("Pictures"),
            application_data: base.join("Application Support"),
            logs: base.join("Logs"),
        }
    }

    /// Default pictures root: `<pictures>/PhotoPrism`.
    pub fn default_pictures_root(&self) -> PathBuf {
        self.pictures.join(APP_DIR_NAME)
    }

    /// Default data root: `<application data>/PhotoPrism`.
    pub fn default_data_root(&self) -> PathBuf {
        self.application_data.join(APP_DIR_NAME)
    }

    /// Launcher log directory: `<logs>/PhotoPrism`. Not user-configurable.
    pub fn log_dir(&self) -> PathBuf {
        self.logs.join(APP_DIR_NAME)
    }
}

impl fmt::Display for PlatformDirs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "platform_pictures = {}", self.pictures.display())?;
        writeln!(
            f,
            "platform_application_data = {}",
            self.application_data.display()
        )?;
        write!(f, "platform_logs = {}", self.logs.display())
    }
}

#[cfg(target_os = "macos")]
fn log_root(home: &Path) -> Option<PathBuf> {
    Some(home.join("Library").join("Logs"))
}

#[cfg(not(target_os = "macos"))]
fn log_root(_home: &Path) -> Option<PathBuf> {
    dirs::state_dir().or_else(dirs::data_local_dir)
}

/// Location of the launcher settings file.
///
/// Resolution order:
/// 1. `PHOTOPRISM_LAUNCHER_SETTINGS` environment variable
/// 2. `<config dir>/PhotoPrism Launcher/settings.json`
pub fn settings_file_path() -> Result<PathBuf, PathError> {
    if let Some(path) = env::var_os(SETTINGS_PATH_ENV).filter(|p| !p.is_empty()) {
        return Ok(PathBuf::from(path));
    }

    let config_dir = dirs::config_dir().ok_or(PathError::NoDataDir)?;
    Ok(config_dir.join(SETTINGS_DIR_NAME).join(SETTINGS_FILE_NAME))
}

/// Normalize a user-provided path, expanding `~` and making it absolute.
pub fn normalize_user_path(raw: &Path) -> Result<PathBuf, PathError> {
    if raw.as_os_str().is_empty() {
        return Err(PathError::EmptyPath);
    }

    let expanded = match raw.strip_prefix("~") {
        Ok(rest) => {
            let home = dirs::home_dir().ok_or(PathError::NoHomeDir)?;
            if rest.as_os_str().is_empty() {
                home
            } else {
                home.join(rest)
            }
        }
        Err(_) => raw.to_path_buf(),
    };

    if expanded.is_absolute() {
        Ok(expanded)
    } else {
        env::current_dir()
            .map(|cwd| cwd.join(expanded))
            .map_err(|e| PathError::CurrentDirError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_append_photoprism_component() {
        let dirs = PlatformDirs::under(Path::new("/home/ada"));

        assert_eq!(
            dirs.default_pictures_root(),
            PathBuf::from("/home/ada/Pictures/PhotoPrism")
        );
        assert_eq!(
            dirs.default_data_root(),
            PathBuf::from("/home/ada/Application Support/PhotoPrism")
        );
        assert_eq!(dirs.log_dir(), PathBuf::from("/home/ada/Logs/PhotoPrism"));
    }

    #[test]
    fn normalize_rejects_empty_path() {
        let err = normalize_user_path(Path::new("")).unwrap_err();
        assert!(matches!(err, PathError::EmptyPath));
    }

    #[test]
    fn normalize_keeps_absolute_path() {
        let path = normalize_user_path(Path::new("/srv/photos")).unwrap();
        assert_eq!(path, PathBuf::from("/srv/photos"));
    }

    #[test]
    fn normalize_makes_relative_path_absolute() {
        let path = normalize_user_path(Path::new("photos")).unwrap();
        assert!(path.is_absolute());
        assert!(path.ends_with("photos"));
    }

    #[test]
    fn normalize_expands_tilde() {
        let Some(home) = dirs::home_dir() else {
            return;
        };

        assert_eq!(normalize_user_path(Path::new("~")).unwrap(), home);
        assert_eq!(
            normalize_user_path(Path::new("~/Pictures")).unwrap(),
            home.join("Pictures")
        );
    }
}
