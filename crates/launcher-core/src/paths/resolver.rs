//! Pure path resolver.
//!
//! Derives every location the supervised server and the launcher touch from
//! the two configurable roots. No I/O happens here: callers recompute a
//! `ResolvedPaths` whenever the configuration changes instead of caching one.

use std::fmt;
use std::path::{Path, PathBuf};

use super::platform::PlatformDirs;
use crate::settings::Configuration;

/// Sub-directory of the pictures root holding the permanent library.
pub const ORIGINALS_DIR: &str = "originals";
/// Sub-directory of the pictures root used as the import staging area.
pub const IMPORT_DIR: &str = "import";
/// Sub-directory of the data root holding the server's working data.
pub const STORAGE_DIR: &str = "storage";
/// Sub-directory of the storage directory holding server configuration.
pub const CONFIG_DIR: &str = "config";
/// Name of the server log file inside the log directory.
pub const LOG_FILE_NAME: &str = "photoprism.log";

/// All resolved paths captured in a single struct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPaths {
    /// User-configured pictures root.
    pub pictures_root: PathBuf,
    /// `<pictures root>/originals`
    pub originals_dir: PathBuf,
    /// `<pictures root>/import`
    pub import_dir: PathBuf,
    /// User-configured data root.
    pub data_root: PathBuf,
    /// `<data root>/storage`
    pub storage_dir: PathBuf,
    /// `<data root>/storage/config`
    pub config_dir: PathBuf,
    /// `<platform logs>/PhotoPrism`, independent of the data root.
    pub log_dir: PathBuf,
    /// `<log dir>/photoprism.log`
    pub log_file: PathBuf,
}

impl ResolvedPaths {
    /// Resolve all paths for a configuration.
    pub fn resolve(config: &Configuration, platform: &PlatformDirs) -> Self {
        let pictures_root = config.pictures_root.clone();
        let data_root = config.data_root.clone();
        let storage_dir = data_root.join(STORAGE_DIR);
        let log_dir = platform.log_dir();

        Self {
            originals_dir: pictures_root.join(ORIGINALS_DIR),
            import_dir: pictures_root.join(IMPORT_DIR),
            config_dir: storage_dir.join(CONFIG_DIR),
            log_file: log_dir.join(LOG_FILE_NAME),
            pictures_root,
            data_root,
            storage_dir,
            log_dir,
        }
    }

    /// Every directory the provisioner must create, parents first.
    pub fn directories(&self) -> [&Path; 7] {
        [
            self.pictures_root.as_path(),
            self.originals_dir.as_path(),
            self.import_dir.as_path(),
            self.data_root.as_path(),
            self.storage_dir.as_path(),
            self.config_dir.as_path(),
            self.log_dir.as_path(),
        ]
    }
}

impl fmt::Display for ResolvedPaths {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "pictures_root = {}", self.pictures_root.display())?;
        writeln!(f, "originals_dir = {}", self.originals_dir.display())?;
        writeln!(f, "import_dir = {}", self.import_dir.display())?;
        writeln!(f, "data_root = {}", self.data_root.display())?;
        writeln!(f, "storage_dir = {}", self.storage_dir.display())?;
        writeln!(f, "config_dir = {}", self.config_dir.display())?;
        writeln!(f, "log_dir = {}", self.log_dir.display())?;
        write!(f, "log_file = {}", self.log_file.display())
    }
}
