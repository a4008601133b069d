//! Installed bundle layout.
//!
//! The server executable, its shared libraries and its web assets ship next
//! to the launcher. On macOS they live inside the `.app` bundle
//! (`Contents/MacOS`, `Contents/Frameworks`, `Contents/Resources/assets`);
//! elsewhere they sit beside the launcher binary.

use std::env;
use std::fmt;
use std::path::{Path, PathBuf};

use super::error::PathError;

/// File name of the bundled server executable (without platform suffix).
pub const SERVER_BINARY_NAME: &str = "photoprism-server";

/// Environment variable overriding the bundle's executable directory.
pub const BUNDLE_DIR_ENV: &str = "PHOTOPRISM_LAUNCHER_BUNDLE_DIR";

/// Locations inside the launcher installation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleLayout {
    /// Directory containing the launcher and the server executable.
    pub executable_dir: PathBuf,
    /// Directory with bundled shared libraries.
    pub library_dir: PathBuf,
    /// Directory with the server's static assets.
    pub assets_dir: PathBuf,
}

impl BundleLayout {
    /// Derive the layout from the directory holding the executables.
    pub fn from_executable_dir(executable_dir: impl Into<PathBuf>) -> Self {
        let executable_dir = executable_dir.into();
        let (library_dir, assets_dir) = sibling_dirs(&executable_dir);

        Self {
            executable_dir,
            library_dir,
            assets_dir,
        }
    }

    /// Detect the layout of the running launcher.
    ///
    /// Resolution order:
    /// 1. `PHOTOPRISM_LAUNCHER_BUNDLE_DIR` environment variable
    /// 2. Directory of the current executable
    pub fn detect() -> Result<Self, PathError> {
        if let Some(dir) = env::var_os(BUNDLE_DIR_ENV).filter(|d| !d.is_empty()) {
            return Ok(Self::from_executable_dir(dir));
        }

        let exe = env::current_exe().map_err(|e| PathError::NoExecutableDir(e.to_string()))?;
        let dir = exe.parent().ok_or_else(|| {
            PathError::NoExecutableDir(format!("{} has no parent directory", exe.display()))
        })?;

        Ok(Self::from_executable_dir(dir))
    }

    /// Expected location of the server executable.
    pub fn server_binary(&self) -> PathBuf {
        self.executable_dir
            .join(format!("{SERVER_BINARY_NAME}{}", env::consts::EXE_SUFFIX))
    }
}

#[cfg(target_os = "macos")]
fn sibling_dirs(executable_dir: &Path) -> (PathBuf, PathBuf) {
    // Contents/MacOS -> Contents
    let contents = executable_dir.parent().unwrap_or(executable_dir);
    (
        contents.join("Frameworks"),
        contents.join("Resources").join("assets"),
    )
}

#[cfg(not(target_os = "macos"))]
fn sibling_dirs(executable_dir: &Path) -> (PathBuf, PathBuf) {
    (executable_dir.join("lib"), executable_dir.join("assets"))
}

impl fmt::Display for BundleLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "executable_dir = {}", self.executable_dir.display())?;
        writeln!(f, "server_binary = {}", self.server_binary().display())?;
        writeln!(f, "library_dir = {}", self.library_dir.display())?;
        write!(f, "assets_dir = {}", self.assets_dir.display())
    }
}
