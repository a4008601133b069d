//! Child process environment construction.
//!
//! `build_environment` is a pure function: it takes the base environment as
//! an iterator instead of reading `std::env`, so the exact variables a server
//! run receives can be asserted without spawning anything.

use std::collections::BTreeMap;
use std::ffi::{OsStr, OsString};
use std::path::Path;

use crate::paths::{BundleLayout, ResolvedPaths};

pub const ORIGINALS_PATH_VAR: &str = "PHOTOPRISM_ORIGINALS_PATH";
pub const IMPORT_PATH_VAR: &str = "PHOTOPRISM_IMPORT_PATH";
pub const STORAGE_PATH_VAR: &str = "PHOTOPRISM_STORAGE_PATH";
pub const CONFIG_PATH_VAR: &str = "PHOTOPRISM_CONFIG_PATH";
pub const ASSETS_PATH_VAR: &str = "PHOTOPRISM_ASSETS_PATH";
pub const ADMIN_USER_VAR: &str = "PHOTOPRISM_ADMIN_USER";
pub const ADMIN_PASSWORD_VAR: &str = "PHOTOPRISM_ADMIN_PASSWORD";
pub const PATH_VAR: &str = "PATH";

/// Variable the dynamic loader searches for shared libraries.
#[cfg(target_os = "macos")]
pub const LIBRARY_PATH_VAR: &str = "DYLD_LIBRARY_PATH";
#[cfg(windows)]
pub const LIBRARY_PATH_VAR: &str = "PATH";
#[cfg(not(any(target_os = "macos", windows)))]
pub const LIBRARY_PATH_VAR: &str = "LD_LIBRARY_PATH";

#[cfg(windows)]
const SEARCH_PATH_SEPARATOR: &str = ";";
#[cfg(not(windows))]
const SEARCH_PATH_SEPARATOR: &str = ":";

/// Initial administrator account handed to the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminCredentials {
    pub username: String,
    pub password: String,
}

impl Default for AdminCredentials {
    fn default() -> Self {
        Self {
            username: "admin".to_string(),
            password: "photoprism".to_string(),
        }
    }
}

/// Complete environment for a server process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerEnvironment {
    vars: BTreeMap<OsString, OsString>,
}

impl ServerEnvironment {
    /// Look up a variable.
    pub fn get(&self, key: impl AsRef<OsStr>) -> Option<&OsStr> {
        self.vars.get(key.as_ref()).map(OsString::as_os_str)
    }

    /// Set or replace a variable.
    pub fn set(&mut self, key: impl Into<OsString>, value: impl Into<OsString>) {
        self.vars.insert(key.into(), value.into());
    }

    /// Iterate over all variables in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&OsStr, &OsStr)> {
        self.vars.iter().map(|(k, v)| (k.as_os_str(), v.as_os_str()))
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Prefix a search-path variable with `dir`, keeping any existing entries after it.
    fn prepend_search_path(&mut self, key: &str, dir: &Path) {
        let mut value = OsString::from(dir);
        if let Some(existing) = self.get(key).filter(|v| !v.is_empty()) {
            value.push(SEARCH_PATH_SEPARATOR);
            value.push(existing);
        }
        self.set(key, value);
    }
}

impl<K, V> FromIterator<(K, V)> for ServerEnvironment
where
    K: Into<OsString>,
    V: Into<OsString>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Build the environment for a server run.
///
/// Starts from `base` (normally the launcher's own environment) and overrides
/// the library paths, admin credentials and search paths. The library search
/// path is prefixed with the bundle's library directory and `PATH` with the
/// bundle's executable directory so co-installed tools are found first.
pub fn build_environment<I, K, V>(
    base: I,
    paths: &ResolvedPaths,
    bundle: &BundleLayout,
    admin: &AdminCredentials,
) -> ServerEnvironment
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<OsString>,
    V: Into<OsString>,
{
    let mut env: ServerEnvironment = base.into_iter().collect();

    env.set(ORIGINALS_PATH_VAR, &paths.originals_dir);
    env.set(IMPORT_PATH_VAR, &paths.import_dir);
    env.set(STORAGE_PATH_VAR, &paths.storage_dir);
    env.set(CONFIG_PATH_VAR, &paths.config_dir);
    env.set(ASSETS_PATH_VAR, &bundle.assets_dir);
    env.set(ADMIN_USER_VAR, &admin.username);
    env.set(ADMIN_PASSWORD_VAR, &admin.password);

    env.prepend_search_path(LIBRARY_PATH_VAR, &bundle.library_dir);
    env.prepend_search_path(PATH_VAR, &bundle.executable_dir);

    env
}
