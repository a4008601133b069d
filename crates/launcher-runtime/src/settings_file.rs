//! JSON file implementation of the settings store.
//!
//! Format: a single JSON object using the launcher's preference keys.
//! ```text
//! {
//!   "PicturesFolder": "/Users/ada/Pictures/PhotoPrism",
//!   "DataFolder": "/Users/ada/Library/Application Support/PhotoPrism",
//!   "StartServerOnLaunch": true
//! }
//! ```

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use launcher_core::{SettingsStore, StoreError, StoredSettings};

/// Settings store backed by a JSON file.
#[derive(Debug, Clone)]
pub struct JsonSettingsStore {
    path: PathBuf,
}

impl JsonSettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

fn storage_error(path: &Path, err: &io::Error) -> StoreError {
    StoreError::Storage(format!("{}: {err}", path.display()))
}

#[async_trait]
impl SettingsStore for JsonSettingsStore {
    async fn load(&self) -> Result<StoredSettings, StoreError> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No settings file yet");
                return Ok(StoredSettings::default());
            }
            Err(e) => return Err(storage_error(&self.path, &e)),
        };

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(StoredSettings::default());
        }

        serde_json::from_slice(&bytes).map_err(|e| StoreError::Serialization(e.to_string()))
    }

    /// Write atomically using temp file + rename.
    async fn save(&self, settings: &StoredSettings) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| storage_error(parent, &e))?;
        }

        let mut content = serde_json::to_vec_pretty(settings)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        content.push(b'\n');

        let temp_path = self.temp_path();
        fs::write(&temp_path, content)
            .await
            .map_err(|e| storage_error(&temp_path, &e))?;
        fs::rename(&temp_path, &self.path)
            .await
            .map_err(|e| storage_error(&self.path, &e))?;

        debug!(path = %self.path.display(), "Saved launcher settings");
        Ok(())
    }
}
