//! Configuration service - orchestrates launcher settings operations.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::paths::{PlatformDirs, ResolvedPaths, normalize_user_path, provision};
use crate::ports::{CoreError, SettingsStore};
use crate::settings::{Configuration, StoredSettings};

/// Service for reading and changing the launcher configuration.
pub struct ConfigService {
    store: Arc<dyn SettingsStore>,
    platform: PlatformDirs,
}

impl ConfigService {
    /// Create a new configuration service.
    pub fn new(store: Arc<dyn SettingsStore>, platform: PlatformDirs) -> Self {
        Self { store, platform }
    }

    /// Platform directories defaults are derived from.
    pub const fn platform(&self) -> &PlatformDirs {
        &self.platform
    }

    /// Load the configuration, writing defaults for any missing root.
    ///
    /// Called on launcher startup and before every server start. The store
    /// is only written when a default was actually filled in.
    pub async fn load_or_init(&self) -> Result<Configuration, CoreError> {
        let mut stored = self.store.load().await?;

        if stored.fill_defaults(&self.platform) {
            info!("Initializing missing launcher settings with defaults");
            self.store.save(&stored).await?;
        }

        Ok(stored.to_configuration(&self.platform))
    }

    /// Current configuration without writing anything.
    pub async fn get_configuration(&self) -> Result<Configuration, CoreError> {
        let stored = self.store.load().await?;
        Ok(stored.to_configuration(&self.platform))
    }

    /// Change the pictures root and create its directory tree.
    ///
    /// Takes effect on the next server start.
    pub async fn set_pictures_root(&self, path: &Path) -> Result<Configuration, CoreError> {
        let path = normalize_user_path(path)?;
        let config = self.update(|stored| stored.pictures_folder = Some(path)).await?;
        self.prepare_directories(&config);
        Ok(config)
    }

    /// Change the data root and create its directory tree.
    ///
    /// Takes effect on the next server start.
    pub async fn set_data_root(&self, path: &Path) -> Result<Configuration, CoreError> {
        let path = normalize_user_path(path)?;
        let config = self.update(|stored| stored.data_folder = Some(path)).await?;
        self.prepare_directories(&config);
        Ok(config)
    }

    /// Change whether the server starts when the launcher opens.
    ///
    /// Only the flag is written; no directories are touched.
    pub async fn set_auto_start(&self, enabled: bool) -> Result<Configuration, CoreError> {
        self.update(|stored| stored.start_server_on_launch = Some(enabled))
            .await
    }

    /// Resolve every derived location for `config`.
    pub fn resolve_paths(&self, config: &Configuration) -> ResolvedPaths {
        ResolvedPaths::resolve(config, &self.platform)
    }

    async fn update<F>(&self, apply: F) -> Result<Configuration, CoreError>
    where
        F: FnOnce(&mut StoredSettings),
    {
        let mut stored = self.store.load().await?;
        stored.fill_defaults(&self.platform);
        apply(&mut stored);
        self.store.save(&stored).await?;

        let config = stored.to_configuration(&self.platform);
        debug!(
            pictures_root = %config.pictures_root.display(),
            data_root = %config.data_root.display(),
            auto_start = config.auto_start_on_launch,
            "Saved launcher settings"
        );

        Ok(config)
    }

    /// Best-effort provisioning after a root change.
    fn prepare_directories(&self, config: &Configuration) {
        let report = provision(&self.resolve_paths(config));
        if report.is_complete() {
            return;
        }
        for failure in &report.failures {
            warn!(error = %failure, "Could not prepare directory");
        }
    }
}
