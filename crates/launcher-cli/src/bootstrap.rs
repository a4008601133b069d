//! CLI bootstrap - the composition root.
//!
//! This module is the ONLY place where infrastructure is wired together
//! for the CLI adapter. All concrete implementations are instantiated here:
//! - JSON settings store (via launcher-runtime)
//! - Configuration service (via launcher-core)
//! - Event broadcaster and server supervisor (via launcher-runtime)

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use tracing::debug;

use launcher_core::paths::{BundleLayout, PlatformDirs, settings_file_path};
use launcher_core::{ConfigService, LauncherEventEmitter, SettingsStore};
use launcher_runtime::{
    JsonSettingsStore, LauncherEventBroadcaster, ServerSupervisor, SupervisorConfig,
};

/// Bootstrap configuration for the CLI.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Location of the persisted launcher settings.
    pub settings_file: PathBuf,
    /// Platform directories defaults are derived from.
    pub platform: PlatformDirs,
    /// Where the server executable and its resources live.
    pub bundle: BundleLayout,
    /// Supervisor timings and server constants.
    pub supervisor: SupervisorConfig,
}

impl CliConfig {
    /// Create config with platform paths, honouring command-line overrides.
    pub fn with_defaults(settings: Option<PathBuf>, bundle_dir: Option<PathBuf>) -> Result<Self> {
        let settings_file = match settings {
            Some(path) => path,
            None => settings_file_path()?,
        };
        let bundle = match bundle_dir {
            Some(dir) => BundleLayout::from_executable_dir(dir),
            None => BundleLayout::detect()?,
        };

        Ok(Self {
            settings_file,
            platform: PlatformDirs::detect()?,
            bundle,
            supervisor: SupervisorConfig::default(),
        })
    }
}

/// Fully composed application context for CLI commands.
pub struct CliContext {
    /// Configuration service over the settings file.
    pub config: Arc<ConfigService>,
    /// The server supervisor.
    pub supervisor: ServerSupervisor,
    /// Broadcaster the supervisor emits into.
    pub events: Arc<LauncherEventBroadcaster>,
    /// Location of the persisted launcher settings.
    pub settings_file: PathBuf,
}

impl CliContext {
    /// Access the configuration service.
    pub fn config(&self) -> &ConfigService {
        &self.config
    }

    /// Access the supervisor.
    pub const fn supervisor(&self) -> &ServerSupervisor {
        &self.supervisor
    }

    /// Access the settings file path.
    pub fn settings_file(&self) -> &Path {
        &self.settings_file
    }
}

/// Bootstrap the CLI application.
///
/// This is the composition root. It:
/// 1. Creates the JSON settings store
/// 2. Creates the configuration service
/// 3. Wires the supervisor to an event broadcaster
pub fn bootstrap(config: CliConfig) -> CliContext {
    debug!(
        settings = %config.settings_file.display(),
        bundle = %config.bundle.executable_dir.display(),
        "Bootstrapping launcher"
    );

    let store: Arc<dyn SettingsStore> = Arc::new(JsonSettingsStore::new(&config.settings_file));
    let service = Arc::new(ConfigService::new(store, config.platform));
    let events = Arc::new(LauncherEventBroadcaster::new());
    let emitter: Arc<dyn LauncherEventEmitter> = events.clone();
    let supervisor = ServerSupervisor::new(
        Arc::clone(&service),
        config.bundle,
        config.supervisor,
        emitter,
    );

    CliContext {
        config: service,
        supervisor,
        events,
        settings_file: config.settings_file,
    }
}
