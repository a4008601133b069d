//! Common test utilities.
//!
//! Builds a throwaway launcher installation in a temp directory: a fake
//! `photoprism-server` shell script in the bundle, both roots configured
//! below the temp dir, and a supervisor wired to a broadcaster.

#![allow(dead_code)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use launcher_core::{
    BundleLayout, ConfigService, LauncherEvent, MemorySettingsStore, PlatformDirs, ServerState,
    StoredSettings,
};
use launcher_runtime::{LauncherEventBroadcaster, ServerSupervisor, SupervisorConfig};
use tempfile::TempDir;
use tokio::sync::broadcast;
use tokio::time::{Instant, sleep, timeout};

/// Behaviour of the fake server executable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FakeServer {
    /// No executable in the bundle.
    Missing,
    /// Runs until its `stop` subcommand kills it.
    Cooperative,
    /// Exits with code 3 right after starting.
    ExitsImmediately,
    /// `stop` subcommand never returns and does not stop the server.
    HangingStop,
    /// Ignores SIGTERM; `stop` does nothing.
    IgnoresTerm,
    /// Present but without execute permission.
    NotExecutable,
}

impl FakeServer {
    fn script(self) -> Option<String> {
        let start = match self {
            Self::Missing => return None,
            Self::Cooperative | Self::HangingStop => {
                "echo $$ > \"$PHOTOPRISM_STORAGE_PATH/server.pid\"\n    exec sleep 30"
            }
            Self::ExitsImmediately => "echo 'fatal: no database'\n    exit 3",
            Self::IgnoresTerm => "trap '' TERM\n    exec sleep 30",
            Self::NotExecutable => "exit 0",
        };
        let stop = match self {
            Self::Cooperative => "kill \"$(cat \"$PHOTOPRISM_STORAGE_PATH/server.pid\")\"",
            Self::HangingStop => "exec sleep 30",
            _ => "true",
        };

        Some(format!(
            r#"#!/bin/sh
case "$1" in
  start)
    echo started >> "$PHOTOPRISM_STORAGE_PATH/starts"
    env > "$PHOTOPRISM_STORAGE_PATH/env"
    echo "fake server listening"
    {start}
    ;;
  stop)
    touch "$PHOTOPRISM_STORAGE_PATH/stop-called"
    echo "fake server stopping"
    {stop}
    ;;
esac
"#
        ))
    }
}

/// Supervisor timings short enough for tests.
pub fn fast_config() -> SupervisorConfig {
    SupervisorConfig {
        readiness_delay: Duration::from_secs(30),
        graceful_stop_timeout: Duration::from_secs(2),
        exit_grace: Duration::from_secs(2),
        terminate_grace: Duration::from_millis(500),
        ..SupervisorConfig::default()
    }
}

pub struct Fixture {
    pub temp: TempDir,
    pub supervisor: ServerSupervisor,
    pub events: broadcast::Receiver<LauncherEvent>,
    pub pictures_root: PathBuf,
    pub data_root: PathBuf,
    pub bundle: BundleLayout,
}

impl Fixture {
    pub fn new(server: FakeServer) -> Self {
        Self::with_config(server, fast_config())
    }

    pub fn with_config(server: FakeServer, options: SupervisorConfig) -> Self {
        let temp = tempfile::tempdir().unwrap();
        let pictures_root = temp.path().join("pics");
        let data_root = temp.path().join("data");

        let bundle_dir = temp.path().join("bundle");
        fs::create_dir_all(&bundle_dir).unwrap();
        let bundle = BundleLayout::from_executable_dir(&bundle_dir);
        if let Some(script) = server.script() {
            let mode = if server == FakeServer::NotExecutable { 0o644 } else { 0o755 };
            write_script(&bundle.server_binary(), &script, mode);
        }

        let store = Arc::new(MemorySettingsStore::new(StoredSettings {
            pictures_folder: Some(pictures_root.clone()),
            data_folder: Some(data_root.clone()),
            start_server_on_launch: None,
        }));
        let config = Arc::new(ConfigService::new(store, PlatformDirs::under(temp.path())));

        let broadcaster = Arc::new(LauncherEventBroadcaster::new());
        let events = broadcaster.subscribe();
        let supervisor = ServerSupervisor::new(config, bundle.clone(), options, broadcaster);

        Self {
            temp,
            supervisor,
            events,
            pictures_root,
            data_root,
            bundle,
        }
    }

    pub fn storage_file(&self, name: &str) -> PathBuf {
        self.data_root.join("storage").join(name)
    }

    pub fn log_file(&self) -> PathBuf {
        self.temp.path().join("Logs/PhotoPrism/photoprism.log")
    }

    /// Number of times the fake server's `start` branch ran.
    pub fn start_count(&self) -> usize {
        fs::read_to_string(self.storage_file("starts"))
            .map(|s| s.lines().count())
            .unwrap_or(0)
    }

    /// Next event, failing the test if none arrives within five seconds.
    pub async fn next_event(&mut self) -> LauncherEvent {
        timeout(Duration::from_secs(5), self.events.recv())
            .await
            .expect("timed out waiting for launcher event")
            .expect("event channel closed")
    }

    /// Events already delivered, without waiting.
    pub fn drain_events(&mut self) -> Vec<LauncherEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.events.try_recv() {
            events.push(event);
        }
        events
    }

    /// Poll until the supervisor reports `state`.
    pub async fn wait_for_state(&self, state: ServerState) -> bool {
        let deadline = Instant::now() + Duration::from_secs(5);
        while Instant::now() < deadline {
            if self.supervisor.status() == state {
                return true;
            }
            sleep(Duration::from_millis(20)).await;
        }
        false
    }
}

/// Poll until `path` exists and satisfies `check`.
pub async fn wait_for_file(path: &Path, check: impl Fn(&str) -> bool) -> bool {
    let deadline = Instant::now() + Duration::from_secs(5);
    while Instant::now() < deadline {
        if let Ok(content) = fs::read_to_string(path) {
            if check(&content) {
                return true;
            }
        }
        sleep(Duration::from_millis(20)).await;
    }
    false
}

fn write_script(path: &Path, content: &str, mode: u32) {
    fs::write(path, content).unwrap();
    fs::set_permissions(path, fs::Permissions::from_mode(mode)).unwrap();
}
