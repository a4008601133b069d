//! OS-level adapters for the PhotoPrism launcher: process supervision, the
//! server log file and file-backed settings.
#![deny(unsafe_code)]

pub mod log_sink;
pub mod process;
pub mod settings_file;

pub use log_sink::{LogSink, START_MARKER, start_marker};
pub use process::{
    DEFAULT_WEB_UI_URL, LauncherEventBroadcaster, ProcessInfo, ReadinessTimer, ServerSupervisor,
    SupervisorConfig, terminate_child,
};
pub use settings_file::JsonSettingsStore;
