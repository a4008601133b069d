//! Server lifecycle events for the UI bridge.
//!
//! These events are emitted by the supervisor and consumed by whatever
//! presents the launcher (a window, a tray icon, the CLI session). The
//! presenter should treat them as the sole source of truth for server state.

use std::fmt;
use std::process::ExitStatus;

use serde::{Deserialize, Serialize};

/// Server lifecycle state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServerState {
    /// No server process is tracked.
    #[default]
    Stopped,
    /// A server process was spawned and has not been observed to exit.
    Running,
}

impl ServerState {
    pub const fn is_running(self) -> bool {
        matches!(self, Self::Running)
    }
}

impl fmt::Display for ServerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stopped => write!(f, "Stopped"),
            Self::Running => write!(f, "Running"),
        }
    }
}

/// How a server process ended.
///
/// The state machine does not distinguish crashes from clean exits; this
/// summary lets presenters do so if they want to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExitSummary {
    /// Exit code, if the process exited normally.
    pub code: Option<i32>,
    /// Terminating signal, if the process was killed by one (Unix only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signal: Option<i32>,
    /// Whether the exit followed a stop request from the launcher.
    pub requested: bool,
}

impl ExitSummary {
    /// Summarise an OS exit status.
    pub fn from_status(status: ExitStatus, requested: bool) -> Self {
        #[cfg(unix)]
        let signal = {
            use std::os::unix::process::ExitStatusExt;
            status.signal()
        };
        #[cfg(not(unix))]
        let signal = None;

        Self {
            code: status.code(),
            signal,
            requested,
        }
    }

    /// Exit code zero.
    pub const fn is_clean(&self) -> bool {
        matches!(self.code, Some(0))
    }

    /// Neither clean nor requested by the launcher.
    pub const fn is_unexpected(&self) -> bool {
        !self.requested && !self.is_clean()
    }
}

impl fmt::Display for ExitSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.code, self.signal) {
            (Some(code), _) => write!(f, "exit code {code}"),
            (None, Some(signal)) => write!(f, "signal {signal}"),
            (None, None) => write!(f, "unknown exit status"),
        }
    }
}

/// Launcher event payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum LauncherEvent {
    /// A server process was spawned.
    Running { pid: Option<u32> },

    /// The tracked server process is gone.
    ///
    /// `exit` is `None` when the launcher released the process without
    /// observing its exit status.
    Stopped { exit: Option<ExitSummary> },

    /// The readiness delay elapsed with the server still running.
    OpenWebUi { url: String },

    /// A start attempt failed with a user-actionable error.
    StartFailed { message: String },
}

impl LauncherEvent {
    /// The server state this event reports, if it is a state change.
    pub const fn state(&self) -> Option<ServerState> {
        match self {
            Self::Running { .. } => Some(ServerState::Running),
            Self::Stopped { .. } => Some(ServerState::Stopped),
            Self::OpenWebUi { .. } | Self::StartFailed { .. } => None,
        }
    }
}
