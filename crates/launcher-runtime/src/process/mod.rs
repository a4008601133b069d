//! Server process management.
//!
//! # Structure
//!
//! - `ServerSupervisor` - Owns the server process slot and its transitions
//! - `ReadinessTimer` - Cancellable deferred "open web UI" action
//! - `LauncherEventBroadcaster` - Fans lifecycle events out to listeners
//! - `terminate_child` - SIGTERM → SIGKILL escalation for a spawned child

mod broadcaster;
mod readiness;
pub mod shutdown;
mod supervisor;

// Re-export commonly used types
pub use broadcaster::LauncherEventBroadcaster;
pub use readiness::ReadinessTimer;
pub use shutdown::terminate_child;
pub use supervisor::{DEFAULT_WEB_UI_URL, ProcessInfo, ServerSupervisor, SupervisorConfig};
