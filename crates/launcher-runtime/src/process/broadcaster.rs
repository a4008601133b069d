//! Launcher event broadcasting.
//!
//! Fans supervisor events out to any number of listeners (the CLI session,
//! a tray icon, tests) over a tokio broadcast channel.

use tokio::sync::broadcast;
use tracing::debug;

use launcher_core::{LauncherEvent, LauncherEventEmitter};

/// Broadcast channel capacity for launcher events
const CHANNEL_CAPACITY: usize = 64;

/// Broadcaster for launcher lifecycle events
#[derive(Debug)]
pub struct LauncherEventBroadcaster {
    sender: broadcast::Sender<LauncherEvent>,
}

impl LauncherEventBroadcaster {
    /// Create a new broadcaster
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { sender }
    }

    /// Subscribe to launcher events
    pub fn subscribe(&self) -> broadcast::Receiver<LauncherEvent> {
        self.sender.subscribe()
    }
}

impl Default for LauncherEventBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}

impl LauncherEventEmitter for LauncherEventBroadcaster {
    fn emit(&self, event: LauncherEvent) {
        // Nobody listening is normal for headless commands
        if self.sender.receiver_count() > 0 {
            debug!(?event, "Broadcasting launcher event");
            let _ = self.sender.send(event);
        }
    }
}
