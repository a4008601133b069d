//! Event emitter trait for the UI bridge.
//!
//! This module defines the abstraction for delivering launcher events.
//! Implementations handle transport details (channels, window messages, etc.).

use crate::events::LauncherEvent;

/// Trait for emitting launcher events.
///
/// # Implementations
///
/// - `NoopEmitter` - For tests and contexts without a listener
/// - Adapter-specific implementations (broadcast channel, GUI event loop, etc.)
pub trait LauncherEventEmitter: Send + Sync {
    /// Emit a launcher event.
    ///
    /// Called from the supervisor while it holds its state lock, so
    /// implementations must not block.
    fn emit(&self, event: LauncherEvent);
}

/// A no-op event emitter for tests and contexts without a listener.
#[derive(Debug, Clone, Default)]
pub struct NoopEmitter;

impl NoopEmitter {
    /// Create a new no-op emitter.
    pub const fn new() -> Self {
        Self
    }
}

impl LauncherEventEmitter for NoopEmitter {
    fn emit(&self, _event: LauncherEvent) {
        // Intentionally do nothing
    }
}
