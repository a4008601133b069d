//! Settings store trait definition.
//!
//! This port defines the interface for launcher settings persistence.
//! Implementations handle all storage details internally.

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use super::StoreError;
use crate::settings::StoredSettings;

/// Store for the launcher's persisted settings.
///
/// # Design Rules
///
/// - Works with the domain `StoredSettings` type directly
/// - `load` returns empty settings when nothing has been stored yet
/// - Implementation handles serialization internally
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Load the stored settings.
    async fn load(&self) -> Result<StoredSettings, StoreError>;

    /// Replace the stored settings.
    async fn save(&self, settings: &StoredSettings) -> Result<(), StoreError>;
}

/// Process-local settings store.
///
/// Useful for tests and for sandboxed runs that must not touch the user's
/// real settings.
#[derive(Debug, Default)]
pub struct MemorySettingsStore {
    settings: Mutex<StoredSettings>,
}

impl MemorySettingsStore {
    pub fn new(settings: StoredSettings) -> Self {
        Self {
            settings: Mutex::new(settings),
        }
    }

    /// Current contents, bypassing the async interface.
    pub fn snapshot(&self) -> StoredSettings {
        self.settings
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl SettingsStore for MemorySettingsStore {
    async fn load(&self) -> Result<StoredSettings, StoreError> {
        Ok(self.snapshot())
    }

    async fn save(&self, settings: &StoredSettings) -> Result<(), StoreError> {
        *self
            .settings
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = settings.clone();
        Ok(())
    }
}
