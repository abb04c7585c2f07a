//! Focus Persistence Bridge
//!
//! Seeds the store's focus from local storage at startup and writes it back
//! whenever it changes. Storage is a cache of the last known value, so any
//! read problem degrades to no focus instead of failing.

use std::sync::Arc;

use super::error::StorageResult;
use super::storage::LocalStorage;
use crate::model::Focus;
use crate::store::{DashboardState, StateObserver, StatePatch, Store};

/// Local storage key holding the JSON-serialized focus
pub const FOCUS_KEY: &str = "focused";

/// Mirrors the dashboard focus into durable local storage
pub struct FocusBridge {
    storage: Arc<dyn LocalStorage>,
}

impl FocusBridge {
    pub fn new(storage: Arc<dyn LocalStorage>) -> Self {
        Self { storage }
    }

    /// Read the persisted focus
    ///
    /// Absent, unreadable or corrupt values yield [`Focus::none`].
    pub fn load(&self) -> Focus {
        let raw = match self.storage.get_item(FOCUS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Focus::none(),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read persisted focus");
                return Focus::none();
            }
        };

        match serde_json::from_str::<Focus>(&raw) {
            Ok(focus) => focus,
            Err(e) => {
                tracing::warn!(error = %e, value = %raw, "Ignoring invalid persisted focus");
                Focus::none()
            }
        }
    }

    /// Write `focus` to storage
    pub fn save(&self, focus: Focus) -> StorageResult<()> {
        let value = serde_json::to_string(&focus)?;
        self.storage.set_item(FOCUS_KEY, &value)
    }

    /// Load the persisted focus into the store
    pub fn seed(&self, store: &Store) -> Focus {
        let focus = self.load();
        store.set(StatePatch::new().focus(focus));
        tracing::debug!(%focus, "Seeded focus from local storage");
        focus
    }
}

impl StateObserver for FocusBridge {
    fn on_change(&self, previous: &DashboardState, current: &DashboardState) {
        if previous.focus == current.focus {
            return;
        }

        if let Err(e) = self.save(current.focus) {
            tracing::warn!(error = %e, focus = %current.focus, "Failed to persist focus");
        }
    }
}
