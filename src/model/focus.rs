//! Panel focus selection

use serde::{Deserialize, Serialize};
use std::fmt;

/// Panel identifier
pub type PanelId = u32;

/// Which panel, if any, is shown exclusively
///
/// Serializes as the panel id or `null`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Focus(Option<PanelId>);

impl Focus {
    /// No panel focused; every panel is shown
    pub const fn none() -> Self {
        Self(None)
    }

    pub const fn panel(id: PanelId) -> Self {
        Self(Some(id))
    }

    pub fn is_set(&self) -> bool {
        self.0.is_some()
    }

    pub fn get(&self) -> Option<PanelId> {
        self.0
    }

    /// Whether a panel is visible under this focus
    pub fn shows(&self, id: PanelId) -> bool {
        self.0.map_or(true, |focused| focused == id)
    }

    /// Strict toggle: unset focuses `target`, any set focus clears.
    ///
    /// Selecting a different panel while one is focused clears focus
    /// instead of switching to it.
    pub fn toggled(self, target: PanelId) -> Self {
        match self.0 {
            None => Self::panel(target),
            Some(_) => Self::none(),
        }
    }
}

impl From<Option<PanelId>> for Focus {
    fn from(value: Option<PanelId>) -> Self {
        Self(value)
    }
}

impl fmt::Display for Focus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(id) => write!(f, "panel {}", id),
            None => write!(f, "none"),
        }
    }
}
