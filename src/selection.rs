//! Selection Controller
//!
//! Routes "user selected panel X" into a focus toggle evaluated against the
//! latest state at apply time.

use crate::model::{Focus, PanelId};
use crate::store::{StatePatch, Store};

/// Toggle focus on `target`. Returns the focus after the toggle.
///
/// Unset focus becomes `target`; any set focus (including a different
/// panel) is cleared.
pub fn select_panel(store: &Store, target: PanelId) -> Focus {
    store.update(move |prev| StatePatch::new().focus(prev.focus.toggled(target)));

    let focus = store.read(|state| state.focus);
    tracing::debug!(panel = target, %focus, "Panel selected");
    focus
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_from_none_focuses() {
        let store = Store::new();
        assert_eq!(select_panel(&store, 1), Focus::panel(1));
        assert_eq!(store.state().focus, Focus::panel(1));
    }

    #[test]
    fn test_select_same_panel_twice_clears() {
        let store = Store::new();
        select_panel(&store, 2);
        assert_eq!(select_panel(&store, 2), Focus::none());
    }

    #[test]
    fn test_select_different_panel_clears() {
        let store = Store::new();
        select_panel(&store, 1);
        assert_eq!(select_panel(&store, 3), Focus::none());
        assert_eq!(store.state().focus, Focus::none());
    }

    #[test]
    fn test_select_after_clear_focuses_again() {
        let store = Store::new();
        select_panel(&store, 1);
        select_panel(&store, 4);
        assert_eq!(select_panel(&store, 4), Focus::panel(4));
    }
}
