//! View State Store
//!
//! Sole owner of [`DashboardState`] mutation. Mutations are serialized and
//! applied atomically; readers see either the state before or after a
//! mutation, never a partial one.

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::watch;

use super::state::{DashboardState, StatePatch};

/// A requested change to the dashboard state
pub enum Mutation {
    /// Replace the named fields
    Replace(StatePatch),
    /// Compute the patch from the state current at apply time
    Derive(Box<dyn FnOnce(&DashboardState) -> StatePatch + Send>),
}

impl fmt::Debug for Mutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mutation::Replace(patch) => f.debug_tuple("Replace").field(patch).finish(),
            Mutation::Derive(_) => f.write_str("Derive(..)"),
        }
    }
}

/// Reacts to applied mutations
///
/// Observers run after the mutation is visible to readers. They may read
/// the store but must not mutate it.
pub trait StateObserver: Send + Sync {
    fn on_change(&self, previous: &DashboardState, current: &DashboardState);
}

/// Shared dashboard state store
pub struct Store {
    state_tx: watch::Sender<DashboardState>,
    /// Held for the whole of each mutation, which serializes writers
    observers: Mutex<Vec<Arc<dyn StateObserver>>>,
}

impl Store {
    /// Create a store holding the initial (loading) state
    pub fn new() -> Self {
        Self::with_state(DashboardState::new())
    }

    pub fn with_state(state: DashboardState) -> Self {
        let (state_tx, _) = watch::channel(state);
        Self {
            state_tx,
            observers: Mutex::new(Vec::new()),
        }
    }

    /// Snapshot of the current state
    pub fn state(&self) -> DashboardState {
        self.state_tx.borrow().clone()
    }

    /// Read the current state without cloning it
    pub fn read<R>(&self, f: impl FnOnce(&DashboardState) -> R) -> R {
        f(&self.state_tx.borrow())
    }

    /// Receiver notified after every applied mutation
    pub fn subscribe(&self) -> watch::Receiver<DashboardState> {
        self.state_tx.subscribe()
    }

    /// Register an observer for subsequent mutations
    pub fn observe(&self, observer: Arc<dyn StateObserver>) {
        self.observers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(observer);
    }

    /// Replace the named fields
    pub fn set(&self, patch: StatePatch) -> bool {
        self.apply(Mutation::Replace(patch))
    }

    /// Derive a patch from the latest state and apply it
    pub fn update<F>(&self, f: F) -> bool
    where
        F: FnOnce(&DashboardState) -> StatePatch + Send + 'static,
    {
        self.apply(Mutation::Derive(Box::new(f)))
    }

    /// Apply a mutation. Returns whether the state changed.
    pub fn apply(&self, mutation: Mutation) -> bool {
        let observers = self.observers.lock().unwrap_or_else(PoisonError::into_inner);

        let mut previous = None;
        let changed = self.state_tx.send_if_modified(|state| {
            let patch = match mutation {
                Mutation::Replace(patch) => patch,
                Mutation::Derive(derive) => derive(state),
            };
            if patch.is_empty() {
                return false;
            }

            let before = state.clone();
            patch.apply_to(state);
            if *state == before {
                return false;
            }
            previous = Some(before);
            true
        });

        if let Some(previous) = previous {
            let current = self.state();
            tracing::trace!(
                loading = current.loading,
                focus = %current.focus,
                appointments = current.appointments.len(),
                "State updated"
            );
            for observer in observers.iter() {
                observer.on_change(&previous, &current);
            }
        }

        changed
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Appointment, Focus};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingObserver {
        calls: AtomicUsize,
        focus_changes: AtomicUsize,
    }

    impl StateObserver for CountingObserver {
        fn on_change(&self, previous: &DashboardState, current: &DashboardState) {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if previous.focus != current.focus {
                self.focus_changes.fetch_add(1, Ordering::SeqCst);
            }
        }
    }

    #[test]
    fn test_new_store_is_loading() {
        let store = Store::new();
        let state = store.state();
        assert!(state.loading);
        assert!(state.days.is_empty());
        assert!(state.appointments.is_empty());
        assert!(state.interviewers.is_empty());
    }

    #[test]
    fn test_set_replaces_fields() {
        let store = Store::new();
        assert!(store.set(StatePatch::new().loading(false).focus(Focus::panel(2))));

        let state = store.state();
        assert!(!state.loading);
        assert_eq!(state.focus, Focus::panel(2));
    }

    #[test]
    fn test_update_sees_latest_state() {
        let store = Store::new();
        store.set(StatePatch::new().focus(Focus::panel(1)));

        store.update(|prev| StatePatch::new().focus(prev.focus.toggled(4)));
        assert_eq!(store.state().focus, Focus::none());
    }

    #[test]
    fn test_no_op_does_not_notify() {
        let store = Store::new();
        let observer = Arc::new(CountingObserver {
            calls: AtomicUsize::new(0),
            focus_changes: AtomicUsize::new(0),
        });
        store.observe(observer.clone());

        assert!(!store.set(StatePatch::new()));
        assert!(!store.set(StatePatch::new().loading(true)));
        assert_eq!(observer.calls.load(Ordering::SeqCst), 0);

        assert!(store.set(StatePatch::new().focus(Focus::panel(3))));
        assert!(store.set(StatePatch::new().loading(false)));
        assert_eq!(observer.calls.load(Ordering::SeqCst), 2);
        assert_eq!(observer.focus_changes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_subscribers_see_changes() {
        let store = Store::new();
        let mut rx = store.subscribe();

        store.set(StatePatch::new().appointment(Appointment::new(7, "3pm")));
        rx.changed().await.unwrap();
        assert!(rx.borrow().appointments.contains_key(&7));
    }

    #[tokio::test]
    async fn test_concurrent_updates_are_not_lost() {
        let store = Arc::new(Store::new());
        let mut handles = Vec::new();

        for id in 0..32u32 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store.update(move |prev| {
                    let mut appointments = prev.appointments.clone();
                    appointments.insert(id, Appointment::new(id, "12pm"));
                    StatePatch::new().appointments(appointments)
                });
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(store.state().appointments.len(), 32);
    }
}
