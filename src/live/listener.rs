//! Live Update Listener
//!
//! Background task owning the push-channel connection for a dashboard's
//! lifetime. Inbound messages are consumed one at a time and applied through
//! the store's functional-update path, so each sees the latest state.

use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use super::channel::PushConnector;
use super::messages::PushMessage;
use crate::store::Store;

/// Push-channel connection lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelState {
    Connecting,
    Open,
    Closed,
}

/// Spawns the push-channel listener
pub struct LiveUpdateListener;

impl LiveUpdateListener {
    /// Connect and start applying updates to `store`
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(connector: Arc<dyn PushConnector>, store: Arc<Store>) -> ListenerHandle {
        let cancel = CancellationToken::new();
        let (state_tx, state_rx) = watch::channel(ChannelState::Connecting);

        let task = tokio::spawn(run(connector, store, cancel.clone(), state_tx));

        ListenerHandle {
            cancel,
            state_rx,
            task: Some(task),
        }
    }
}

/// Owner-side handle of a running listener
///
/// Dropping the handle cancels the listener.
pub struct ListenerHandle {
    cancel: CancellationToken,
    state_rx: watch::Receiver<ChannelState>,
    task: Option<JoinHandle<()>>,
}

impl ListenerHandle {
    pub fn state(&self) -> ChannelState {
        *self.state_rx.borrow()
    }

    pub fn subscribe_state(&self) -> watch::Receiver<ChannelState> {
        self.state_rx.clone()
    }

    /// Wait until the channel reaches `target`
    pub async fn wait_for(&self, target: ChannelState) -> ChannelState {
        let mut rx = self.state_rx.clone();
        let reached = match rx.wait_for(|state| *state == target).await {
            Ok(state) => *state,
            Err(_) => self.state(),
        };
        reached
    }

    pub fn is_shut_down(&self) -> bool {
        self.task.is_none()
    }

    /// Stop processing messages, close the channel and wait for the task
    ///
    /// Calling this more than once is a no-op.
    pub async fn shutdown(&mut self) {
        let Some(task) = self.task.take() else {
            return;
        };

        self.cancel.cancel();
        if let Err(e) = task.await {
            tracing::error!(error = %e, "Push listener task failed");
        }
    }
}

impl Drop for ListenerHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn run(
    connector: Arc<dyn PushConnector>,
    store: Arc<Store>,
    cancel: CancellationToken,
    state_tx: watch::Sender<ChannelState>,
) {
    let connected = tokio::select! {
        biased;
        _ = cancel.cancelled() => {
            state_tx.send_replace(ChannelState::Closed);
            return;
        }
        result = connector.connect() => result,
    };

    let mut channel = match connected {
        Ok(channel) => channel,
        Err(e) => {
            tracing::warn!(error = %e, "Push channel connection failed, live updates disabled");
            state_tx.send_replace(ChannelState::Closed);
            return;
        }
    };

    state_tx.send_replace(ChannelState::Open);
    tracing::info!("Push channel open");

    let mut applied = 0u64;
    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::debug!("Push listener cancelled");
                break;
            }
            inbound = channel.recv() => match inbound {
                Some(Ok(text)) => {
                    if cancel.is_cancelled() {
                        break;
                    }
                    if handle_message(&store, &text) {
                        applied += 1;
                    }
                }
                Some(Err(e)) => {
                    tracing::warn!(error = %e, "Push channel failed");
                    break;
                }
                None => {
                    tracing::info!("Push channel closed by server");
                    break;
                }
            },
        }
    }

    if let Err(e) = channel.close().await {
        tracing::debug!(error = %e, "Error closing push channel");
    }
    state_tx.send_replace(ChannelState::Closed);
    tracing::info!(updates_applied = applied, "Push channel closed");
}

/// Apply one inbound frame. Returns whether the state changed.
pub fn handle_message(store: &Store, text: &str) -> bool {
    match PushMessage::parse(text) {
        Some(message) => {
            tracing::debug!(?message, "Applying push update");
            store.update(move |prev| message.patch(prev))
        }
        None => {
            tracing::debug!(text = %text, "Ignoring unrecognized push message");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StatePatch;
    use crate::testing::{booking, sample_data, ScriptedConnector};

    fn loaded_store() -> Arc<Store> {
        let store = Store::new();
        store.set(sample_data().into_patch());
        Arc::new(store)
    }

    #[tokio::test]
    async fn test_applies_messages_in_order() {
        let (connector, tx) = ScriptedConnector::new();
        let store = loaded_store();
        store.update(|prev| {
            let cancelled = prev.appointments[&2].with_interview(None);
            StatePatch::new().appointment(cancelled)
        });
        let mut rx = store.subscribe();
        let mut handle = LiveUpdateListener::spawn(connector, Arc::clone(&store));

        assert_eq!(handle.wait_for(ChannelState::Open).await, ChannelState::Open);

        // Both arrive before either is observed
        tx.send(booking(1, "Alice", 3)).unwrap();
        tx.send(booking(2, "Bob", 1)).unwrap();

        rx.wait_for(|s| s.appointments[&1].is_booked() && s.appointments[&2].is_booked())
            .await
            .unwrap();

        let state = store.state();
        assert_eq!(state.appointments[&1].student(), Some("Alice"));
        assert_eq!(state.appointments[&2].student(), Some("Bob"));
        assert_eq!(state.days[0].spots, 0);

        handle.shutdown().await;
    }

    #[tokio::test]
    async fn test_malformed_messages_are_ignored() {
        let (connector, tx) = ScriptedConnector::new();
        let store = loaded_store();
        let mut rx = store.subscribe();
        let mut handle = LiveUpdateListener::spawn(connector, Arc::clone(&store));

        tx.send("garbage".to_string()).unwrap();
        tx.send(r#"{"type":"UNKNOWN"}"#.to_string()).unwrap();
        tx.send(booking(1, "Alice", 3)).unwrap();

        rx.wait_for(|s| s.appointments[&1].is_booked()).await.unwrap();
        assert_eq!(store.state().appointments[&2].student(), Some("Archie Cohen"));
        assert_eq!(handle.state(), ChannelState::Open);

        handle.shutdown().await;
    }

    #[tokio::test]
    async fn test_shutdown_closes_exactly_once() {
        let (connector, _tx) = ScriptedConnector::new();
        let mut handle = LiveUpdateListener::spawn(connector.clone(), loaded_store());

        handle.wait_for(ChannelState::Open).await;
        handle.shutdown().await;
        handle.shutdown().await;

        assert_eq!(connector.close_count(), 1);
        assert_eq!(handle.state(), ChannelState::Closed);
        assert!(handle.is_shut_down());
    }

    #[tokio::test]
    async fn test_no_mutation_after_teardown_begins() {
        let (connector, tx) = ScriptedConnector::new();
        let store = loaded_store();
        let before = store.state();
        let mut handle = LiveUpdateListener::spawn(connector.clone(), Arc::clone(&store));
        handle.wait_for(ChannelState::Open).await;

        // Queued but not yet processed when teardown starts (current-thread runtime)
        tx.send(booking(1, "Late", 3)).unwrap();
        handle.shutdown().await;
        let _ = tx.send(booking(1, "Later", 3));
        tokio::task::yield_now().await;

        assert_eq!(store.state(), before);
        assert_eq!(connector.close_count(), 1);
    }

    #[tokio::test]
    async fn test_server_close_moves_to_closed() {
        let (connector, tx) = ScriptedConnector::new();
        let handle = LiveUpdateListener::spawn(connector.clone(), loaded_store());
        handle.wait_for(ChannelState::Open).await;

        drop(tx);
        assert_eq!(handle.wait_for(ChannelState::Closed).await, ChannelState::Closed);
        assert_eq!(connector.close_count(), 1);
    }

    #[tokio::test]
    async fn test_connect_failure_moves_to_closed() {
        let handle = LiveUpdateListener::spawn(ScriptedConnector::refusing(), loaded_store());
        assert_eq!(handle.wait_for(ChannelState::Closed).await, ChannelState::Closed);
    }

    #[tokio::test]
    async fn test_wait_for_after_listener_exit_reports_current_state() {
        let mut handle = LiveUpdateListener::spawn(ScriptedConnector::refusing(), loaded_store());
        handle.shutdown().await;

        // The state sender is gone; Open can no longer be reached
        assert_eq!(handle.wait_for(ChannelState::Open).await, ChannelState::Closed);
    }

    #[test]
    fn test_handle_message_same_update_twice() {
        let store = loaded_store();
        assert!(handle_message(&store, &booking(1, "Alice", 3)));
        let once = store.state();

        assert!(!handle_message(&store, &booking(1, "Alice", 3)));
        assert_eq!(store.state(), once);
    }
}
