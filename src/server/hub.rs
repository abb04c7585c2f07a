//! Push Hub
//!
//! Fans scheduler updates out to every connected push-channel client over a
//! tokio broadcast channel.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::live::PushMessage;

/// Configuration for the push hub
#[derive(Debug, Clone)]
pub struct HubConfig {
    /// Maximum number of concurrent connections
    pub max_connections: usize,
    /// Messages buffered per lagging client before it starts missing updates
    pub broadcast_capacity: usize,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            max_connections: 1000,
            broadcast_capacity: 1024,
        }
    }
}

pub struct PushHub {
    broadcast_tx: broadcast::Sender<PushMessage>,
    connections: Arc<AtomicUsize>,
    config: HubConfig,
}

/// A registered client: its id and update stream
///
/// Dropping the connection unregisters it.
pub struct HubConnection {
    pub id: String,
    pub updates: broadcast::Receiver<PushMessage>,
    connections: Arc<AtomicUsize>,
}

impl Drop for HubConnection {
    fn drop(&mut self) {
        self.connections.fetch_sub(1, Ordering::SeqCst);
        tracing::info!(connection_id = %self.id, "Push client disconnected");
    }
}

impl PushHub {
    pub fn new(config: HubConfig) -> Self {
        let (broadcast_tx, _) = broadcast::channel(config.broadcast_capacity);

        Self {
            broadcast_tx,
            connections: Arc::new(AtomicUsize::new(0)),
            config,
        }
    }

    /// Register a new client
    ///
    /// Fails once the connection limit has been reached.
    pub fn register(&self) -> Result<HubConnection, HubError> {
        let limit = self.config.max_connections;
        self.connections
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| {
                (n < limit).then_some(n + 1)
            })
            .map_err(|_| HubError::TooManyConnections(limit))?;

        let id = Uuid::new_v4().to_string();
        tracing::info!(connection_id = %id, "Push client connected");

        Ok(HubConnection {
            id,
            updates: self.broadcast_tx.subscribe(),
            connections: Arc::clone(&self.connections),
        })
    }

    /// Send a message to every connected client. Returns how many received it.
    pub fn publish(&self, message: PushMessage) -> usize {
        match self.broadcast_tx.send(message) {
            Ok(receivers) => {
                tracing::trace!(receivers, "Published push message");
                receivers
            }
            Err(_) => 0,
        }
    }

    pub fn connection_count(&self) -> usize {
        self.connections.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Error)]
pub enum HubError {
    #[error("Too many connections (limit: {0})")]
    TooManyConnections(usize),
}
