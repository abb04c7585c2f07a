//! WebSocket Handler
//!
//! Upgrades push-channel requests and forwards hub updates to the client as
//! JSON text frames. The channel is server-to-client only; inbound frames are
//! read just to notice the client closing.

use axum::{
    extract::{
        ws::{CloseFrame, Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use futures_util::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;

use super::hub::PushHub;
use super::state::AppState;

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> Response {
    let hub = Arc::clone(&state.hub);
    ws.on_upgrade(move |socket| handle_socket(socket, hub))
}

async fn handle_socket(socket: WebSocket, hub: Arc<PushHub>) {
    let (mut sender, mut receiver) = socket.split();

    let mut connection = match hub.register() {
        Ok(connection) => connection,
        Err(e) => {
            tracing::warn!(error = %e, "Rejecting push client");
            let frame = CloseFrame {
                // "Try again later"
                code: 1013,
                reason: e.to_string().into(),
            };
            let _ = sender.send(Message::Close(Some(frame))).await;
            return;
        }
    };

    loop {
        tokio::select! {
            update = connection.updates.recv() => match update {
                Ok(message) => {
                    let text = match serde_json::to_string(&message) {
                        Ok(text) => text,
                        Err(e) => {
                            tracing::error!(error = %e, "Failed to serialize push message");
                            continue;
                        }
                    };
                    if sender.send(Message::Text(text)).await.is_err() {
                        tracing::debug!(
                            connection_id = %connection.id,
                            "WebSocket send failed, closing connection"
                        );
                        break;
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(
                        connection_id = %connection.id,
                        skipped,
                        "Push client lagging, updates dropped"
                    );
                }
                Err(RecvError::Closed) => break,
            },
            inbound = receiver.next() => match inbound {
                Some(Ok(Message::Close(_))) | None => {
                    tracing::debug!(connection_id = %connection.id, "Client closed push channel");
                    break;
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    tracing::debug!(
                        connection_id = %connection.id,
                        error = %e,
                        "WebSocket receive error"
                    );
                    break;
                }
            },
        }
    }
}
