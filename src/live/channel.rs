//! Push Channel Transport
//!
//! Read-only connection delivering text frames from the scheduler. The
//! WebSocket implementation is the production transport; tests substitute
//! their own [`PushConnector`].

use async_trait::async_trait;
use futures_util::StreamExt;
use thiserror::Error;
use tokio::net::TcpStream;
use tokio_tungstenite::{tungstenite::Message, MaybeTlsStream, WebSocketStream};

/// An open push-channel connection
#[async_trait]
pub trait PushChannel: Send {
    /// Next inbound text frame, or `None` once the channel has closed
    async fn recv(&mut self) -> Option<Result<String, PushError>>;

    /// Close the connection
    async fn close(&mut self) -> Result<(), PushError>;
}

/// Opens push-channel connections
#[async_trait]
pub trait PushConnector: Send + Sync {
    async fn connect(&self) -> Result<Box<dyn PushChannel>, PushError>;
}

/// Errors that can occur on the push channel
#[derive(Error, Debug)]
pub enum PushError {
    #[error("Failed to connect to {url}: {message}")]
    Connect { url: String, message: String },

    #[error("WebSocket error: {0}")]
    Transport(#[from] tokio_tungstenite::tungstenite::Error),
}

/// Connects to the scheduler's WebSocket endpoint
#[derive(Debug, Clone)]
pub struct WsConnector {
    url: String,
}

impl WsConnector {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl PushConnector for WsConnector {
    async fn connect(&self) -> Result<Box<dyn PushChannel>, PushError> {
        let (stream, response) = tokio_tungstenite::connect_async(self.url.as_str())
            .await
            .map_err(|e| PushError::Connect {
                url: self.url.clone(),
                message: e.to_string(),
            })?;

        tracing::debug!(url = %self.url, status = %response.status(), "WebSocket handshake complete");
        Ok(Box::new(WsChannel { stream }))
    }
}

/// [`PushChannel`] over a WebSocket stream
pub struct WsChannel {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

#[async_trait]
impl PushChannel for WsChannel {
    async fn recv(&mut self) -> Option<Result<String, PushError>> {
        loop {
            match self.stream.next().await? {
                Ok(Message::Text(text)) => return Some(Ok(text)),
                Ok(Message::Close(frame)) => {
                    tracing::debug!(?frame, "Server closed push channel");
                    return None;
                }
                // The client never sends; control and binary frames carry no updates
                Ok(_) => continue,
                Err(e) => return Some(Err(e.into())),
            }
        }
    }

    async fn close(&mut self) -> Result<(), PushError> {
        use tokio_tungstenite::tungstenite::Error;

        match self.stream.close(None).await {
            Ok(()) | Err(Error::ConnectionClosed) | Err(Error::AlreadyClosed) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connector_url() {
        let connector = WsConnector::new("ws://localhost:8001");
        assert_eq!(connector.url(), "ws://localhost:8001");
    }

    #[tokio::test]
    async fn test_connect_refused() {
        let connector = WsConnector::new("ws://127.0.0.1:1");
        let result = connector.connect().await;
        assert!(matches!(result, Err(PushError::Connect { .. })));
    }
}
