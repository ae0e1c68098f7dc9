//! The socket seam: the narrow capability surface the connection state
//! machine needs from an underlying WebSocket implementation.
//!
//! Production code plugs in the tungstenite-backed factory; tests plug in
//! scripted sockets. The state machine never touches a real network type.

use async_trait::async_trait;
use thiserror::Error;

/// Transport-level failures surfaced to callers of the client API.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("failed to connect to {url}: {reason}")]
    Connect { url: String, reason: String },

    #[error("send failed: {0}")]
    Send(String),

    #[error("not connected")]
    NotConnected,
}

/// Something the driver observed on an open socket.
///
/// Stream exhaustion (`None` from [`SocketStream::next_event`]) signals the
/// peer closed or the link dropped. An `Error` event is observational only;
/// the close that follows it is what drives reconnection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SocketEvent {
    /// A complete inbound text frame.
    Message(String),
    /// A socket-level error. Logged, never acted on directly.
    Error(String),
}

/// Write half of an open socket.
#[async_trait]
pub trait SocketSink: Send {
    async fn send(&mut self, text: String) -> Result<(), TransportError>;
    async fn close(&mut self);
}

/// Read half of an open socket. `None` means the socket is closed.
#[async_trait]
pub trait SocketStream: Send {
    async fn next_event(&mut self) -> Option<SocketEvent>;
}

/// Dials a WebSocket endpoint and splits it into halves.
#[async_trait]
pub trait SocketFactory: Send + Sync {
    async fn connect(
        &self,
        url: &str,
    ) -> Result<(Box<dyn SocketSink>, Box<dyn SocketStream>), TransportError>;
}
