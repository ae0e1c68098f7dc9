//! Persistent WebSocket transport with bounded fixed-delay reconnection.

pub mod client;
pub mod config;
pub mod socket;
#[cfg(test)]
pub(crate) mod testing;
pub mod tungstenite;

pub use client::{ConnectionState, WebSocketClient};
pub use config::TransportConfig;
pub use socket::{SocketEvent, SocketFactory, SocketSink, SocketStream, TransportError};
