//! Tungstenite-backed socket factory.

use async_trait::async_trait;
use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tracing::warn;

use super::socket::{SocketEvent, SocketFactory, SocketSink, SocketStream, TransportError};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Dials real WebSocket endpoints with `tokio-tungstenite`.
pub struct TungsteniteFactory;

#[async_trait]
impl SocketFactory for TungsteniteFactory {
    async fn connect(
        &self,
        url: &str,
    ) -> Result<(Box<dyn SocketSink>, Box<dyn SocketStream>), TransportError> {
        let (stream, _response) =
            connect_async(url)
                .await
                .map_err(|err| TransportError::Connect {
                    url: url.to_owned(),
                    reason: err.to_string(),
                })?;
        let (sink, stream) = stream.split();
        Ok((
            Box::new(TungsteniteSink { sink }),
            Box::new(TungsteniteStream { stream }),
        ))
    }
}

struct TungsteniteSink {
    sink: SplitSink<WsStream, Message>,
}

#[async_trait]
impl SocketSink for TungsteniteSink {
    async fn send(&mut self, text: String) -> Result<(), TransportError> {
        self.sink
            .send(Message::text(text))
            .await
            .map_err(|err| TransportError::Send(err.to_string()))
    }

    async fn close(&mut self) {
        if let Err(err) = self.sink.close().await {
            warn!(error = %err, "error closing socket");
        }
    }
}

struct TungsteniteStream {
    stream: SplitStream<WsStream>,
}

#[async_trait]
impl SocketStream for TungsteniteStream {
    async fn next_event(&mut self) -> Option<SocketEvent> {
        loop {
            match self.stream.next().await? {
                Ok(Message::Text(text)) => return Some(SocketEvent::Message(text.to_string())),
                Ok(Message::Close(_)) => return None,
                Ok(Message::Binary(_)) => {
                    // The protocol is text-only JSON.
                    warn!("ignoring unexpected binary frame");
                }
                // Ping/pong is handled by tungstenite itself.
                Ok(Message::Ping(_) | Message::Pong(_) | Message::Frame(_)) => {}
                Err(err) => return Some(SocketEvent::Error(err.to_string())),
            }
        }
    }
}
