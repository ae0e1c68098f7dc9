//! Glue between the transport and the router.
//!
//! Every validated inbound command is executed on its own task, and whatever
//! envelope comes back is written to the socket. Because the router never
//! fails and the transport drops sends while disconnected, nothing in this
//! path can take the bridge down.

use std::sync::Arc;

use tracing::warn;

use crate::commands::CommandRouter;
use crate::transport::WebSocketClient;

/// A wired bridge: one router, one reconnecting transport.
#[derive(Clone)]
pub struct Bridge {
    router: Arc<CommandRouter>,
    client: WebSocketClient,
}

impl Bridge {
    #[must_use]
    pub fn new(router: Arc<CommandRouter>, client: WebSocketClient) -> Self {
        Self { router, client }
    }

    /// Installs the message callback that routes commands to handlers and
    /// answers them. Call once before [`Bridge::start`].
    pub fn wire(&self) {
        let router = Arc::clone(&self.router);
        let client = self.client.clone();
        self.client.on_message(move |command| {
            let router = Arc::clone(&router);
            let client = client.clone();
            tokio::spawn(async move {
                let response = router.execute(command).await;
                if let Err(err) = client.send_response(&response).await {
                    warn!(id = %response.id, error = %err, "response not delivered");
                }
            });
        });
    }

    /// Starts the transport.
    pub fn start(&self) {
        self.client.connect();
    }

    /// Stops the transport. No reconnect follows.
    pub fn shutdown(&self) {
        self.client.disconnect();
    }

    #[must_use]
    pub fn router(&self) -> &Arc<CommandRouter> {
        &self.router
    }

    #[must_use]
    pub fn client(&self) -> &WebSocketClient {
        &self.client
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::json;
    use tablebridge_core::{CommandKind, CommandResponse};

    use super::*;
    use crate::transport::testing::MockFactory;
    use crate::transport::{SocketEvent, TransportConfig};

    async fn settle() {
        tokio::time::sleep(Duration::from_millis(1)).await;
    }

    fn bridge_with(factory: Arc<MockFactory>) -> Bridge {
        let router = Arc::new(CommandRouter::new());
        router.register(CommandKind::SendChatMessage, |params| async move {
            Ok(json!({"sent": true, "echo": params["content"]}))
        });
        let client =
            WebSocketClient::with_factory(TransportConfig::new("ws://localhost:31415"), factory);
        let bridge = Bridge::new(router, client);
        bridge.wire();
        bridge
    }

    #[tokio::test(start_paused = true)]
    async fn inbound_command_is_answered_on_the_socket() {
        let factory = Arc::new(MockFactory::default());
        let conn = factory.accept();
        let bridge = bridge_with(Arc::clone(&factory));

        bridge.start();
        settle().await;

        conn.push(SocketEvent::Message(
            r#"{"id":"m1","type":"send-chat-message","params":{"content":"hello"}}"#.to_owned(),
        ));
        settle().await;

        let writes = conn.writes.lock();
        assert_eq!(writes.len(), 1);
        let response: CommandResponse = serde_json::from_str(&writes[0]).unwrap();
        assert_eq!(response.id, "m1");
        assert!(response.success);
        assert_eq!(response.data.unwrap()["echo"], "hello");
    }

    #[tokio::test(start_paused = true)]
    async fn unknown_command_is_answered_with_a_failure_envelope() {
        let factory = Arc::new(MockFactory::default());
        let conn = factory.accept();
        let bridge = bridge_with(Arc::clone(&factory));

        bridge.start();
        settle().await;

        conn.push(SocketEvent::Message(
            r#"{"id":"m2","type":"summon-dragon","params":{}}"#.to_owned(),
        ));
        settle().await;

        let writes = conn.writes.lock();
        let response: CommandResponse = serde_json::from_str(&writes[0]).unwrap();
        assert_eq!(response.id, "m2");
        assert!(!response.success);
        assert_eq!(
            response.error.as_deref(),
            Some("Unknown command type: summon-dragon")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn malformed_frames_produce_no_reply() {
        let factory = Arc::new(MockFactory::default());
        let conn = factory.accept();
        let bridge = bridge_with(Arc::clone(&factory));

        bridge.start();
        settle().await;

        conn.push(SocketEvent::Message("{broken".to_owned()));
        conn.push(SocketEvent::Message(r#"{"id":"m3","type":"send-chat-message"}"#.to_owned()));
        settle().await;

        assert!(conn.writes.lock().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_stops_the_transport() {
        let factory = Arc::new(MockFactory::default());
        let _conn = factory.accept();
        let bridge = bridge_with(Arc::clone(&factory));

        bridge.start();
        settle().await;
        assert!(bridge.client().is_connected());

        bridge.shutdown();
        tokio::time::sleep(Duration::from_secs(60)).await;
        assert!(!bridge.client().is_connected());
        assert_eq!(factory.dials(), 1);
    }
}
