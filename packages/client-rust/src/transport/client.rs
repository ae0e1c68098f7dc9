//! Reconnecting WebSocket client.
//!
//! One driver task per [`WebSocketClient::connect`] call owns the socket
//! lifecycle: dial, pump inbound frames, and on loss of the connection wait
//! a fixed interval and dial again, up to the configured budget. A
//! cancellation token makes [`WebSocketClient::disconnect`] synchronous and
//! idempotent: it stops the driver whether it is dialing, reading, or
//! sleeping between attempts.

use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use tablebridge_core::{Command, CommandResponse};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use super::config::TransportConfig;
use super::socket::{SocketEvent, SocketFactory, SocketSink, SocketStream, TransportError};
use super::tungstenite::TungsteniteFactory;

// ---------------------------------------------------------------------------
// Connection state
// ---------------------------------------------------------------------------

/// Where the transport currently is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// Never connected.
    Idle,
    /// A dial is in flight.
    Connecting,
    /// Socket is open; sends are allowed.
    Open,
    /// Waiting out the fixed delay before the next dial.
    Reconnecting,
    /// Stopped by a manual disconnect.
    Closed,
    /// Gave up after exhausting the reconnect budget.
    Failed,
}

type Callback = Arc<dyn Fn() + Send + Sync>;
type MessageCallback = Arc<dyn Fn(Command) + Send + Sync>;

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Handle to the reconnecting transport. Cheap to clone.
#[derive(Clone)]
pub struct WebSocketClient {
    inner: Arc<Inner>,
}

struct Inner {
    config: TransportConfig,
    factory: Arc<dyn SocketFactory>,
    state: RwLock<ConnectionState>,
    /// Write half of the open socket, keyed by the generation of the driver
    /// that published it so a superseded driver never evicts its successor's.
    sink: tokio::sync::Mutex<Option<(u64, Box<dyn SocketSink>)>>,
    /// Consecutive failed attempts. Reset only by a successful open.
    attempts: AtomicU32,
    manual_close: AtomicBool,
    /// Bumped on every connect. A driver whose generation is stale must not
    /// touch shared state; a newer driver owns it.
    generation: AtomicU64,
    /// Token for the currently running driver, replaced on each connect.
    cancel: Mutex<CancellationToken>,
    on_connect: RwLock<Option<Callback>>,
    on_disconnect: RwLock<Option<Callback>>,
    on_message: RwLock<Option<MessageCallback>>,
}

impl WebSocketClient {
    /// Client backed by a real tungstenite socket.
    #[must_use]
    pub fn new(config: TransportConfig) -> Self {
        Self::with_factory(config, Arc::new(TungsteniteFactory))
    }

    /// Client backed by an arbitrary socket factory.
    #[must_use]
    pub fn with_factory(config: TransportConfig, factory: Arc<dyn SocketFactory>) -> Self {
        Self {
            inner: Arc::new(Inner {
                config,
                factory,
                state: RwLock::new(ConnectionState::Idle),
                sink: tokio::sync::Mutex::new(None),
                attempts: AtomicU32::new(0),
                manual_close: AtomicBool::new(false),
                generation: AtomicU64::new(0),
                cancel: Mutex::new(CancellationToken::new()),
                on_connect: RwLock::new(None),
                on_disconnect: RwLock::new(None),
                on_message: RwLock::new(None),
            }),
        }
    }

    /// Starts the driver task. No-op while a driver is already active
    /// (connecting, open, or waiting to reconnect). After a manual
    /// disconnect or budget exhaustion this starts a fresh driver.
    pub fn connect(&self) {
        {
            let mut state = self.inner.state.write();
            if matches!(
                *state,
                ConnectionState::Connecting | ConnectionState::Open | ConnectionState::Reconnecting
            ) {
                debug!(state = ?*state, "connect ignored, transport already active");
                return;
            }
            *state = ConnectionState::Connecting;
        }
        self.inner.manual_close.store(false, Ordering::SeqCst);
        let generation = self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let cancel = CancellationToken::new();
        *self.inner.cancel.lock() = cancel.clone();

        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            inner.drive(cancel, generation).await;
        });
    }

    /// Stops the transport. Synchronous, idempotent, and final for the
    /// current driver: no reconnect follows a manual disconnect.
    pub fn disconnect(&self) {
        self.inner.manual_close.store(true, Ordering::SeqCst);
        self.inner.cancel.lock().cancel();
        self.inner.set_state(ConnectionState::Closed);
    }

    /// Writes one text frame iff the transport is `Open`.
    ///
    /// Otherwise the message is dropped with a warning and
    /// [`TransportError::NotConnected`] comes back. Nothing is queued. The
    /// state check happens under the sink lock, so a `send` issued after
    /// `disconnect()` returns never reaches the socket, even while the
    /// cancelled driver is still winding down.
    pub async fn send(&self, text: impl Into<String>) -> Result<(), TransportError> {
        let mut guard = self.inner.sink.lock().await;
        if *self.inner.state.read() != ConnectionState::Open {
            warn!("transport is not open, dropping outbound message");
            return Err(TransportError::NotConnected);
        }
        let Some((_, sink)) = guard.as_mut() else {
            warn!("socket is not open, dropping outbound message");
            return Err(TransportError::NotConnected);
        };
        sink.send(text.into()).await
    }

    /// Serializes `response` and sends it as one text frame.
    pub async fn send_response(&self, response: &CommandResponse) -> Result<(), TransportError> {
        let text =
            serde_json::to_string(response).map_err(|err| TransportError::Send(err.to_string()))?;
        self.send(text).await
    }

    /// Replaces the connect callback. One slot; last write wins.
    pub fn on_connect(&self, callback: impl Fn() + Send + Sync + 'static) {
        *self.inner.on_connect.write() = Some(Arc::new(callback));
    }

    /// Replaces the disconnect callback. One slot; last write wins.
    pub fn on_disconnect(&self, callback: impl Fn() + Send + Sync + 'static) {
        *self.inner.on_disconnect.write() = Some(Arc::new(callback));
    }

    /// Replaces the inbound-command callback. One slot; last write wins.
    /// Only frames that parse into a well-formed [`Command`] reach it.
    pub fn on_message(&self, callback: impl Fn(Command) + Send + Sync + 'static) {
        *self.inner.on_message.write() = Some(Arc::new(callback));
    }

    #[must_use]
    pub fn state(&self) -> ConnectionState {
        *self.inner.state.read()
    }

    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.state() == ConnectionState::Open
    }
}

// ---------------------------------------------------------------------------
// Driver
// ---------------------------------------------------------------------------

impl Inner {
    async fn drive(self: Arc<Self>, cancel: CancellationToken, generation: u64) {
        loop {
            self.set_state(ConnectionState::Connecting);
            let dialed = tokio::select! {
                biased;
                () = cancel.cancelled() => {
                    if self.is_current(generation) {
                        self.set_state(ConnectionState::Closed);
                    }
                    return;
                }
                dialed = self.factory.connect(&self.config.url) => dialed,
            };

            match dialed {
                Ok((sink, stream)) => {
                    *self.sink.lock().await = Some((generation, sink));
                    self.attempts.store(0, Ordering::SeqCst);
                    self.set_state(ConnectionState::Open);
                    info!(url = %self.config.url, "connected");
                    self.fire(&self.on_connect);

                    let cancelled = self.pump(stream, &cancel).await;

                    // Take the sink back only if it is still this driver's;
                    // a superseding driver may have published its own by now.
                    let owned = {
                        let mut slot = self.sink.lock().await;
                        match slot.take() {
                            Some((owner, sink)) if owner == generation => Some(sink),
                            other => {
                                *slot = other;
                                None
                            }
                        }
                    };
                    if let Some(mut sink) = owned {
                        if cancelled {
                            sink.close().await;
                        }
                    }

                    if cancelled && !self.is_current(generation) {
                        // A newer driver owns the state and callbacks now.
                        return;
                    }
                    self.fire(&self.on_disconnect);

                    if cancelled {
                        self.set_state(ConnectionState::Closed);
                        return;
                    }
                    warn!(url = %self.config.url, "connection closed");
                }
                Err(err) => {
                    error!(url = %self.config.url, error = %err, "connection attempt failed");
                    self.fire(&self.on_disconnect);
                }
            }

            if cancel.is_cancelled() || self.manual_close.load(Ordering::SeqCst) {
                self.set_state(ConnectionState::Closed);
                return;
            }

            let attempts = self.attempts.load(Ordering::SeqCst);
            if attempts >= self.config.max_reconnect_attempts {
                error!(
                    max = self.config.max_reconnect_attempts,
                    "max reconnect attempts reached"
                );
                self.set_state(ConnectionState::Failed);
                return;
            }
            self.attempts.store(attempts + 1, Ordering::SeqCst);
            self.set_state(ConnectionState::Reconnecting);
            info!(
                attempt = attempts + 1,
                max = self.config.max_reconnect_attempts,
                delay = ?self.config.reconnect_interval,
                "reconnecting"
            );
            tokio::select! {
                biased;
                () = cancel.cancelled() => {
                    if self.is_current(generation) {
                        self.set_state(ConnectionState::Closed);
                    }
                    return;
                }
                () = tokio::time::sleep(self.config.reconnect_interval) => {}
            }
        }
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    /// Reads the socket until it closes or the driver is cancelled.
    /// Returns `true` when cancelled.
    async fn pump(&self, mut stream: Box<dyn SocketStream>, cancel: &CancellationToken) -> bool {
        loop {
            let event = tokio::select! {
                biased;
                () = cancel.cancelled() => return true,
                event = stream.next_event() => event,
            };
            match event {
                Some(SocketEvent::Message(text)) => self.dispatch(&text),
                // Errors are observational. The close that follows one is
                // what drives reconnection.
                Some(SocketEvent::Error(reason)) => {
                    warn!(%reason, "socket error");
                }
                None => return false,
            }
        }
    }

    /// Validates one inbound frame and hands it to the message callback.
    /// Anything that is not a well-formed command is dropped with a warning.
    fn dispatch(&self, text: &str) {
        match serde_json::from_str::<Command>(text) {
            Ok(command) => {
                let callback = self.on_message.read().clone();
                if let Some(callback) = callback {
                    callback(command);
                } else {
                    debug!("no message callback registered, dropping inbound command");
                }
            }
            Err(err) => {
                error!(error = %err, "ignoring malformed inbound message");
            }
        }
    }

    fn fire(&self, slot: &RwLock<Option<Callback>>) {
        // Clone out of the lock so user code never runs under it.
        let callback = slot.read().clone();
        if let Some(callback) = callback {
            callback();
        }
    }

    fn set_state(&self, next: ConnectionState) {
        let mut state = self.state.write();
        if *state != next {
            debug!(from = ?*state, to = ?next, "transport state change");
            *state = next;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::json;
    use tokio::sync::mpsc;

    use super::super::testing::MockFactory;
    use super::*;

    fn config() -> TransportConfig {
        TransportConfig::new("ws://localhost:31415")
    }

    fn client_with(factory: Arc<MockFactory>, config: TransportConfig) -> WebSocketClient {
        WebSocketClient::with_factory(config, factory)
    }

    /// Lets spawned driver work run without crossing any reconnect timer.
    async fn settle() {
        tokio::time::sleep(Duration::from_millis(1)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn connect_opens_socket_and_fires_connect_callback() {
        let factory = Arc::new(MockFactory::default());
        let _conn = factory.accept();
        let client = client_with(Arc::clone(&factory), config());

        let connects = Arc::new(AtomicU32::new(0));
        let connects_seen = Arc::clone(&connects);
        client.on_connect(move || {
            connects_seen.fetch_add(1, Ordering::SeqCst);
        });

        client.connect();
        settle().await;

        assert_eq!(client.state(), ConnectionState::Open);
        assert!(client.is_connected());
        assert_eq!(connects.load(Ordering::SeqCst), 1);
        assert_eq!(factory.dials(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn send_writes_exactly_one_frame_while_open() {
        let factory = Arc::new(MockFactory::default());
        let conn = factory.accept();
        let client = client_with(Arc::clone(&factory), config());

        client.connect();
        settle().await;

        client.send(r#"{"id":"t1","success":true,"data":{}}"#).await.unwrap();

        let writes = conn.writes.lock();
        assert_eq!(writes.len(), 1);
        assert_eq!(writes[0], r#"{"id":"t1","success":true,"data":{}}"#);
    }

    #[tokio::test(start_paused = true)]
    async fn send_while_not_open_drops_the_message() {
        let factory = Arc::new(MockFactory::default());
        let client = client_with(factory, config());

        let result = client.send("dropped").await;

        assert!(matches!(result, Err(TransportError::NotConnected)));
        assert_eq!(client.state(), ConnectionState::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn valid_inbound_command_reaches_message_callback() {
        let factory = Arc::new(MockFactory::default());
        let conn = factory.accept();
        let client = client_with(Arc::clone(&factory), config());

        let (tx, mut rx) = mpsc::unbounded_channel();
        client.on_message(move |command| {
            tx.send(command).unwrap();
        });

        client.connect();
        settle().await;

        conn.push(SocketEvent::Message(
            r#"{"id":"c1","type":"roll-dice","params":{"formula":"2d6+3"}}"#.to_owned(),
        ));
        settle().await;

        let command = rx.try_recv().unwrap();
        assert_eq!(command.id, "c1");
        assert_eq!(command.kind, "roll-dice");
        assert_eq!(command.params, json!({"formula": "2d6+3"}));
    }

    #[tokio::test(start_paused = true)]
    async fn malformed_inbound_frames_never_reach_the_callback() {
        let factory = Arc::new(MockFactory::default());
        let conn = factory.accept();
        let client = client_with(Arc::clone(&factory), config());

        let seen = Arc::new(AtomicU32::new(0));
        let seen_in_callback = Arc::clone(&seen);
        client.on_message(move |_| {
            seen_in_callback.fetch_add(1, Ordering::SeqCst);
        });

        client.connect();
        settle().await;

        conn.push(SocketEvent::Message("not json at all".to_owned()));
        conn.push(SocketEvent::Message(r#"{"id":"c1","type":"roll-dice"}"#.to_owned()));
        conn.push(SocketEvent::Message(r#"{"id":7,"type":"roll-dice","params":{}}"#.to_owned()));
        conn.push(SocketEvent::Message(r#"{"id":"c1","params":{}}"#.to_owned()));
        settle().await;
        assert_eq!(seen.load(Ordering::SeqCst), 0);

        // The connection keeps working after bad frames.
        conn.push(SocketEvent::Message(
            r#"{"id":"c2","type":"get-actors","params":{}}"#.to_owned(),
        ));
        settle().await;
        assert_eq!(seen.load(Ordering::SeqCst), 1);
        assert_eq!(client.state(), ConnectionState::Open);
    }

    #[tokio::test(start_paused = true)]
    async fn socket_error_event_does_not_trigger_reconnect() {
        let factory = Arc::new(MockFactory::default());
        let conn = factory.accept();
        let client = client_with(Arc::clone(&factory), config());

        client.connect();
        settle().await;

        conn.push(SocketEvent::Error("io error".to_owned()));
        tokio::time::sleep(Duration::from_secs(30)).await;

        assert_eq!(client.state(), ConnectionState::Open);
        assert_eq!(factory.dials(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn unsolicited_close_reconnects_after_fixed_interval() {
        let factory = Arc::new(MockFactory::default());
        let mut first = factory.accept();
        let _second = factory.accept();
        let client = client_with(Arc::clone(&factory), config());

        let disconnects = Arc::new(AtomicU32::new(0));
        let disconnects_seen = Arc::clone(&disconnects);
        client.on_disconnect(move || {
            disconnects_seen.fetch_add(1, Ordering::SeqCst);
        });

        client.connect();
        settle().await;
        assert_eq!(factory.dials(), 1);

        first.close();
        settle().await;
        assert_eq!(client.state(), ConnectionState::Reconnecting);
        assert_eq!(disconnects.load(Ordering::SeqCst), 1);
        assert_eq!(factory.dials(), 1);

        tokio::time::sleep(TransportConfig::DEFAULT_RECONNECT_INTERVAL).await;
        settle().await;
        assert_eq!(factory.dials(), 2);
        assert_eq!(client.state(), ConnectionState::Open);
    }

    #[tokio::test(start_paused = true)]
    async fn disconnect_suppresses_reconnect_and_closes_the_socket() {
        let factory = Arc::new(MockFactory::default());
        let conn = factory.accept();
        let client = client_with(Arc::clone(&factory), config());

        client.connect();
        settle().await;

        client.disconnect();
        assert_eq!(client.state(), ConnectionState::Closed);

        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(factory.dials(), 1);
        assert_eq!(client.state(), ConnectionState::Closed);
        assert!(conn.closed.load(Ordering::SeqCst));

        // Idempotent.
        client.disconnect();
        assert_eq!(client.state(), ConnectionState::Closed);
    }

    #[tokio::test(start_paused = true)]
    async fn send_after_disconnect_is_dropped_even_before_the_driver_exits() {
        let factory = Arc::new(MockFactory::default());
        let conn = factory.accept();
        let client = client_with(Arc::clone(&factory), config());

        client.connect();
        settle().await;
        assert!(client.is_connected());

        // No yield between disconnect and send: the cancelled driver has
        // not run yet, so the sink is still in the slot.
        client.disconnect();
        let result = client.send("must not be written").await;

        assert!(matches!(result, Err(TransportError::NotConnected)));
        settle().await;
        assert!(conn.writes.lock().is_empty());
        assert!(conn.closed.load(Ordering::SeqCst));
    }

    #[tokio::test(start_paused = true)]
    async fn reconnect_after_disconnect_never_writes_to_the_old_socket() {
        let factory = Arc::new(MockFactory::default());
        let first = factory.accept();
        let second = factory.accept();
        let client = client_with(Arc::clone(&factory), config());

        client.connect();
        settle().await;

        // Disconnect and reconnect in the same tick: the first driver is
        // cancelled but has not exited when the second one dials.
        client.disconnect();
        client.connect();
        settle().await;

        assert_eq!(client.state(), ConnectionState::Open);
        assert_eq!(factory.dials(), 2);

        client.send("fresh").await.unwrap();
        assert_eq!(*second.writes.lock(), vec!["fresh".to_owned()]);
        assert!(first.writes.lock().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn reconnect_budget_allows_one_initial_plus_max_attempts() {
        let factory = Arc::new(MockFactory::default());
        let mut first = factory.accept();
        for _ in 0..3 {
            factory.refuse();
        }
        let mut config = config();
        config.max_reconnect_attempts = 3;
        config.reconnect_interval = Duration::from_millis(1000);
        let client = client_with(Arc::clone(&factory), config);

        client.connect();
        settle().await;
        assert_eq!(client.state(), ConnectionState::Open);

        first.close();
        tokio::time::sleep(Duration::from_secs(10)).await;

        assert_eq!(factory.dials(), 4);
        assert_eq!(client.state(), ConnectionState::Failed);
    }

    #[tokio::test(start_paused = true)]
    async fn successful_open_resets_the_attempt_counter() {
        let factory = Arc::new(MockFactory::default());
        factory.refuse();
        let mut survivor = factory.accept();
        factory.refuse();
        factory.refuse();
        let mut config = config();
        config.max_reconnect_attempts = 2;
        config.reconnect_interval = Duration::from_millis(100);
        let client = client_with(Arc::clone(&factory), config);

        // Dial 1 refused, dial 2 opens. Without the reset, the two refusals
        // after the close would overrun a budget already half spent.
        client.connect();
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(client.state(), ConnectionState::Open);
        assert_eq!(factory.dials(), 2);

        survivor.close();
        tokio::time::sleep(Duration::from_secs(10)).await;

        assert_eq!(factory.dials(), 4);
        assert_eq!(client.state(), ConnectionState::Failed);
    }

    #[tokio::test(start_paused = true)]
    async fn connect_is_a_noop_while_transport_is_active() {
        let factory = Arc::new(MockFactory::default());
        let _conn = factory.accept();
        let client = client_with(Arc::clone(&factory), config());

        client.connect();
        settle().await;
        client.connect();
        client.connect();
        settle().await;

        assert_eq!(factory.dials(), 1);
        assert_eq!(client.state(), ConnectionState::Open);
    }

    #[tokio::test(start_paused = true)]
    async fn manual_connect_after_failure_starts_a_fresh_driver() {
        let factory = Arc::new(MockFactory::default());
        factory.refuse();
        let mut config = config();
        config.max_reconnect_attempts = 0;
        let client = client_with(Arc::clone(&factory), config);

        client.connect();
        settle().await;
        assert_eq!(client.state(), ConnectionState::Failed);

        let _conn = factory.accept();
        client.connect();
        settle().await;
        assert_eq!(client.state(), ConnectionState::Open);
        assert_eq!(factory.dials(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn send_after_close_is_dropped_not_queued() {
        let factory = Arc::new(MockFactory::default());
        let mut first = factory.accept();
        let second = factory.accept();
        let client = client_with(Arc::clone(&factory), config());

        client.connect();
        settle().await;
        first.close();
        settle().await;

        let result = client.send("while reconnecting").await;
        assert!(matches!(result, Err(TransportError::NotConnected)));

        tokio::time::sleep(TransportConfig::DEFAULT_RECONNECT_INTERVAL).await;
        settle().await;
        assert_eq!(client.state(), ConnectionState::Open);
        // Nothing written from before the reconnect.
        assert!(second.writes.lock().is_empty());
        assert!(first.writes.lock().is_empty());
    }
}
