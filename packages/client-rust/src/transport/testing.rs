//! Scripted socket factory for tests. Each queued script answers one dial:
//! either refuse it or hand back a connection the test controls.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::mpsc;

use super::socket::{SocketEvent, SocketFactory, SocketSink, SocketStream, TransportError};

pub(crate) struct MockSink {
    writes: Arc<Mutex<Vec<String>>>,
    closed: Arc<AtomicBool>,
}

#[async_trait]
impl SocketSink for MockSink {
    async fn send(&mut self, text: String) -> Result<(), TransportError> {
        self.writes.lock().push(text);
        Ok(())
    }

    async fn close(&mut self) {
        self.closed.store(true, Ordering::SeqCst);
    }
}

pub(crate) struct MockStream {
    events: mpsc::UnboundedReceiver<SocketEvent>,
}

#[async_trait]
impl SocketStream for MockStream {
    async fn next_event(&mut self) -> Option<SocketEvent> {
        self.events.recv().await
    }
}

enum Script {
    Refuse,
    Accept {
        events: mpsc::UnboundedReceiver<SocketEvent>,
        writes: Arc<Mutex<Vec<String>>>,
        closed: Arc<AtomicBool>,
    },
}

/// Test-side handle to one accepted connection.
pub(crate) struct Conn {
    events: Option<mpsc::UnboundedSender<SocketEvent>>,
    pub(crate) writes: Arc<Mutex<Vec<String>>>,
    pub(crate) closed: Arc<AtomicBool>,
}

impl Conn {
    pub(crate) fn push(&self, event: SocketEvent) {
        self.events
            .as_ref()
            .expect("connection already closed")
            .send(event)
            .expect("driver dropped the stream");
    }

    /// Simulates the peer closing the socket.
    pub(crate) fn close(&mut self) {
        self.events = None;
    }
}

#[derive(Default)]
pub(crate) struct MockFactory {
    scripts: Mutex<VecDeque<Script>>,
    dials: AtomicU32,
}

impl MockFactory {
    pub(crate) fn refuse(&self) {
        self.scripts.lock().push_back(Script::Refuse);
    }

    pub(crate) fn accept(&self) -> Conn {
        let (tx, rx) = mpsc::unbounded_channel();
        let writes = Arc::new(Mutex::new(Vec::new()));
        let closed = Arc::new(AtomicBool::new(false));
        self.scripts.lock().push_back(Script::Accept {
            events: rx,
            writes: Arc::clone(&writes),
            closed: Arc::clone(&closed),
        });
        Conn {
            events: Some(tx),
            writes,
            closed,
        }
    }

    pub(crate) fn dials(&self) -> u32 {
        self.dials.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SocketFactory for MockFactory {
    async fn connect(
        &self,
        url: &str,
    ) -> Result<(Box<dyn SocketSink>, Box<dyn SocketStream>), TransportError> {
        self.dials.fetch_add(1, Ordering::SeqCst);
        match self.scripts.lock().pop_front() {
            Some(Script::Accept {
                events,
                writes,
                closed,
            }) => Ok((
                Box::new(MockSink { writes, closed }),
                Box::new(MockStream { events }),
            )),
            Some(Script::Refuse) | None => Err(TransportError::Connect {
                url: url.to_owned(),
                reason: "connection refused".to_owned(),
            }),
        }
    }
}
