//! Transport configuration.

use std::time::Duration;

/// Settings for the reconnecting WebSocket transport.
///
/// Reconnection uses a fixed delay: every retry waits `reconnect_interval`,
/// with no backoff or jitter. `max_reconnect_attempts` bounds consecutive
/// failures; a successful open resets the budget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportConfig {
    /// WebSocket endpoint, e.g. `ws://localhost:31415`.
    pub url: String,
    /// Delay between the loss of a connection and the next attempt.
    pub reconnect_interval: Duration,
    /// Consecutive failed attempts tolerated before the transport gives up.
    pub max_reconnect_attempts: u32,
}

impl TransportConfig {
    pub const DEFAULT_RECONNECT_INTERVAL: Duration = Duration::from_millis(5000);
    pub const DEFAULT_MAX_RECONNECT_ATTEMPTS: u32 = 10;

    /// Config for `url` with default reconnect policy.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            reconnect_interval: Self::DEFAULT_RECONNECT_INTERVAL,
            max_reconnect_attempts: Self::DEFAULT_MAX_RECONNECT_ATTEMPTS,
        }
    }
}
