//! The bridge binary: connects to a controller endpoint, answers its
//! commands, and keeps the connection alive until Ctrl-C.

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tablebridge_client::commands::handlers::dice;
use tablebridge_client::{Bridge, CommandRouter, TransportConfig, WebSocketClient};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "bridge", about = "TableBridge command bridge", version)]
struct Args {
    /// Controller WebSocket endpoint.
    #[arg(long, env = "TABLEBRIDGE_URL", default_value = "ws://localhost:31415")]
    url: String,

    /// Fixed delay between reconnect attempts, in milliseconds.
    #[arg(long, env = "TABLEBRIDGE_RECONNECT_INTERVAL_MS", default_value_t = 5000)]
    reconnect_interval_ms: u64,

    /// Consecutive failed attempts tolerated before giving up.
    #[arg(long, env = "TABLEBRIDGE_MAX_RECONNECT_ATTEMPTS", default_value_t = 10)]
    max_reconnect_attempts: u32,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = TransportConfig {
        url: args.url,
        reconnect_interval: Duration::from_millis(args.reconnect_interval_ms),
        max_reconnect_attempts: args.max_reconnect_attempts,
    };

    let router = Arc::new(CommandRouter::new());
    dice::register(&router);

    let bridge = Bridge::new(router, WebSocketClient::new(config));
    bridge.wire();
    bridge.start();

    tokio::signal::ctrl_c().await?;
    info!("shutting down");
    bridge.shutdown();
    Ok(())
}
