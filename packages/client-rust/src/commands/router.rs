//! Command routing: dispatches a `Command` to its registered handler by type tag.

use std::future::Future;
use std::sync::Arc;

use dashmap::DashMap;
use futures_util::future::BoxFuture;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tablebridge_core::{Command, CommandKind, CommandResponse};

/// A type-erased handler: params in, future of result-or-failure out.
type BoxedHandler = Arc<dyn Fn(Value) -> BoxFuture<'static, anyhow::Result<Value>> + Send + Sync>;

/// Maps command-type tags to handlers and turns "run this command" into
/// "produce a response, never failing".
///
/// Handlers are registered once at startup by the wiring; registering a
/// second handler for the same tag silently replaces the first
/// (last-write-wins). Callers that want to assert uniqueness can check
/// [`CommandRouter::has_handler`] before registering.
///
/// [`CommandRouter::execute`] is the load-bearing contract: every outcome,
/// including unknown tags and handler failures, comes back as a
/// [`CommandResponse`] envelope, so the transport can always serialize the
/// result without extra error handling.
#[derive(Default)]
pub struct CommandRouter {
    handlers: DashMap<CommandKind, BoxedHandler>,
}

impl CommandRouter {
    /// Creates an empty router.
    #[must_use]
    pub fn new() -> Self {
        Self {
            handlers: DashMap::new(),
        }
    }

    /// Registers `handler` for `kind`, overwriting any prior handler.
    pub fn register<F, Fut>(&self, kind: CommandKind, handler: F)
    where
        F: Fn(Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<Value>> + Send + 'static,
    {
        self.handlers
            .insert(kind, Arc::new(move |params| Box::pin(handler(params))));
    }

    /// Registers a typed handler for `kind`.
    ///
    /// The adapter deserializes `params` into `P` and serializes the
    /// handler's `R` back into the envelope. A params shape mismatch is a
    /// handler failure (a failure response), never a crash.
    pub fn register_typed<P, R, F, Fut>(&self, kind: CommandKind, handler: F)
    where
        P: DeserializeOwned + Send,
        R: Serialize,
        F: Fn(P) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<R>> + Send + 'static,
    {
        let handler = Arc::new(handler);
        self.register(kind, move |params: Value| {
            let handler = Arc::clone(&handler);
            async move {
                let params: P = serde_json::from_value(params)
                    .map_err(|err| anyhow::anyhow!("invalid params for {kind}: {err}"))?;
                let result = handler(params).await?;
                Ok(serde_json::to_value(result)?)
            }
        });
    }

    /// Whether a handler is currently registered for `kind`.
    #[must_use]
    pub fn has_handler(&self, kind: CommandKind) -> bool {
        self.handlers.contains_key(&kind)
    }

    /// Executes `command` against its registered handler.
    ///
    /// Never fails: an unrecognized or unregistered tag and any handler
    /// failure all come back as failure responses carrying the command's
    /// `id`. The handler is invoked exactly once with `command.params`.
    pub async fn execute(&self, command: Command) -> CommandResponse {
        let Ok(kind) = command.kind.parse::<CommandKind>() else {
            return CommandResponse::failure(
                command.id,
                format!("Unknown command type: {}", command.kind),
            );
        };

        // Clone the Arc out of the map so no shard lock is held across the await.
        let Some(handler) = self.handlers.get(&kind).map(|entry| Arc::clone(entry.value()))
        else {
            return CommandResponse::failure(
                command.id,
                format!("Unknown command type: {}", command.kind),
            );
        };

        match handler(command.params).await {
            Ok(data) => CommandResponse::ok(command.id, data),
            Err(err) => CommandResponse::failure(command.id, err.to_string()),
        }
    }
}
