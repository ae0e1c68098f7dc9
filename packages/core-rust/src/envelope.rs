//! Request/response envelopes for the `TableBridge` wire protocol.
//!
//! The controller sends `Command` objects and receives `CommandResponse`
//! objects, correlated by the caller-chosen `id`. Both are plain JSON maps
//! with camelCase keys. The command-type tag travels as the `type` key.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A typed request envelope received from the controller.
///
/// `kind` is the raw command-type tag off the wire. Unknown tags are legal
/// here: shape validation only requires `id` and `type` to be strings and
/// `params` to be present. Whether the tag is executable is the router's
/// concern, not the envelope's.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Command {
    /// Opaque correlation id, chosen by the caller, unique per in-flight request.
    pub id: String,
    /// Command-type tag (wire key `type`).
    #[serde(rename = "type")]
    pub kind: String,
    /// Tag-specific parameters. Required on the wire, but any JSON value is accepted.
    pub params: Value,
}

impl Command {
    #[must_use]
    pub fn new(id: impl Into<String>, kind: impl Into<String>, params: Value) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            params,
        }
    }
}

/// The reply envelope correlated by `id`.
///
/// Exactly one of `data`/`error` is populated, determined by `success`.
/// The `ok`/`failure` constructors are the only way responses are built,
/// which keeps that invariant out of reach of callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandResponse {
    /// Equals the `id` of the command this answers.
    pub id: String,
    pub success: bool,
    /// Tag-specific result value, present iff `success` is true.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub data: Option<Value>,
    /// Human-readable failure description, present iff `success` is false.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error: Option<String>,
}

impl CommandResponse {
    /// Builds a success response carrying `data`.
    #[must_use]
    pub fn ok(id: impl Into<String>, data: Value) -> Self {
        Self {
            id: id.into(),
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// Builds a failure response carrying a human-readable `error`.
    #[must_use]
    pub fn failure(id: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            success: false,
            data: None,
            error: Some(error.into()),
        }
    }
}
