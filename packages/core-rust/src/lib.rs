//! `TableBridge` Core: command envelopes, the command-type set, and wire schemas.

pub mod envelope;
pub mod kind;
pub mod messages;

pub use envelope::{Command, CommandResponse};
pub use kind::{CommandKind, ParseCommandKindError};
