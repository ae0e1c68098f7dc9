//! Built-in command handlers.
//!
//! Most command families are fielded by whatever registers against the
//! router at wiring time. The dice roller ships here because it needs no
//! game-table state.

pub mod dice;
