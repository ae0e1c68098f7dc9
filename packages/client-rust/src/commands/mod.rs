//! Command dispatch: the router and the built-in handlers.

pub mod handlers;
pub mod router;

pub use router::CommandRouter;
