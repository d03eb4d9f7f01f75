//! envgate: environment directory and session handoff manager.
//!
//! Users sign in, pick one of their tenant environments (or create one) and
//! are handed off to the builder with that environment selected. The
//! selection persists locally between runs.

pub use envgate_cli as cli;
pub use envgate_client as client;
pub use envgate_core as core;

/// Version of envgate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
