//! WebSocket relay for the stash API.
//!
//! Clients speak a small JSON action protocol over a WebSocket; every action
//! is fulfilled by calling the REST API, so the relay holds no state of its
//! own and both surfaces always agree.

pub mod dispatch;
pub mod protocol;
pub mod ws;

pub use dispatch::dispatch;
pub use protocol::{Command, Reply, Welcome};
pub use ws::{create_router, RelayState};
