//! UI layer: HTTP/WebSocket surface of the relay.

pub mod error;
pub mod handler;
mod server;
pub mod signal;
pub mod state;

pub use server::Server;
pub use state::{AppParts, AppState};
