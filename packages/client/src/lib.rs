//! Terminal client for the Dashka translation relay.
//!
//! Typed lines are translated through the server's HTTP API and then shared
//! with the joined room over WebSocket. Room events are rendered as they
//! arrive.

mod domain;
pub mod error;
mod formatter;
mod runner;
mod session;
mod translator;
mod ui;

pub use runner::run_client;
pub use session::SessionOptions;
