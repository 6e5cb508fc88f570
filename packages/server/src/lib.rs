//! Dashka realtime translation relay.
//!
//! Clients connect over WebSocket, optionally join a room, and share
//! translation results with every other member. A thin HTTP API proxies text
//! translation to an external provider behind a bounded FIFO result cache.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

pub mod config;
