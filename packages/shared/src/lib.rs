//! Utilities shared by the Dashka server and client.

pub mod logger;
pub mod time;
