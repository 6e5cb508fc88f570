//! Repository 実装
//!
//! - `inmemory`: プロセス内 HashMap を使った実装（揮発性）

pub mod inmemory;

pub use inmemory::{InMemoryConnectionRepository, InMemoryRoomRepository};
