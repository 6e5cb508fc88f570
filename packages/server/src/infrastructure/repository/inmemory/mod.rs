//! InMemory Repository 実装

mod connection;
mod room;

pub use connection::InMemoryConnectionRepository;
pub use room::InMemoryRoomRepository;
