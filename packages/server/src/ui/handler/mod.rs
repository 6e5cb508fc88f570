//! Request handlers.

pub mod dispatch;
pub mod http;
pub mod websocket;

pub use http::{
    detect_language, health_check, languages, list_rooms, not_found, room_detail,
    service_descriptor, stats, translate,
};
pub use websocket::websocket_handler;
