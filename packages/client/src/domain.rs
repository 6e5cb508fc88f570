//! Domain logic for client-side operations.
//!
//! Pure functions only, so the reconnect policy and the messages the client
//! emits can be checked without a server.

use dashka_server::infrastructure::dto::{
    http::TranslateResponse,
    websocket::{ClientMessage, TranslationPayload},
};
use serde_json::Map;

use crate::{error::ClientError, session::SessionOptions};

/// Check if the client should exit immediately based on the error type.
///
/// A handshake refused with a 4xx status will be refused again on retry.
pub fn should_exit_immediately(error: &ClientError) -> bool {
    matches!(error, ClientError::HandshakeRejected { status } if (400..500).contains(status))
}

/// Check if the client should attempt to reconnect.
///
/// `current_attempt` is the number of failed attempts so far.
pub fn should_attempt_reconnect(
    error: &ClientError,
    current_attempt: u32,
    max_attempts: u32,
) -> bool {
    if should_exit_immediately(error) {
        return false;
    }

    current_attempt < max_attempts
}

/// Messages sent right after connecting: the role, then the room if any.
pub fn handshake_messages(options: &SessionOptions) -> Vec<ClientMessage> {
    let mut messages = vec![ClientMessage::SetRole {
        role: options.role.clone(),
    }];

    if let Some(room) = &options.room {
        messages.push(ClientMessage::JoinRoom {
            room: room.clone(),
            username: options.username.clone(),
        });
    }

    messages
}

/// Turn a translation result into the message shared with the room.
///
/// The HTTP API answers with lower-case codes; the relay uses upper case.
pub fn translation_message(response: &TranslateResponse) -> ClientMessage {
    ClientMessage::Translation(TranslationPayload {
        original: response.original_text.clone(),
        translation: response.translated_text.clone(),
        from: response.source_language.to_ascii_uppercase(),
        to: response.target_language.to_ascii_uppercase(),
        extra: Map::new(),
    })
}
