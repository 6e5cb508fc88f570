//! WebSocket envelope DTOs.
//!
//! Every frame is a JSON object discriminated by `type`. Inbound frames with a
//! recognised `type` decode into [`ClientMessage`]; any other object is kept
//! as-is and relayed as a passthrough.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Keys the server owns on relayed messages; client-supplied values are dropped.
pub const SERVER_OWNED_KEYS: &[&str] = &["type", "sender_id", "sender_role", "timestamp", "username"];

const KNOWN_CLIENT_TYPES: &[&str] = &["set_role", "join_room", "translation"];

/// Why an inbound frame was dropped.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("invalid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),

    #[error("message is not a JSON object")]
    NotAnObject,

    #[error("invalid '{message_type}' message: {source}")]
    InvalidFields {
        message_type: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Recognised client → server messages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    SetRole { role: String },
    JoinRoom { room: String, username: String },
    Translation(TranslationPayload),
}

/// Body of a client `translation` message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationPayload {
    pub original: String,
    pub translation: String,
    pub from: String,
    pub to: String,
    /// Any further fields the client attached; relayed untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A decoded inbound frame.
#[derive(Debug, Clone, PartialEq)]
pub enum InboundMessage {
    Known(ClientMessage),
    /// Object with an unrecognised, missing or non-string `type`.
    Passthrough(Map<String, Value>),
}

impl InboundMessage {
    pub fn parse(text: &str) -> Result<Self, ProtocolError> {
        let value: Value = serde_json::from_str(text).map_err(ProtocolError::InvalidJson)?;
        let Value::Object(object) = value else {
            return Err(ProtocolError::NotAnObject);
        };

        let message_type = object
            .get("type")
            .and_then(Value::as_str)
            .filter(|t| KNOWN_CLIENT_TYPES.contains(t))
            .map(str::to_owned);

        match message_type {
            Some(message_type) => serde_json::from_value(Value::Object(object))
                .map(InboundMessage::Known)
                .map_err(|source| ProtocolError::InvalidFields {
                    message_type,
                    source,
                }),
            None => Ok(InboundMessage::Passthrough(object)),
        }
    }
}

/// Server → client messages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    Welcome {
        client_id: String,
        message: String,
        timestamp: String,
    },
    RoleConfirmed {
        role: String,
        timestamp: String,
    },
    UserJoined(RoomPresence),
    UserLeft(RoomPresence),
    Translation(RelayedTranslation),
}

impl ServerMessage {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Membership change announced to the rest of a room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomPresence {
    pub username: String,
    pub room: String,
    /// Member count after the change.
    pub participants: usize,
    pub timestamp: String,
}

/// A client translation as delivered to the other participants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelayedTranslation {
    pub original: String,
    pub translation: String,
    pub from: String,
    pub to: String,
    /// Sender's display name; present only when the sender is in a room.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    pub sender_id: String,
    pub sender_role: String,
    pub timestamp: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Drop server-owned keys from client-supplied extra fields.
pub fn strip_server_owned_keys(mut extra: Map<String, Value>) -> Map<String, Value> {
    for key in SERVER_OWNED_KEYS {
        extra.remove(*key);
    }
    extra
}
