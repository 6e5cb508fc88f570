//! Domain-level error types.

use thiserror::Error;

/// Validation failures raised by value object constructors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    #[error("connection id must not be empty")]
    ConnectionIdEmpty,

    #[error("role must not be empty")]
    RoleEmpty,

    #[error("role is too long (max {max}, got {actual})")]
    RoleTooLong { max: usize, actual: usize },

    #[error("room id must not be empty")]
    RoomIdEmpty,

    #[error("room id is too long (max {max}, got {actual})")]
    RoomIdTooLong { max: usize, actual: usize },

    #[error("username must not be empty")]
    DisplayNameEmpty,

    #[error("username is too long (max {max}, got {actual})")]
    DisplayNameTooLong { max: usize, actual: usize },

    #[error("invalid language code '{0}': expected two letters")]
    InvalidLanguageCode(String),

    #[error("text must not be empty")]
    TextEmpty,

    #[error("text is too long (max {max} characters, got {actual})")]
    TextTooLong { max: usize, actual: usize },
}

/// Errors returned by the in-process repositories.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("connection '{0}' is already registered")]
    DuplicateConnection(String),

    #[error("connection '{0}' not found")]
    ConnectionNotFound(String),
}

/// Errors returned when pushing a message to a single connection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    #[error("client '{0}' not found")]
    ClientNotFound(String),

    #[error("channel to client '{0}' is closed")]
    ChannelClosed(String),
}

/// Errors surfaced by the external translation provider.
#[derive(Debug, Error)]
pub enum TranslationError {
    #[error("translation provider is not configured")]
    NotConfigured,

    #[error("translation request failed: {0}")]
    Request(String),

    #[error("translation provider returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("translation provider returned an empty result")]
    EmptyResponse,
}
