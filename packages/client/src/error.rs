//! Client-side errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// The server answered the WebSocket upgrade with an HTTP error status.
    #[error("Server rejected the connection with HTTP {status}")]
    HandshakeRejected { status: u16 },

    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// `POST /translate` failed; the session keeps running.
    #[error("Translation failed: {0}")]
    TranslateError(String),
}
