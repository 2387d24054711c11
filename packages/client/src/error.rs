//! Error types for the Parley client.

use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// The server answered the WebSocket handshake with an HTTP error
    #[error("Server rejected the connection: {0}")]
    ServerRejected(String),

    /// Connection error
    #[error("Connection error: {0}")]
    ConnectionError(String),
}
