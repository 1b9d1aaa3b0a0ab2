//! Domain errors.

use thiserror::Error;

use super::value_object::ConnectionId;

/// Delivery to a single connection failed.
///
/// The connection has already been pruned from its room when this is
/// returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    #[error("Connection '{0}' not found")]
    ConnectionNotFound(ConnectionId),

    #[error("Outbound queue of connection '{0}' is full")]
    QueueFull(ConnectionId),

    #[error("Connection '{0}' is closed")]
    Closed(ConnectionId),

    #[error("Failed to encode message: {0}")]
    Encode(String),
}
