//! WebSocket message DTOs.

use serde::{Deserialize, Serialize};

/// Message sent from the server to a connection.
///
/// Serialized as `{"type": "<kind>", "data": <value>}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum ServerMessage {
    UserCount(usize),
    Timer(u32),
    Winner(String),
}

/// Message accepted from a connection.
///
/// Only `{"type": "signal"}` is recognized; extra fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    Signal,
}

impl ClientMessage {
    /// Decode an inbound frame.
    pub fn parse(payload: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(payload)
    }
}
