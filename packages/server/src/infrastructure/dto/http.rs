//! HTTP API DTOs.

use serde::{Deserialize, Serialize};

/// A directory entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomDto {
    pub name: String,
    /// RFC 3339
    pub created_at: String,
}

/// Data for a room page: which room, as whom.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomPageDto {
    pub room: String,
    pub username: String,
}

/// Live state of a room, for debugging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomStateDto {
    pub room: String,
    pub occupancy: usize,
    /// `not_started`, `running` or `expired`
    pub countdown: String,
    pub seconds_remaining: u32,
    pub clicks: Vec<ClickCountDto>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClickCountDto {
    pub username: String,
    pub clicks: u64,
}
