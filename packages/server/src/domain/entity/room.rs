use serde::Serialize;

use crate::domain::value_object::{RoomName, Timestamp};

/// Directory record of a created room.
///
/// Records are independent of live game state: two records with the same
/// name are both listed, and both resolve to the same [`GameRoom`] keyed by
/// that name.
///
/// [`GameRoom`]: super::GameRoom
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Room {
    pub name: RoomName,
    pub created_at: Timestamp,
}

impl Room {
    pub fn new(name: RoomName, created_at: Timestamp) -> Self {
        Self { name, created_at }
    }
}
