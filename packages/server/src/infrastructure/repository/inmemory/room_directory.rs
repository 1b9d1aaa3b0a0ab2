//! InMemory Room Directory 実装

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{Room, RoomDirectoryRepository, RoomName, Timestamp};

/// Append-only list of room records.
#[derive(Debug, Default)]
pub struct InMemoryRoomDirectoryRepository {
    rooms: Mutex<Vec<Room>>,
}

impl InMemoryRoomDirectoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RoomDirectoryRepository for InMemoryRoomDirectoryRepository {
    async fn create_room(&self, name: RoomName, created_at: Timestamp) -> Room {
        let room = Room::new(name, created_at);
        self.rooms.lock().await.push(room.clone());
        tracing::debug!("Room '{}' added to directory", room.name);
        room
    }

    async fn list_rooms(&self) -> Vec<Room> {
        self.rooms.lock().await.clone()
    }
}
