//! UseCase: ルーム作成

use std::sync::Arc;

use clickrush_shared::time::Clock;

use crate::domain::{Room, RoomDirectoryRepository, RoomName, Timestamp};

/// ルーム作成のユースケース
pub struct CreateRoomUseCase {
    directory: Arc<dyn RoomDirectoryRepository>,
    clock: Arc<dyn Clock>,
}

impl CreateRoomUseCase {
    pub fn new(directory: Arc<dyn RoomDirectoryRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { directory, clock }
    }

    /// Append a room record stamped with the current time.
    ///
    /// Names are not deduplicated: records sharing a name share the same
    /// live game state.
    pub async fn execute(&self, name: RoomName) -> Room {
        let created_at = Timestamp::new(self.clock.now_millis());
        let room = self.directory.create_room(name, created_at).await;
        tracing::info!("Room '{}' created", room.name);
        room
    }
}
