//! UseCase: ルーム状態取得

use std::sync::Arc;

use crate::domain::{GameRoomRepository, RoomName, RoomSnapshot};

/// ルーム状態取得のユースケース
pub struct GetRoomStateUseCase {
    repository: Arc<dyn GameRoomRepository>,
}

impl GetRoomStateUseCase {
    pub fn new(repository: Arc<dyn GameRoomRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, room: &RoomName) -> RoomSnapshot {
        self.repository.snapshot(room).await
    }
}
