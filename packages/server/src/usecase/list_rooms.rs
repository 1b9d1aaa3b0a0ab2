//! UseCase: ルーム一覧取得

use std::sync::Arc;

use crate::domain::{Room, RoomDirectoryRepository};

/// ルーム一覧取得のユースケース
pub struct ListRoomsUseCase {
    directory: Arc<dyn RoomDirectoryRepository>,
}

impl ListRoomsUseCase {
    pub fn new(directory: Arc<dyn RoomDirectoryRepository>) -> Self {
        Self { directory }
    }

    /// Rooms in creation order.
    pub async fn execute(&self) -> Vec<Room> {
        self.directory.list_rooms().await
    }
}
