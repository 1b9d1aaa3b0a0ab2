//! UseCase: クリック集計

use std::sync::Arc;

use crate::domain::{GameRoomRepository, RoomName, Username};

/// クリック記録のユースケース
pub struct RecordClickUseCase {
    repository: Arc<dyn GameRoomRepository>,
}

impl RecordClickUseCase {
    pub fn new(repository: Arc<dyn GameRoomRepository>) -> Self {
        Self { repository }
    }

    /// Count one click signal from `user` in `room`; returns the user's
    /// total. Clicks are never deduplicated.
    pub async fn execute(&self, room: &RoomName, user: Username) -> u64 {
        let total = self.repository.record_click(room, user.clone()).await;
        tracing::debug!("Click from '{}' in room '{}' (total {})", user, room, total);
        total
    }
}
