//! UseCase: プレイヤー切断処理

use std::sync::Arc;

use crate::domain::GameRoomRepository;

use super::ConnectionHandle;

/// プレイヤー切断のユースケース
pub struct DisconnectPlayerUseCase {
    repository: Arc<dyn GameRoomRepository>,
}

impl DisconnectPlayerUseCase {
    pub fn new(repository: Arc<dyn GameRoomRepository>) -> Self {
        Self { repository }
    }

    /// Remove the connection from its room and announce the new occupancy.
    /// Safe to call for a connection already pruned by a failed send.
    ///
    /// Returns the number of connections left in the room.
    pub async fn execute(&self, handle: &ConnectionHandle) -> usize {
        let remaining = self
            .repository
            .remove_connection(&handle.room, &handle.id)
            .await;
        tracing::info!(
            "'{}' left room '{}' ({} connected)",
            handle.username,
            handle.room,
            remaining
        );
        remaining
    }
}
