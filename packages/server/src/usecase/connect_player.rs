//! UseCase: プレイヤー接続処理
//!
//! ### 何をテストしているか
//! - 接続がルームに登録され、接続ハンドルが返されること
//! - 最初の参加者だけがカウントダウンタスクを起動すること
//! - 並行して参加してもカウントダウンは一度だけ実行されること

use std::sync::Arc;

use crate::domain::{
    Connection, ConnectionId, GameRoomRepository, PusherChannel, RoomName, Username,
};

use super::RunCountdownUseCase;

/// Identifies one open connection for the rest of its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionHandle {
    pub id: ConnectionId,
    pub room: RoomName,
    pub username: Username,
}

/// プレイヤー接続のユースケース
pub struct ConnectPlayerUseCase {
    repository: Arc<dyn GameRoomRepository>,
    countdown: Arc<RunCountdownUseCase>,
    countdown_secs: u32,
}

impl ConnectPlayerUseCase {
    pub fn new(
        repository: Arc<dyn GameRoomRepository>,
        countdown: Arc<RunCountdownUseCase>,
        countdown_secs: u32,
    ) -> Self {
        Self {
            repository,
            countdown,
            countdown_secs,
        }
    }

    /// Register a new connection in `room`.
    ///
    /// Occupancy is announced to the room, the countdown is started if this
    /// is the room's first join, and a late joiner gets the current timer
    /// value.
    pub async fn execute(
        &self,
        room: RoomName,
        username: Username,
        sender: PusherChannel,
    ) -> ConnectionHandle {
        let connection = Connection::new(username.clone(), sender);
        let outcome = self
            .repository
            .join(&room, connection, self.countdown_secs)
            .await;

        tracing::info!(
            "'{}' joined room '{}' ({} connected)",
            username,
            room,
            outcome.occupancy
        );

        if outcome.countdown_started {
            self.countdown.spawn(room.clone()).await;
        }

        ConnectionHandle {
            id: outcome.connection_id,
            room,
            username,
        }
    }
}
