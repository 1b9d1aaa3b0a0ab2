//! InMemory Game Room Repository 実装
//!
//! One [`GameRoom`] aggregate per room name, each behind its own lock.
//! The outer map is locked only long enough to look up or create an
//! aggregate; all game operations then hold the room lock, so broadcasts
//! on one room are totally ordered and rooms never block each other.

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{
    domain::{
        ClickTally, Connection, ConnectionId, Countdown, CountdownStep, GameEvent, GameRoom,
        GameRoomRepository, JoinOutcome, MessagePushError, RoomName, RoomSnapshot, Username,
    },
    infrastructure::dto::conversion::encode_event,
};

/// Process-wide registry of live game rooms.
///
/// Rooms are created on first reference and never destroyed.
#[derive(Debug, Default)]
pub struct InMemoryGameRoomRepository {
    rooms: Mutex<HashMap<RoomName, Arc<Mutex<GameRoom>>>>,
}

impl InMemoryGameRoomRepository {
    pub fn new() -> Self {
        Self::default()
    }

    async fn room(&self, name: &RoomName) -> Arc<Mutex<GameRoom>> {
        let mut rooms = self.rooms.lock().await;
        rooms
            .entry(name.clone())
            .or_insert_with(|| {
                tracing::debug!("Game state for room '{}' created", name);
                Arc::new(Mutex::new(GameRoom::new(name.clone())))
            })
            .clone()
    }

    /// Look up a room without creating it.
    async fn existing_room(&self, name: &RoomName) -> Option<Arc<Mutex<GameRoom>>> {
        self.rooms.lock().await.get(name).cloned()
    }
}

fn broadcast_locked(room: &mut GameRoom, event: GameEvent) -> Vec<ConnectionId> {
    match encode_event(event) {
        Ok(message) => room.broadcast(&message),
        Err(e) => {
            tracing::error!("Failed to encode event for room '{}': {}", room.name(), e);
            Vec::new()
        }
    }
}

fn push_locked(
    room: &mut GameRoom,
    id: &ConnectionId,
    event: GameEvent,
) -> Result<(), MessagePushError> {
    let message = encode_event(event).map_err(|e| MessagePushError::Encode(e.to_string()))?;
    room.push_to(id, &message)
}

#[async_trait]
impl GameRoomRepository for InMemoryGameRoomRepository {
    async fn join(
        &self,
        room: &RoomName,
        connection: Connection,
        countdown_secs: u32,
    ) -> JoinOutcome {
        let room = self.room(room).await;
        let mut room = room.lock().await;

        let outcome = room.join(connection, countdown_secs);
        broadcast_locked(&mut room, GameEvent::UserCount(outcome.occupancy));

        if let Some(seconds) = outcome.late_join_snapshot
            && let Err(e) = push_locked(
                &mut room,
                &outcome.connection_id,
                GameEvent::Timer(seconds),
            )
        {
            tracing::warn!("Failed to send timer snapshot: {}", e);
        }

        outcome
    }

    async fn register_connection(&self, room: &RoomName, connection: Connection) -> usize {
        let room = self.room(room).await;
        let mut room = room.lock().await;

        let occupancy = room.register(connection);
        broadcast_locked(&mut room, GameEvent::UserCount(occupancy));
        room.occupancy()
    }

    async fn remove_connection(&self, room: &RoomName, id: &ConnectionId) -> usize {
        let room = self.room(room).await;
        let mut room = room.lock().await;

        let occupancy = room.remove(id);
        broadcast_locked(&mut room, GameEvent::UserCount(occupancy));
        room.occupancy()
    }

    async fn occupancy(&self, room: &RoomName) -> usize {
        match self.existing_room(room).await {
            Some(room) => room.lock().await.occupancy(),
            None => 0,
        }
    }

    async fn broadcast(&self, room: &RoomName, event: GameEvent) -> Vec<ConnectionId> {
        let room = self.room(room).await;
        let mut room = room.lock().await;
        broadcast_locked(&mut room, event)
    }

    async fn push_to(
        &self,
        room: &RoomName,
        id: &ConnectionId,
        event: GameEvent,
    ) -> Result<(), MessagePushError> {
        let room = self.room(room).await;
        let mut room = room.lock().await;
        push_locked(&mut room, id, event)
    }

    async fn record_click(&self, room: &RoomName, user: Username) -> u64 {
        self.room(room).await.lock().await.record_click(user)
    }

    async fn click_tally(&self, room: &RoomName) -> ClickTally {
        match self.existing_room(room).await {
            Some(room) => room.lock().await.tally().clone(),
            None => ClickTally::default(),
        }
    }

    async fn start_countdown(&self, room: &RoomName, seconds: u32) -> bool {
        self.room(room).await.lock().await.start_countdown(seconds)
    }

    async fn advance_countdown(&self, room: &RoomName) -> CountdownStep {
        let room = self.room(room).await;
        let mut room = room.lock().await;

        let step = room.tick();
        match step {
            CountdownStep::Tick(seconds) => {
                broadcast_locked(&mut room, GameEvent::Timer(seconds));
            }
            CountdownStep::Expired => {
                let winner = room.tally().winner().cloned();
                tracing::info!(
                    "Round in room '{}' finished, winner: {:?}",
                    room.name(),
                    winner.as_ref().map(Username::as_str)
                );
                broadcast_locked(&mut room, GameEvent::Winner(winner));
            }
            CountdownStep::Idle => {}
        }
        step
    }

    async fn countdown(&self, room: &RoomName) -> Countdown {
        match self.existing_room(room).await {
            Some(room) => room.lock().await.countdown(),
            None => Countdown::default(),
        }
    }

    /// Unknown rooms read as empty and are not created.
    async fn snapshot(&self, room: &RoomName) -> RoomSnapshot {
        match self.existing_room(room).await {
            Some(room) => room.lock().await.snapshot(),
            None => GameRoom::new(room.clone()).snapshot(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    // ========================================
    // 【何をテストするか】
    // - 接続の登録・削除と接続数のブロードキャスト
    // - ブロードキャスト中の送信失敗による接続の削除
    // - カウントダウンの開始（一度きり）と tick / 勝者の通知
    // - 途中参加者への残り秒数の通知
    // - 並行クリックの集計
    // ========================================

    fn connection(name: &str) -> (Connection, mpsc::Receiver<String>) {
        let (tx, rx) = mpsc::channel(64);
        (Connection::new(Username::from(name), tx), rx)
    }

    fn drain(rx: &mut mpsc::Receiver<String>) -> Vec<String> {
        let mut messages = Vec::new();
        while let Ok(message) = rx.try_recv() {
            messages.push(message);
        }
        messages
    }

    fn user_count(count: usize) -> String {
        format!(r#"{{"type":"user_count","data":{}}}"#, count)
    }

    fn timer(seconds: u32) -> String {
        format!(r#"{{"type":"timer","data":{}}}"#, seconds)
    }

    #[tokio::test]
    async fn test_registrations_broadcast_increasing_occupancy() {
        // テスト項目: 3 接続を登録すると既存メンバーに 1, 2, 3 の接続数が通知される
        // given (前提条件):
        let repo = InMemoryGameRoomRepository::new();
        let room = RoomName::from("lobby");
        let (alice, mut rx_alice) = connection("alice");
        let (bob, mut rx_bob) = connection("bob");
        let (carol, mut rx_carol) = connection("carol");

        // when (操作):
        repo.register_connection(&room, alice).await;
        repo.register_connection(&room, bob).await;
        repo.register_connection(&room, carol).await;

        // then (期待する結果):
        assert_eq!(
            drain(&mut rx_alice),
            vec![user_count(1), user_count(2), user_count(3)]
        );
        assert_eq!(drain(&mut rx_bob), vec![user_count(2), user_count(3)]);
        assert_eq!(drain(&mut rx_carol), vec![user_count(3)]);
        assert_eq!(repo.occupancy(&room).await, 3);
    }

    #[tokio::test]
    async fn test_removal_broadcasts_decremented_occupancy() {
        // テスト項目: 接続を削除すると残りのメンバーに減った接続数が通知される
        // given (前提条件):
        let repo = InMemoryGameRoomRepository::new();
        let room = RoomName::from("lobby");
        let (alice, mut rx_alice) = connection("alice");
        let (bob, mut rx_bob) = connection("bob");
        let bob_id = bob.id;
        repo.register_connection(&room, alice).await;
        repo.register_connection(&room, bob).await;
        drain(&mut rx_alice);
        drain(&mut rx_bob);

        // when (操作):
        let remaining = repo.remove_connection(&room, &bob_id).await;

        // then (期待する結果):
        assert_eq!(remaining, 1);
        assert_eq!(drain(&mut rx_alice), vec![user_count(1)]);
        assert!(drain(&mut rx_bob).is_empty());
    }

    #[tokio::test]
    async fn test_remove_absent_connection_is_noop() {
        // テスト項目: 存在しない接続の削除は接続数を変えない（冪等性）
        // given (前提条件):
        let repo = InMemoryGameRoomRepository::new();
        let room = RoomName::from("lobby");
        let (alice, _rx) = connection("alice");
        repo.register_connection(&room, alice).await;

        // when (操作):
        let remaining = repo
            .remove_connection(&room, &ConnectionId::generate())
            .await;

        // then (期待する結果):
        assert_eq!(remaining, 1);
    }

    #[tokio::test]
    async fn test_failed_send_prunes_connection_before_broadcast_returns() {
        // テスト項目: 送信に失敗した接続はブロードキャスト完了時点で既に削除されている
        // given (前提条件):
        let repo = InMemoryGameRoomRepository::new();
        let room = RoomName::from("lobby");
        let (alice, rx_alice) = connection("alice");
        let (bob, mut rx_bob) = connection("bob");
        let alice_id = alice.id;
        repo.register_connection(&room, alice).await;
        repo.register_connection(&room, bob).await;
        drop(rx_alice);
        drain(&mut rx_bob);

        // when (操作):
        let pruned = repo.broadcast(&room, GameEvent::Timer(5)).await;

        // then (期待する結果):
        assert_eq!(pruned, vec![alice_id]);
        assert_eq!(repo.occupancy(&room).await, 1);
        assert_eq!(drain(&mut rx_bob), vec![timer(5)]);
    }

    #[tokio::test]
    async fn test_reading_unknown_room_does_not_create_it() {
        // テスト項目: 存在しないルームの読み取りは空の状態を返し、ルームを作成しない
        // given (前提条件):
        let repo = InMemoryGameRoomRepository::new();

        // when (操作):
        let mut snapshots = Vec::new();
        for i in 0..100 {
            snapshots.push(repo.snapshot(&RoomName::from(format!("ghost-{}", i))).await);
        }
        let occupancy = repo.occupancy(&RoomName::from("ghost")).await;
        let countdown = repo.countdown(&RoomName::from("ghost")).await;
        let tally = repo.click_tally(&RoomName::from("ghost")).await;

        // then (期待する結果):
        assert!(snapshots.iter().all(|s| s.occupancy == 0
            && s.countdown == Countdown::NotStarted
            && s.tally.is_empty()));
        assert_eq!(snapshots[7].name.as_str(), "ghost-7");
        assert_eq!(occupancy, 0);
        assert_eq!(countdown, Countdown::NotStarted);
        assert!(tally.is_empty());
        assert!(repo.rooms.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_rooms_are_independent() {
        // テスト項目: 別のルームのブロードキャストは届かない
        // given (前提条件):
        let repo = InMemoryGameRoomRepository::new();
        let (alice, mut rx_alice) = connection("alice");
        let (bob, mut rx_bob) = connection("bob");
        repo.register_connection(&RoomName::from("red"), alice).await;
        repo.register_connection(&RoomName::from("blue"), bob).await;
        drain(&mut rx_alice);
        drain(&mut rx_bob);

        // when (操作):
        repo.broadcast(&RoomName::from("red"), GameEvent::Timer(9))
            .await;

        // then (期待する結果):
        assert_eq!(drain(&mut rx_alice), vec![timer(9)]);
        assert!(drain(&mut rx_bob).is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_start_countdown_starts_once() {
        // テスト項目: 並行して開始を要求してもカウントダウンは一度だけ開始される
        // given (前提条件):
        let repo = Arc::new(InMemoryGameRoomRepository::new());
        let room = RoomName::from("lobby");

        // when (操作):
        let handles: Vec<_> = (0..32)
            .map(|_| {
                let repo = repo.clone();
                let room = room.clone();
                tokio::spawn(async move { repo.start_countdown(&room, 30).await })
            })
            .collect();
        let mut started = 0;
        for handle in handles {
            if handle.await.unwrap() {
                started += 1;
            }
        }

        // then (期待する結果):
        assert_eq!(started, 1);
        assert_eq!(
            repo.countdown(&room).await,
            Countdown::Running {
                seconds_remaining: 30
            }
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_clicks_are_all_counted() {
        // テスト項目: 同じユーザーからの N 回の並行クリックは正確に N 回と数えられる
        // given (前提条件):
        let repo = Arc::new(InMemoryGameRoomRepository::new());
        let room = RoomName::from("lobby");
        let n = 500;

        // when (操作):
        let handles: Vec<_> = (0..n)
            .map(|_| {
                let repo = repo.clone();
                let room = room.clone();
                tokio::spawn(async move { repo.record_click(&room, Username::from("alice")).await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap();
        }

        // then (期待する結果):
        let tally = repo.click_tally(&room).await;
        assert_eq!(tally.count(&Username::from("alice")), n);
    }

    #[tokio::test]
    async fn test_countdown_ticks_then_announces_winner_once() {
        // テスト項目: カウントダウンは 30..1 を通知した後、勝者を一度だけ通知する
        // given (前提条件):
        let repo = InMemoryGameRoomRepository::new();
        let room = RoomName::from("lobby");
        let (alice, mut rx) = connection("alice");
        repo.register_connection(&room, alice).await;
        repo.record_click(&room, Username::from("alice")).await;
        repo.start_countdown(&room, 30).await;
        drain(&mut rx);

        // when (操作):
        let mut steps = Vec::new();
        loop {
            let step = repo.advance_countdown(&room).await;
            steps.push(step);
            if step == CountdownStep::Expired {
                break;
            }
        }
        let after = repo.advance_countdown(&room).await;

        // then (期待する結果):
        let expected_ticks: Vec<CountdownStep> = (1..=30).rev().map(CountdownStep::Tick).collect();
        assert_eq!(steps[..30], expected_ticks[..]);
        assert_eq!(steps.len(), 31);
        assert_eq!(after, CountdownStep::Idle);

        let messages = drain(&mut rx);
        let mut expected: Vec<String> = (1..=30).rev().map(timer).collect();
        expected.push(r#"{"type":"winner","data":"alice"}"#.to_string());
        assert_eq!(messages, expected);
    }

    #[tokio::test]
    async fn test_expiry_without_clicks_announces_empty_winner() {
        // テスト項目: 誰もクリックしなかった場合は空文字列の勝者が通知される
        // given (前提条件):
        let repo = InMemoryGameRoomRepository::new();
        let room = RoomName::from("quiet");
        let (alice, mut rx) = connection("alice");
        repo.register_connection(&room, alice).await;
        repo.start_countdown(&room, 0).await;
        drain(&mut rx);

        // when (操作):
        let step = repo.advance_countdown(&room).await;

        // then (期待する結果):
        assert_eq!(step, CountdownStep::Expired);
        assert_eq!(
            drain(&mut rx),
            vec![r#"{"type":"winner","data":""}"#.to_string()]
        );
    }

    #[tokio::test]
    async fn test_late_joiner_alone_receives_timer_snapshot() {
        // テスト項目: 残り 12 秒で参加した接続だけが即座に {"type":"timer","data":12} を受け取る
        // given (前提条件):
        let repo = InMemoryGameRoomRepository::new();
        let room = RoomName::from("lobby");
        let (alice, mut rx_alice) = connection("alice");
        let first = repo.join(&room, alice, 30).await;
        for _ in 0..18 {
            repo.advance_countdown(&room).await;
        }
        drain(&mut rx_alice);

        // when (操作):
        let (bob, mut rx_bob) = connection("bob");
        let second = repo.join(&room, bob, 30).await;

        // then (期待する結果):
        assert!(first.countdown_started);
        assert!(!second.countdown_started);
        assert_eq!(second.late_join_snapshot, Some(12));
        assert_eq!(drain(&mut rx_bob), vec![user_count(2), timer(12)]);
        assert_eq!(drain(&mut rx_alice), vec![user_count(2)]);
    }

    #[tokio::test]
    async fn test_join_after_expiry_receives_zero() {
        // テスト項目: ラウンド終了後の参加者には残り 0 秒が通知され、再開はされない
        // given (前提条件):
        let repo = InMemoryGameRoomRepository::new();
        let room = RoomName::from("lobby");
        let (alice, _rx_alice) = connection("alice");
        repo.join(&room, alice, 1).await;
        repo.advance_countdown(&room).await;
        repo.advance_countdown(&room).await;

        // when (操作):
        let (bob, mut rx_bob) = connection("bob");
        let outcome = repo.join(&room, bob, 1).await;

        // then (期待する結果):
        assert!(!outcome.countdown_started);
        assert_eq!(repo.countdown(&room).await, Countdown::Expired);
        assert_eq!(drain(&mut rx_bob), vec![user_count(2), timer(0)]);
    }
}
