//! UseCase: ルームのカウントダウン実行
//!
//! Each started room gets one background task that advances its countdown
//! once per tick interval until it expires. Task handles are kept per room
//! so callers can await a round deterministically.

use std::{collections::HashMap, sync::Arc, time::Duration};

use tokio::{sync::Mutex, task::JoinHandle};

use crate::domain::{CountdownStep, GameRoomRepository, RoomName};

/// Supervises the countdown task of every room.
pub struct RunCountdownUseCase {
    repository: Arc<dyn GameRoomRepository>,
    tick_interval: Duration,
    tasks: Mutex<HashMap<RoomName, JoinHandle<()>>>,
}

impl RunCountdownUseCase {
    pub fn new(repository: Arc<dyn GameRoomRepository>, tick_interval: Duration) -> Self {
        Self {
            repository,
            tick_interval,
            tasks: Mutex::new(HashMap::new()),
        }
    }

    /// Spawn the countdown task of `room`.
    ///
    /// Callers spawn only after winning the room's check-and-set start, so
    /// at most one task per room ever exists. Handles of rounds that have
    /// already finished are dropped here, so the map only holds running
    /// rounds and rounds nobody has awaited yet.
    pub async fn spawn(&self, room: RoomName) {
        let handle = tokio::spawn(run_countdown(
            self.repository.clone(),
            room.clone(),
            self.tick_interval,
        ));
        let mut tasks = self.tasks.lock().await;
        tasks.retain(|_, task| !task.is_finished());
        tasks.insert(room, handle);
    }

    /// Wait for the countdown task of `room` to finish.
    ///
    /// Returns `false` if no task was spawned for the room or it has
    /// already been awaited.
    pub async fn wait(&self, room: &RoomName) -> bool {
        let handle = self.tasks.lock().await.remove(room);
        match handle {
            Some(handle) => {
                if let Err(e) = handle.await {
                    tracing::error!("Countdown task of room '{}' failed: {}", room, e);
                }
                true
            }
            None => false,
        }
    }
}

async fn run_countdown(
    repository: Arc<dyn GameRoomRepository>,
    room: RoomName,
    tick_interval: Duration,
) {
    tracing::info!("Countdown started in room '{}'", room);
    loop {
        match repository.advance_countdown(&room).await {
            CountdownStep::Tick(seconds) => {
                tracing::trace!("Room '{}': {}s left", room, seconds);
                tokio::time::sleep(tick_interval).await;
            }
            CountdownStep::Expired => {
                tracing::info!("Countdown expired in room '{}'", room);
                break;
            }
            CountdownStep::Idle => {
                tracing::warn!("Countdown task of room '{}' found nothing to run", room);
                break;
            }
        }
    }
}
