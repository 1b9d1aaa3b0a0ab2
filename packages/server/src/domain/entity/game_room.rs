use std::collections::HashMap;

use tokio::sync::mpsc::{self, error::TrySendError};

use crate::domain::{
    error::MessagePushError,
    value_object::{ConnectionId, RoomName, Username},
};

use super::{ClickTally, Countdown, CountdownStep};

/// Outbound queue of one connection, carrying encoded messages.
///
/// Queues are bounded; delivery uses `try_send` so a slow peer never
/// blocks the room.
pub type PusherChannel = mpsc::Sender<String>;

/// A live connection registered in a room.
#[derive(Debug)]
pub struct Connection {
    pub id: ConnectionId,
    pub username: Username,
    sender: PusherChannel,
}

impl Connection {
    pub fn new(username: Username, sender: PusherChannel) -> Self {
        Self {
            id: ConnectionId::generate(),
            username,
            sender,
        }
    }

    /// Queue `message` without waiting.
    pub fn try_push(&self, message: &str) -> Result<(), MessagePushError> {
        self.sender
            .try_send(message.to_string())
            .map_err(|e| match e {
                TrySendError::Full(_) => MessagePushError::QueueFull(self.id),
                TrySendError::Closed(_) => MessagePushError::Closed(self.id),
            })
    }
}

/// Result of [`GameRoom::join`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JoinOutcome {
    pub connection_id: ConnectionId,
    /// Occupancy right after the join.
    pub occupancy: usize,
    /// This join started the room's countdown.
    pub countdown_started: bool,
    /// Seconds remaining to hand to a late joiner; `None` for the joiner
    /// that started the countdown.
    pub late_join_snapshot: Option<u32>,
}

/// Consistent copy of a room's live state, taken under its lock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomSnapshot {
    pub name: RoomName,
    pub occupancy: usize,
    pub countdown: Countdown,
    pub tally: ClickTally,
}

/// All live state of one room: occupancy set, click tally and countdown.
///
/// Callers hold a single lock around the whole aggregate, so a broadcast
/// never interleaves with a registration, removal or click on the same
/// room.
#[derive(Debug)]
pub struct GameRoom {
    name: RoomName,
    connections: HashMap<ConnectionId, Connection>,
    tally: ClickTally,
    countdown: Countdown,
}

impl GameRoom {
    pub fn new(name: RoomName) -> Self {
        Self {
            name,
            connections: HashMap::new(),
            tally: ClickTally::new(),
            countdown: Countdown::default(),
        }
    }

    pub fn name(&self) -> &RoomName {
        &self.name
    }

    /// Add a connection and return the new occupancy.
    pub fn register(&mut self, connection: Connection) -> usize {
        self.connections.insert(connection.id, connection);
        self.connections.len()
    }

    /// Remove a connection and return the new occupancy. Removing an
    /// absent connection is a no-op.
    pub fn remove(&mut self, id: &ConnectionId) -> usize {
        self.connections.remove(id);
        self.connections.len()
    }

    pub fn occupancy(&self) -> usize {
        self.connections.len()
    }

    pub fn contains(&self, id: &ConnectionId) -> bool {
        self.connections.contains_key(id)
    }

    /// Register a connection and start the countdown if this is the first
    /// join of the room.
    pub fn join(&mut self, connection: Connection, countdown_secs: u32) -> JoinOutcome {
        let connection_id = connection.id;
        let occupancy = self.register(connection);
        let countdown_started = self.countdown.start(countdown_secs);
        JoinOutcome {
            connection_id,
            occupancy,
            countdown_started,
            late_join_snapshot: (!countdown_started).then(|| self.countdown.seconds_remaining()),
        }
    }

    /// Queue `message` on every connection. Connections that cannot take it
    /// are dropped from the room; their ids are returned.
    pub fn broadcast(&mut self, message: &str) -> Vec<ConnectionId> {
        let failed: Vec<ConnectionId> = self
            .connections
            .values()
            .filter_map(|connection| match connection.try_push(message) {
                Ok(()) => None,
                Err(e) => {
                    tracing::warn!("Pruning connection in room '{}': {}", self.name, e);
                    Some(connection.id)
                }
            })
            .collect();

        for id in &failed {
            self.connections.remove(id);
        }
        failed
    }

    /// Queue `message` on one connection, dropping it on failure.
    pub fn push_to(&mut self, id: &ConnectionId, message: &str) -> Result<(), MessagePushError> {
        let connection = self
            .connections
            .get(id)
            .ok_or(MessagePushError::ConnectionNotFound(*id))?;

        if let Err(e) = connection.try_push(message) {
            tracing::warn!("Pruning connection in room '{}': {}", self.name, e);
            self.connections.remove(id);
            return Err(e);
        }
        Ok(())
    }

    /// Count one click and return the user's new total.
    pub fn record_click(&mut self, user: Username) -> u64 {
        self.tally.record(user)
    }

    pub fn tally(&self) -> &ClickTally {
        &self.tally
    }

    pub fn countdown(&self) -> Countdown {
        self.countdown
    }

    pub fn start_countdown(&mut self, seconds: u32) -> bool {
        self.countdown.start(seconds)
    }

    pub fn tick(&mut self) -> CountdownStep {
        self.countdown.tick()
    }

    pub fn snapshot(&self) -> RoomSnapshot {
        RoomSnapshot {
            name: self.name.clone(),
            occupancy: self.occupancy(),
            countdown: self.countdown,
            tally: self.tally.clone(),
        }
    }
}
