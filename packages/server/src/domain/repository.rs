//! Repository traits.
//!
//! The domain declares the storage interfaces it needs; the
//! `infrastructure` layer implements them.

use async_trait::async_trait;

use super::{
    ClickTally, Connection, ConnectionId, Countdown, CountdownStep, GameEvent, JoinOutcome,
    MessagePushError, Room, RoomName, RoomSnapshot, Timestamp, Username,
};

/// Directory of created rooms, in creation order.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoomDirectoryRepository: Send + Sync {
    /// Append a new room record.
    async fn create_room(&self, name: RoomName, created_at: Timestamp) -> Room;

    /// All records, oldest first.
    async fn list_rooms(&self) -> Vec<Room>;
}

/// Live game state of every room, keyed by room name.
///
/// Every method locks the room it targets for its whole duration.
/// Methods that change occupancy also broadcast the new `UserCount` under
/// that lock.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GameRoomRepository: Send + Sync {
    /// Register a connection, announce the new occupancy, start the
    /// countdown if this is the room's first join, and push the current
    /// timer value to the joiner if the countdown was already started.
    async fn join(&self, room: &RoomName, connection: Connection, countdown_secs: u32)
    -> JoinOutcome;

    /// Register a connection and announce the new occupancy.
    async fn register_connection(&self, room: &RoomName, connection: Connection) -> usize;

    /// Remove a connection (no-op if absent) and announce the new occupancy.
    async fn remove_connection(&self, room: &RoomName, id: &ConnectionId) -> usize;

    async fn occupancy(&self, room: &RoomName) -> usize;

    /// Send `event` to every connection of `room`, pruning connections that
    /// fail. Returns the pruned ids.
    async fn broadcast(&self, room: &RoomName, event: GameEvent) -> Vec<ConnectionId>;

    /// Send `event` to a single connection, pruning it on failure.
    async fn push_to(
        &self,
        room: &RoomName,
        id: &ConnectionId,
        event: GameEvent,
    ) -> Result<(), MessagePushError>;

    /// Count one click for `user` and return the user's total.
    async fn record_click(&self, room: &RoomName, user: Username) -> u64;

    async fn click_tally(&self, room: &RoomName) -> ClickTally;

    /// Check-and-set start of the countdown. Returns `true` only for the
    /// call that actually started it.
    async fn start_countdown(&self, room: &RoomName, seconds: u32) -> bool;

    /// Advance the countdown one tick and broadcast the result: a `Timer`
    /// event on a tick, the `Winner` event on expiry.
    async fn advance_countdown(&self, room: &RoomName) -> CountdownStep;

    async fn countdown(&self, room: &RoomName) -> Countdown;

    /// Occupancy, countdown and tally read under one lock.
    async fn snapshot(&self, room: &RoomName) -> RoomSnapshot;
}
