//! Domain layer: game entities, value objects and the repository seams.
//!
//! Nothing in here performs I/O. Outbound delivery goes through
//! [`PusherChannel`] queues owned by the per-room aggregate.

pub mod entity;
pub mod error;
pub mod event;
pub mod repository;
pub mod value_object;

pub use entity::{
    ClickTally, Connection, Countdown, CountdownStep, GameRoom, JoinOutcome, PusherChannel, Room,
    RoomSnapshot,
};
pub use error::MessagePushError;
pub use event::GameEvent;
pub use repository::{GameRoomRepository, RoomDirectoryRepository};
pub use value_object::{ConnectionId, RoomName, Timestamp, Username};

#[cfg(test)]
pub use repository::{MockGameRoomRepository, MockRoomDirectoryRepository};
