//! Events pushed from a room to its connections.

use super::value_object::Username;

/// An outbound game event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// Number of open connections in the room.
    UserCount(usize),
    /// Seconds left in the round.
    Timer(u32),
    /// Result of the round. `None` when nobody clicked.
    Winner(Option<Username>),
}
