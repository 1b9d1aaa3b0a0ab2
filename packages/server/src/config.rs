//! Game configuration.

use std::time::Duration;

/// Seconds in a round.
pub const DEFAULT_COUNTDOWN_SECS: u32 = 30;
/// Messages a connection may have queued before it is considered dead.
pub const DEFAULT_OUTBOUND_BUFFER: usize = 64;

/// Tunables of the game core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// Initial seconds of every room's countdown.
    pub countdown_secs: u32,
    /// Time between two countdown ticks.
    pub tick_interval: Duration,
    /// Capacity of each connection's outbound queue.
    pub outbound_buffer: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            countdown_secs: DEFAULT_COUNTDOWN_SECS,
            tick_interval: Duration::from_secs(1),
            outbound_buffer: DEFAULT_OUTBOUND_BUFFER,
        }
    }
}
