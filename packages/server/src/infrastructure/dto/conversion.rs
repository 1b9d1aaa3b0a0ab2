//! Conversion logic between DTOs and domain entities.

use clickrush_shared::time::timestamp_to_rfc3339;

use crate::domain::{ClickTally, Countdown, GameEvent, Room};

use super::{
    http::{ClickCountDto, RoomDto},
    websocket::ServerMessage,
};

impl From<GameEvent> for ServerMessage {
    fn from(event: GameEvent) -> Self {
        match event {
            GameEvent::UserCount(count) => Self::UserCount(count),
            GameEvent::Timer(seconds) => Self::Timer(seconds),
            GameEvent::Winner(winner) => {
                Self::Winner(winner.map(|w| w.into_string()).unwrap_or_default())
            }
        }
    }
}

impl From<Room> for RoomDto {
    fn from(room: Room) -> Self {
        Self {
            name: room.name.into_string(),
            created_at: timestamp_to_rfc3339(room.created_at.value()),
        }
    }
}

/// Encode an event as the JSON text sent over a connection.
pub fn encode_event(event: GameEvent) -> Result<String, serde_json::Error> {
    serde_json::to_string(&ServerMessage::from(event))
}

pub fn click_counts(tally: &ClickTally) -> Vec<ClickCountDto> {
    tally
        .iter()
        .map(|(user, clicks)| ClickCountDto {
            username: user.as_str().to_string(),
            clicks,
        })
        .collect()
}

pub fn countdown_label(countdown: Countdown) -> &'static str {
    match countdown {
        Countdown::NotStarted => "not_started",
        Countdown::Running { .. } => "running",
        Countdown::Expired => "expired",
    }
}
