//! Domain entities.

mod click_tally;
mod countdown;
mod game_room;
mod room;

pub use click_tally::ClickTally;
pub use countdown::{Countdown, CountdownStep};
pub use game_room::{Connection, GameRoom, JoinOutcome, PusherChannel, RoomSnapshot};
pub use room::Room;
