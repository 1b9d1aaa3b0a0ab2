//! Request handlers.

mod http;
mod websocket;

pub use http::{create_room, debug_room_state, health_check, join_room, list_rooms, room_page};
pub use websocket::websocket_handler;
