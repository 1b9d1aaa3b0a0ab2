//! UseCase: ルーム参加先の決定
//!
//! Joining changes no state by itself; it only tells the client where the
//! room lives. Registration happens when the WebSocket is opened.

use crate::domain::{RoomName, Username};

/// ルーム参加のユースケース
#[derive(Debug, Default, Clone, Copy)]
pub struct JoinRoomUseCase;

impl JoinRoomUseCase {
    pub fn new() -> Self {
        Self
    }

    /// Redirect target for `username` joining `room`: `/room/{room}?username={username}`.
    ///
    /// The room is percent-encoded as a path segment. The username is
    /// encoded as a form value, so spaces become `+`.
    pub fn execute(&self, room: &RoomName, username: &Username) -> String {
        format!(
            "/room/{}?username={}",
            urlencoding::encode(room.as_str()),
            encode_query_value(username.as_str())
        )
    }
}

/// `%` itself is escaped to `%25`, so every `%20` left in the output
/// stands for a space.
fn encode_query_value(value: &str) -> String {
    urlencoding::encode(value).replace("%20", "+")
}
