//! Value objects.
//!
//! Room names and usernames are opaque: any string is accepted, including
//! the empty string, and equality is byte equality.

use std::fmt;

use serde::Serialize;
use uuid::Uuid;

/// Name of a game room, also the key of all per-room game state.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RoomName(String);

impl RoomName {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<String> for RoomName {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for RoomName {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for RoomName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Display name a player supplied when joining.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Username(String);

impl Username {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<String> for Username {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for Username {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identity of one live connection. Two connections with the same
/// username are still distinct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    /// Generate a fresh random (v4) identity.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Unix timestamp in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(millis: i64) -> Self {
        Self(millis)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_name_accepts_any_string() {
        // テスト項目: ルーム名は検証されず、空文字列や記号も受け付ける
        // given (前提条件):
        let inputs = ["", "lobby", "a room/with?odd&chars", "日本語"];

        // when (操作):
        let names: Vec<RoomName> = inputs.iter().map(|s| RoomName::from(*s)).collect();

        // then (期待する結果):
        for (name, input) in names.iter().zip(inputs) {
            assert_eq!(name.as_str(), input);
        }
    }

    #[test]
    fn test_username_equality_is_exact() {
        // テスト項目: ユーザー名は大文字小文字を区別して比較される
        // given (前提条件):
        let alice = Username::from("alice");
        let alice_upper = Username::from("Alice");

        // when (操作):

        // then (期待する結果):
        assert_ne!(alice, alice_upper);
        assert_eq!(alice, Username::new("alice".to_string()));
    }

    #[test]
    fn test_connection_ids_are_unique() {
        // テスト項目: 生成される ConnectionId は毎回異なる
        // given (前提条件):

        // when (操作):
        let first = ConnectionId::generate();
        let second = ConnectionId::generate();

        // then (期待する結果):
        assert_ne!(first, second);
    }
}
