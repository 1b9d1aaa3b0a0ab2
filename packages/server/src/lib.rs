//! Fastest-clicker game server.
//!
//! Players join a named room over WebSocket, a countdown starts on the
//! first join, every click signal is tallied, and when the countdown ends
//! the room is told who clicked most.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

pub mod config;
