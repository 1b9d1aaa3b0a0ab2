//! Utilities shared by the Clickrush binaries.

pub mod logger;
pub mod time;
