//! In-memory repositories. State lives for the lifetime of the process.

mod game_room;
mod room_directory;

pub use game_room::InMemoryGameRoomRepository;
pub use room_directory::InMemoryRoomDirectoryRepository;
