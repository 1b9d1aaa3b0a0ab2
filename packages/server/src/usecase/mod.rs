//! UseCase layer: game operations orchestrated over the domain repositories.

mod connect_player;
mod create_room;
mod disconnect_player;
mod get_room_state;
mod join_room;
mod list_rooms;
mod record_click;
mod run_countdown;

pub use connect_player::{ConnectPlayerUseCase, ConnectionHandle};
pub use create_room::CreateRoomUseCase;
pub use disconnect_player::DisconnectPlayerUseCase;
pub use get_room_state::GetRoomStateUseCase;
pub use join_room::JoinRoomUseCase;
pub use list_rooms::ListRoomsUseCase;
pub use record_click::RecordClickUseCase;
pub use run_countdown::RunCountdownUseCase;
