//! Server state.

use std::sync::Arc;

use clickrush_shared::time::{Clock, SystemClock};

use crate::{
    config::GameConfig,
    domain::{GameRoomRepository, RoomDirectoryRepository},
    infrastructure::repository::{InMemoryGameRoomRepository, InMemoryRoomDirectoryRepository},
    usecase::{
        ConnectPlayerUseCase, CreateRoomUseCase, DisconnectPlayerUseCase, GetRoomStateUseCase,
        JoinRoomUseCase, ListRoomsUseCase, RecordClickUseCase, RunCountdownUseCase,
    },
};

/// Shared application state, one per server.
pub struct AppState {
    pub connect_player_usecase: Arc<ConnectPlayerUseCase>,
    pub disconnect_player_usecase: Arc<DisconnectPlayerUseCase>,
    pub record_click_usecase: Arc<RecordClickUseCase>,
    pub create_room_usecase: Arc<CreateRoomUseCase>,
    pub list_rooms_usecase: Arc<ListRoomsUseCase>,
    pub join_room_usecase: JoinRoomUseCase,
    pub get_room_state_usecase: Arc<GetRoomStateUseCase>,
    /// Outbound queue capacity of each new connection
    pub outbound_buffer: usize,
}

impl AppState {
    /// Wire every use case on top of fresh in-memory repositories.
    pub fn in_memory(config: &GameConfig) -> Self {
        Self::new(
            Arc::new(InMemoryGameRoomRepository::new()),
            Arc::new(InMemoryRoomDirectoryRepository::new()),
            Arc::new(SystemClock),
            config,
        )
    }

    pub fn new(
        game_rooms: Arc<dyn GameRoomRepository>,
        directory: Arc<dyn RoomDirectoryRepository>,
        clock: Arc<dyn Clock>,
        config: &GameConfig,
    ) -> Self {
        // 1. Countdown supervisor (shared by every connect)
        let countdown = Arc::new(RunCountdownUseCase::new(
            game_rooms.clone(),
            config.tick_interval,
        ));

        // 2. Game use cases
        let connect_player_usecase = Arc::new(ConnectPlayerUseCase::new(
            game_rooms.clone(),
            countdown,
            config.countdown_secs,
        ));
        let disconnect_player_usecase = Arc::new(DisconnectPlayerUseCase::new(game_rooms.clone()));
        let record_click_usecase = Arc::new(RecordClickUseCase::new(game_rooms.clone()));
        let get_room_state_usecase = Arc::new(GetRoomStateUseCase::new(game_rooms));

        // 3. Directory use cases
        let create_room_usecase = Arc::new(CreateRoomUseCase::new(directory.clone(), clock));
        let list_rooms_usecase = Arc::new(ListRoomsUseCase::new(directory));

        Self {
            connect_player_usecase,
            disconnect_player_usecase,
            record_click_usecase,
            create_room_usecase,
            list_rooms_usecase,
            join_room_usecase: JoinRoomUseCase::new(),
            get_room_state_usecase,
            outbound_buffer: config.outbound_buffer,
        }
    }
}
