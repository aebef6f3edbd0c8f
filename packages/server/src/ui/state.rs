//! Server state and dependency wiring.

use std::sync::Arc;

use gomoku_shared::time::Clock;

use crate::{
    domain::{HallRepository, MessagePusher, PlayerRepository, RoomLockRegistry, RoomRepository},
    usecase::{
        ConnectPlayerUseCase, CreateRoomUseCase, DisconnectPlayerUseCase, DrawUseCase,
        EnterRoomUseCase, GetHallDialogUseCase, GetPlayerUseCase, GetPlayersUseCase,
        GetRoomsUseCase, HallChatUseCase, LeaveRoomUseCase, MakeStepUseCase,
        RenamePlayerUseCase, RetractStepUseCase, RoomChatUseCase, SetPlayerStatusUseCase,
        SetReadyUseCase, SurrenderUseCase,
    },
};

use super::notifier::Notifier;

/// Shared application state
pub struct AppState {
    /// 通知（宛先ごとの送信）
    pub notifier: Notifier,

    // ロビー
    pub connect_player_usecase: Arc<ConnectPlayerUseCase>,
    pub disconnect_player_usecase: Arc<DisconnectPlayerUseCase>,
    pub get_player_usecase: Arc<GetPlayerUseCase>,
    pub get_players_usecase: Arc<GetPlayersUseCase>,
    pub rename_player_usecase: Arc<RenamePlayerUseCase>,
    pub set_player_status_usecase: Arc<SetPlayerStatusUseCase>,
    pub hall_chat_usecase: Arc<HallChatUseCase>,
    pub get_hall_dialog_usecase: Arc<GetHallDialogUseCase>,

    // 対局ルーム
    pub get_rooms_usecase: Arc<GetRoomsUseCase>,
    pub create_room_usecase: Arc<CreateRoomUseCase>,
    pub enter_room_usecase: Arc<EnterRoomUseCase>,
    pub leave_room_usecase: Arc<LeaveRoomUseCase>,
    pub room_chat_usecase: Arc<RoomChatUseCase>,
    pub set_ready_usecase: Arc<SetReadyUseCase>,
    pub make_step_usecase: Arc<MakeStepUseCase>,
    pub retract_step_usecase: Arc<RetractStepUseCase>,
    pub surrender_usecase: Arc<SurrenderUseCase>,
    pub draw_usecase: Arc<DrawUseCase>,
}

impl AppState {
    /// Wire every usecase onto the given store adapters and session registry.
    ///
    /// The room lock registry is created here, one per process.
    pub fn new(
        rooms: Arc<dyn RoomRepository>,
        players: Arc<dyn PlayerRepository>,
        hall: Arc<dyn HallRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let locks = Arc::new(RoomLockRegistry::new());
        let leave_room_usecase = Arc::new(LeaveRoomUseCase::new(
            locks.clone(),
            rooms.clone(),
            players.clone(),
        ));

        Self {
            notifier: Notifier::new(message_pusher.clone()),

            connect_player_usecase: Arc::new(ConnectPlayerUseCase::new(
                players.clone(),
                message_pusher.clone(),
                clock.clone(),
            )),
            disconnect_player_usecase: Arc::new(DisconnectPlayerUseCase::new(
                rooms.clone(),
                players.clone(),
                message_pusher,
                leave_room_usecase.clone(),
            )),
            get_player_usecase: Arc::new(GetPlayerUseCase::new(players.clone())),
            get_players_usecase: Arc::new(GetPlayersUseCase::new(players.clone())),
            rename_player_usecase: Arc::new(RenamePlayerUseCase::new(players.clone())),
            set_player_status_usecase: Arc::new(SetPlayerStatusUseCase::new(players.clone())),
            hall_chat_usecase: Arc::new(HallChatUseCase::new(
                hall.clone(),
                players.clone(),
                clock.clone(),
            )),
            get_hall_dialog_usecase: Arc::new(GetHallDialogUseCase::new(hall)),

            get_rooms_usecase: Arc::new(GetRoomsUseCase::new(locks.clone(), rooms.clone())),
            create_room_usecase: Arc::new(CreateRoomUseCase::new(
                locks.clone(),
                rooms.clone(),
                players.clone(),
            )),
            enter_room_usecase: Arc::new(EnterRoomUseCase::new(
                locks.clone(),
                rooms.clone(),
                players.clone(),
            )),
            leave_room_usecase,
            room_chat_usecase: Arc::new(RoomChatUseCase::new(
                locks.clone(),
                rooms.clone(),
                players.clone(),
                clock,
            )),
            set_ready_usecase: Arc::new(SetReadyUseCase::new(locks.clone(), rooms.clone())),
            make_step_usecase: Arc::new(MakeStepUseCase::new(
                locks.clone(),
                rooms.clone(),
                players.clone(),
            )),
            retract_step_usecase: Arc::new(RetractStepUseCase::new(locks.clone(), rooms.clone())),
            surrender_usecase: Arc::new(SurrenderUseCase::new(
                locks.clone(),
                rooms.clone(),
                players.clone(),
            )),
            draw_usecase: Arc::new(DrawUseCase::new(locks, rooms, players)),
        }
    }
}
