//! UseCase 層
//!
//! 1 つの操作につき 1 つの構造体を置き、`execute(..)` で実行する。
//! 対局ルームを書き換える操作はすべてルームロックを保持したまま
//! 読み込み・変更・保存を行う。通知（誰に何を送るか）は UI 層が担当する。

mod error;
mod room_access;
#[cfg(test)]
pub(crate) mod test_support;

// 対局ルーム
mod create_room;
mod draw;
mod enter_room;
mod get_rooms;
mod leave_room;
mod make_step;
mod retract_step;
mod room_chat;
mod set_ready;
mod surrender;

// ロビー
mod connect_player;
mod disconnect_player;
mod get_player;
mod hall_chat;
mod rename_player;
mod set_player_status;

pub use error::{LobbyError, MatchError};

pub use create_room::CreateRoomUseCase;
pub use draw::{DrawOutput, DrawUseCase};
pub use enter_room::EnterRoomUseCase;
pub use get_rooms::GetRoomsUseCase;
pub use leave_room::{LeaveRoomOutput, LeaveRoomUseCase};
pub use make_step::{MakeStepUseCase, StepOutput};
pub use retract_step::{RetractOutput, RetractStepUseCase};
pub use room_chat::RoomChatUseCase;
pub use set_ready::SetReadyUseCase;
pub use surrender::{SurrenderOutput, SurrenderUseCase};

pub use connect_player::ConnectPlayerUseCase;
pub use disconnect_player::DisconnectPlayerUseCase;
pub use get_player::{GetPlayerUseCase, GetPlayersUseCase};
pub use hall_chat::{GetHallDialogUseCase, HallChatUseCase};
pub use rename_player::{RenameOutput, RenamePlayerUseCase};
pub use set_player_status::SetPlayerStatusUseCase;
