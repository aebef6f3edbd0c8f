//! UseCase: ルームチャット

use std::sync::Arc;

use gomoku_shared::time::Clock;

use crate::domain::{
    DialogMsg, PlayerId, PlayerRepository, Room, RoomId, RoomLockRegistry, RoomRepository,
};

use super::{error::MatchError, room_access::locked_room};

/// ルームチャットのユースケース
pub struct RoomChatUseCase {
    locks: Arc<RoomLockRegistry>,
    rooms: Arc<dyn RoomRepository>,
    players: Arc<dyn PlayerRepository>,
    clock: Arc<dyn Clock>,
}

impl RoomChatUseCase {
    pub fn new(
        locks: Arc<RoomLockRegistry>,
        rooms: Arc<dyn RoomRepository>,
        players: Arc<dyn PlayerRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            locks,
            rooms,
            players,
            clock,
        }
    }

    /// 発言者の表示名はプレイヤーのレコードから取る
    pub async fn execute(
        &self,
        player_id: &PlayerId,
        room_id: &RoomId,
        content: String,
    ) -> Result<(Room, DialogMsg), MatchError> {
        let sender = self.players.get_player(player_id).await?;
        let msg = DialogMsg::new(self.clock.now_formatted(), sender.name, content);

        let (_guard, mut room) = locked_room(&self.locks, self.rooms.as_ref(), room_id).await?;
        room.push_dialog(msg.clone());
        self.rooms.set_room(&room).await?;

        tracing::debug!("Room chat in '{}' from '{}'", room_id, player_id);
        Ok((room, msg))
    }
}
