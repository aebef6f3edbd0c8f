//! UseCase: ルーム入室

use std::sync::Arc;

use crate::domain::{
    Player, PlayerId, PlayerRepository, PlayerStatus, Role, Room, RoomId, RoomLockRegistry,
    RoomRepository,
};

use super::{error::MatchError, room_access::locked_room};

/// ルーム入室のユースケース
pub struct EnterRoomUseCase {
    locks: Arc<RoomLockRegistry>,
    rooms: Arc<dyn RoomRepository>,
    players: Arc<dyn PlayerRepository>,
}

impl EnterRoomUseCase {
    pub fn new(
        locks: Arc<RoomLockRegistry>,
        rooms: Arc<dyn RoomRepository>,
        players: Arc<dyn PlayerRepository>,
    ) -> Self {
        Self {
            locks,
            rooms,
            players,
        }
    }

    /// 挑戦者または観戦者として入室する
    ///
    /// # Returns
    ///
    /// 入室後のルーム。入室者に過去のチャットを見せないよう `dialog` は空にしてある
    /// （保存されたレコードには残る）。
    pub async fn execute(
        &self,
        player_id: &PlayerId,
        room_id: &RoomId,
        role: Role,
    ) -> Result<Room, MatchError> {
        let mut player = self.players.get_player(player_id).await?;
        let (_guard, mut room) = locked_room(&self.locks, self.rooms.as_ref(), room_id).await?;

        let starts_spectating = role == Role::Spectator && player.status == PlayerStatus::Leisure;
        if starts_spectating {
            player.status = PlayerStatus::Spectating;
        }
        room.enter(player.clone(), role)?;

        if starts_spectating {
            let change = Box::new(|player: &mut Player| {
                if player.status == PlayerStatus::Leisure {
                    player.status = PlayerStatus::Spectating;
                }
            });
            self.players.update_player(player_id, change).await?;
        }
        self.rooms.set_room(&room).await?;

        tracing::info!("Player '{}' entered room '{}' as {}", player_id, room_id, role);
        Ok(room.without_dialog())
    }
}
