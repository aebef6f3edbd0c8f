//! UseCase: 投了

use std::sync::Arc;

use crate::domain::{
    GameOver, PlayerId, PlayerRepository, Room, RoomId, RoomLockRegistry, RoomRepository,
};

use super::{
    error::MatchError,
    room_access::{locked_room, record_match},
};

/// 投了の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurrenderOutput {
    pub room: Room,
    pub game_over: GameOver,
}

/// 投了のユースケース
pub struct SurrenderUseCase {
    locks: Arc<RoomLockRegistry>,
    rooms: Arc<dyn RoomRepository>,
    players: Arc<dyn PlayerRepository>,
}

impl SurrenderUseCase {
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

    pub async fn execute(
        &self,
        player_id: &PlayerId,
        room_id: &RoomId,
    ) -> Result<SurrenderOutput, MatchError> {
        let (_guard, mut room) = locked_room(&self.locks, self.rooms.as_ref(), room_id).await?;
        let game_over = room.surrender(player_id)?;

        let ids: Vec<PlayerId> = game_over.participants().map(|d| d.id().clone()).collect();
        record_match(self.players.as_ref(), &ids).await?;
        self.rooms.set_room(&room).await?;

        tracing::info!("Player '{}' surrendered in room '{}'", player_id, room_id);
        Ok(SurrenderOutput { room, game_over })
    }
}
