//! UseCase: 引き分けの提案・応答

use std::sync::Arc;

use crate::domain::{
    Consent, GameOver, PlayerId, PlayerRepository, Room, RoomId, RoomLockRegistry,
    RoomRepository,
};

use super::{
    error::MatchError,
    room_access::{locked_room, record_match},
};

/// 引き分けの結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawOutput {
    pub room: Room,
    /// 呼び出し側の相手（提案・拒否の中継先）
    pub opponent: PlayerId,
    pub consent: Consent,
    /// 承諾された場合の終局記録
    pub game_over: Option<GameOver>,
}

/// 引き分けのユースケース
pub struct DrawUseCase {
    locks: Arc<RoomLockRegistry>,
    rooms: Arc<dyn RoomRepository>,
    players: Arc<dyn PlayerRepository>,
}

impl DrawUseCase {
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
        consent: Consent,
    ) -> Result<DrawOutput, MatchError> {
        let (_guard, mut room) = locked_room(&self.locks, self.rooms.as_ref(), room_id).await?;
        let (opponent, game_over) = room.draw(player_id, consent)?;

        if game_over.is_some() {
            record_match(self.players.as_ref(), [player_id, &opponent]).await?;
            self.rooms.set_room(&room).await?;
            tracing::info!("Game in room '{}' ended in a draw", room_id);
        }

        Ok(DrawOutput {
            room,
            opponent,
            consent,
            game_over,
        })
    }
}
