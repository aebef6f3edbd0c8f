//! UseCase: ルーム作成

use std::sync::Arc;

use crate::domain::{Color, PlayerId, PlayerRepository, Room, RoomId, RoomLockRegistry, RoomRepository};

use super::error::MatchError;

/// ルーム作成のユースケース
pub struct CreateRoomUseCase {
    locks: Arc<RoomLockRegistry>,
    rooms: Arc<dyn RoomRepository>,
    players: Arc<dyn PlayerRepository>,
}

impl CreateRoomUseCase {
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

    /// `player_id` を host とし、host が `color` を持つルームを作成する
    ///
    /// The lock is registered and held before the record is first written.
    pub async fn execute(&self, player_id: &PlayerId, color: Color) -> Result<Room, MatchError> {
        let host = self.players.get_player(player_id).await?;
        let room = Room::new(RoomId::generate(), host, color);

        self.locks.add(room.id.clone()).await?;
        let guard = self.locks.lock(&room.id).await?;
        if let Err(e) = self.rooms.set_room(&room).await {
            drop(guard);
            self.locks.delete(&room.id).await;
            return Err(e.into());
        }
        guard.unlock();

        tracing::info!("Room '{}' created by '{}'", room.id, player_id);
        Ok(room)
    }
}
