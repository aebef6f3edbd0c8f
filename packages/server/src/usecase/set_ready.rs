//! UseCase: 準備状態の切り替え

use std::sync::Arc;

use crate::domain::{PlayerId, Room, RoomId, RoomLockRegistry, RoomRepository};

use super::{error::MatchError, room_access::locked_room};

/// 準備状態切り替えのユースケース
pub struct SetReadyUseCase {
    locks: Arc<RoomLockRegistry>,
    rooms: Arc<dyn RoomRepository>,
}

impl SetReadyUseCase {
    pub fn new(locks: Arc<RoomLockRegistry>, rooms: Arc<dyn RoomRepository>) -> Self {
        Self { locks, rooms }
    }

    /// 両者が準備完了になった時点で対局が始まり、着手がリセットされる
    pub async fn execute(
        &self,
        player_id: &PlayerId,
        room_id: &RoomId,
        ready: bool,
    ) -> Result<Room, MatchError> {
        let (_guard, mut room) = locked_room(&self.locks, self.rooms.as_ref(), room_id).await?;
        let was_started = room.started;
        room.set_ready(player_id, ready)?;
        self.rooms.set_room(&room).await?;

        if room.started && !was_started {
            tracing::info!("Game started in room '{}'", room_id);
        }
        Ok(room)
    }
}
