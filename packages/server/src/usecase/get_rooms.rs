//! UseCase: ルーム一覧取得
//!
//! 全ルームのロックを取得してから一覧を読むため、一貫したスナップショットが得られる。
//! 代わりに、処理中のルームが 1 つでもあると一覧取得はそれを待つ。

use std::sync::Arc;

use crate::domain::{Room, RoomLockRegistry, RoomRepository};

use super::error::MatchError;

/// ルーム一覧取得のユースケース
pub struct GetRoomsUseCase {
    locks: Arc<RoomLockRegistry>,
    rooms: Arc<dyn RoomRepository>,
}

impl GetRoomsUseCase {
    pub fn new(locks: Arc<RoomLockRegistry>, rooms: Arc<dyn RoomRepository>) -> Self {
        Self { locks, rooms }
    }

    /// ルーム ID 順の一覧
    pub async fn execute(&self) -> Result<Vec<Room>, MatchError> {
        let _all = self.locks.lock_all().await;
        let mut rooms = self.rooms.list_rooms().await?;
        rooms.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(rooms)
    }
}
