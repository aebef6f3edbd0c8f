//! KeyValueStore 上の Room Repository

use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    domain::{RepositoryError, Room, RoomId, RoomRepository},
    infrastructure::kv::KeyValueStore,
};

use super::{ROOM_TABLE, decode, encode};

/// Room Repository 実装
pub struct KvRoomRepository {
    store: Arc<dyn KeyValueStore>,
}

impl KvRoomRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl RoomRepository for KvRoomRepository {
    async fn get_room(&self, room_id: &RoomId) -> Result<Room, RepositoryError> {
        match self.store.hget(ROOM_TABLE, room_id.as_str()).await? {
            Some(raw) => decode(&raw),
            None => Err(RepositoryError::RoomNotFound(room_id.to_string())),
        }
    }

    async fn set_room(&self, room: &Room) -> Result<(), RepositoryError> {
        let raw = encode(room)?;
        self.store.hset(ROOM_TABLE, room.id.as_str(), raw).await?;
        Ok(())
    }

    async fn delete_room(&self, room_id: &RoomId) -> Result<(), RepositoryError> {
        self.store.hdel(ROOM_TABLE, room_id.as_str()).await?;
        Ok(())
    }

    async fn list_rooms(&self) -> Result<Vec<Room>, RepositoryError> {
        self.store
            .hvals(ROOM_TABLE)
            .await?
            .iter()
            .map(|raw| decode(raw))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{Color, Player, PlayerId, Role},
        infrastructure::kv::InMemoryKeyValueStore,
    };

    fn create_test_repository() -> (KvRoomRepository, Arc<InMemoryKeyValueStore>) {
        let store = Arc::new(InMemoryKeyValueStore::new());
        (KvRoomRepository::new(store.clone()), store)
    }

    fn player(id: &str) -> Player {
        Player::new(
            PlayerId::new(id.to_string()).unwrap(),
            "2024-01-01 00:00:00".to_string(),
        )
    }

    #[tokio::test]
    async fn test_set_and_get_room() {
        // テスト項目: 保存したルームが同じ内容で読み出せる
        // given (前提条件):
        let (repo, _store) = create_test_repository();
        let mut room = Room::new(RoomId::generate(), player("alice"), Color::White);
        room.enter(player("bob"), Role::Challenger).unwrap();
        room.enter(player("carol"), Role::Spectator).unwrap();

        // when (操作):
        repo.set_room(&room).await.unwrap();
        let loaded = repo.get_room(&room.id).await.unwrap();

        // then (期待する結果):
        assert_eq!(loaded, room);
    }

    #[tokio::test]
    async fn test_get_missing_room() {
        // テスト項目: 存在しないルームは RoomNotFound
        // given (前提条件):
        let (repo, _store) = create_test_repository();
        let rid = RoomId::new("nope".to_string()).unwrap();

        // when (操作):
        let result = repo.get_room(&rid).await;

        // then (期待する結果):
        assert_eq!(result, Err(RepositoryError::RoomNotFound("nope".to_string())));
    }

    #[tokio::test]
    async fn test_delete_and_list_rooms() {
        // テスト項目: 削除したルームは一覧に出ない
        // given (前提条件):
        let (repo, _store) = create_test_repository();
        let a = Room::new(RoomId::generate(), player("alice"), Color::Black);
        let b = Room::new(RoomId::generate(), player("bob"), Color::Black);
        repo.set_room(&a).await.unwrap();
        repo.set_room(&b).await.unwrap();

        // when (操作):
        repo.delete_room(&a.id).await.unwrap();
        let rooms = repo.list_rooms().await.unwrap();

        // then (期待する結果):
        assert_eq!(rooms, vec![b]);
    }

    #[tokio::test]
    async fn test_corrupt_record_is_serialization_error() {
        // テスト項目: 壊れたレコードは Serialization エラーになる
        // given (前提条件):
        let (repo, store) = create_test_repository();
        store
            .hset(ROOM_TABLE, "broken", "not json".to_string())
            .await
            .unwrap();

        // when (操作):
        let result = repo
            .get_room(&RoomId::new("broken".to_string()).unwrap())
            .await;

        // then (期待する結果):
        assert!(matches!(result, Err(RepositoryError::Serialization(_))));
    }
}
