//! KeyValueStore 上の Player Repository

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{
    domain::{Player, PlayerChange, PlayerId, PlayerRepository, RepositoryError},
    infrastructure::kv::KeyValueStore,
};

use super::{PLAYER_TABLE, decode, encode};

/// Player Repository 実装
///
/// 書き込みはすべて `records` を保持した状態で行う。
pub struct KvPlayerRepository {
    store: Arc<dyn KeyValueStore>,
    records: Mutex<()>,
}

impl KvPlayerRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            records: Mutex::new(()),
        }
    }

    async fn read(&self, player_id: &PlayerId) -> Result<Player, RepositoryError> {
        match self.store.hget(PLAYER_TABLE, player_id.as_str()).await? {
            Some(raw) => decode(&raw),
            None => Err(RepositoryError::PlayerNotFound(player_id.to_string())),
        }
    }

    async fn write(&self, player: &Player) -> Result<(), RepositoryError> {
        let raw = encode(player)?;
        self.store.hset(PLAYER_TABLE, player.id.as_str(), raw).await?;
        Ok(())
    }
}

#[async_trait]
impl PlayerRepository for KvPlayerRepository {
    async fn get_player(&self, player_id: &PlayerId) -> Result<Player, RepositoryError> {
        self.read(player_id).await
    }

    async fn set_player(&self, player: &Player) -> Result<(), RepositoryError> {
        let _records = self.records.lock().await;
        self.write(player).await
    }

    async fn update_player(
        &self,
        player_id: &PlayerId,
        change: PlayerChange,
    ) -> Result<Player, RepositoryError> {
        let _records = self.records.lock().await;
        let mut player = self.read(player_id).await?;
        change(&mut player);
        self.write(&player).await?;
        Ok(player)
    }

    async fn delete_player(&self, player_id: &PlayerId) -> Result<(), RepositoryError> {
        let _records = self.records.lock().await;
        self.store.hdel(PLAYER_TABLE, player_id.as_str()).await?;
        Ok(())
    }

    async fn list_players(&self) -> Result<Vec<Player>, RepositoryError> {
        self.store
            .hvals(PLAYER_TABLE)
            .await?
            .iter()
            .map(|raw| decode(raw))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{domain::PlayerStatus, infrastructure::kv::InMemoryKeyValueStore};

    #[tokio::test]
    async fn test_player_lifecycle() {
        // テスト項目: プレイヤーの保存・更新・削除
        // given (前提条件):
        let repo = KvPlayerRepository::new(Arc::new(InMemoryKeyValueStore::new()));
        let id = PlayerId::new("alice".to_string()).unwrap();
        let mut player = Player::new(id.clone(), "2024-01-01 00:00:00".to_string());
        repo.set_player(&player).await.unwrap();

        // when (操作):
        player.status = PlayerStatus::Spectating;
        repo.set_player(&player).await.unwrap();
        let updated = repo.get_player(&id).await.unwrap();
        repo.delete_player(&id).await.unwrap();

        // then (期待する結果):
        assert_eq!(updated.status, PlayerStatus::Spectating);
        assert_eq!(
            repo.get_player(&id).await,
            Err(RepositoryError::PlayerNotFound("alice".to_string()))
        );
        assert!(repo.list_players().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_missing_player() {
        // テスト項目: 存在しないプレイヤーの更新はレコードを作らない
        // given (前提条件):
        let repo = KvPlayerRepository::new(Arc::new(InMemoryKeyValueStore::new()));
        let id = PlayerId::new("ghost".to_string()).unwrap();

        // when (操作):
        let result = repo
            .update_player(&id, Box::new(|p: &mut Player| p.matches_played += 1))
            .await;

        // then (期待する結果):
        assert_eq!(result, Err(RepositoryError::PlayerNotFound("ghost".to_string())));
        assert!(repo.list_players().await.unwrap().is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_updates_are_not_lost() {
        // テスト項目: 同じプレイヤーへの並行した対局数加算と名前・状態変更がすべて反映される
        // given (前提条件):
        let repo = Arc::new(KvPlayerRepository::new(Arc::new(InMemoryKeyValueStore::new())));
        let id = PlayerId::new("alice".to_string()).unwrap();
        repo.set_player(&Player::new(id.clone(), "2024-01-01 00:00:00".to_string()))
            .await
            .unwrap();

        // when (操作):
        let mut handles = Vec::new();
        for i in 0..50 {
            let repo = repo.clone();
            let id = id.clone();
            handles.push(tokio::spawn(async move {
                repo.update_player(&id, Box::new(|p: &mut Player| p.matches_played += 1))
                    .await
                    .unwrap();
                let name = format!("alice{}", i);
                repo.update_player(&id, Box::new(move |p: &mut Player| p.name = name))
                    .await
                    .unwrap();
                let spectate = Box::new(|p: &mut Player| p.status = PlayerStatus::Spectating);
                repo.update_player(&id, spectate).await.unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        // then (期待する結果):
        let stored = repo.get_player(&id).await.unwrap();
        assert_eq!(stored.matches_played, 50);
        assert!(stored.name.starts_with("alice"));
        assert_eq!(stored.status, PlayerStatus::Spectating);
    }
}
