//! UseCase: プレイヤー情報取得

use std::sync::Arc;

use crate::domain::{Player, PlayerId, PlayerRepository};

use super::error::LobbyError;

/// プレイヤー 1 人の取得
pub struct GetPlayerUseCase {
    players: Arc<dyn PlayerRepository>,
}

impl GetPlayerUseCase {
    pub fn new(players: Arc<dyn PlayerRepository>) -> Self {
        Self { players }
    }

    pub async fn execute(&self, player_id: &PlayerId) -> Result<Player, LobbyError> {
        Ok(self.players.get_player(player_id).await?)
    }
}

/// 全プレイヤーの取得
pub struct GetPlayersUseCase {
    players: Arc<dyn PlayerRepository>,
}

impl GetPlayersUseCase {
    pub fn new(players: Arc<dyn PlayerRepository>) -> Self {
        Self { players }
    }

    /// ログイン順（同時刻なら ID 順）
    pub async fn execute(&self) -> Result<Vec<Player>, LobbyError> {
        let mut players = self.players.list_players().await?;
        players.sort_by(|a, b| {
            a.login_time
                .cmp(&b.login_time)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(players)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{RepositoryError, repository::MockPlayerRepository},
        usecase::test_support::{Fixture, pid},
    };

    #[tokio::test]
    async fn test_get_players_sorted() {
        // テスト項目: 全プレイヤーがログイン順・ID 順に返る
        // given (前提条件):
        let fx = Fixture::new();
        fx.player("bob").await;
        fx.player("alice").await;
        let usecase = GetPlayersUseCase::new(fx.players.clone());

        // when (操作):
        let players = usecase.execute().await.unwrap();

        // then (期待する結果):
        let ids: Vec<_> = players.into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![pid("alice"), pid("bob")]);
    }

    #[tokio::test]
    async fn test_get_player_store_failure() {
        // テスト項目: ストア障害はそのまま Store エラーとして返る
        // given (前提条件):
        let mut players = MockPlayerRepository::new();
        players
            .expect_get_player()
            .returning(|_| Err(RepositoryError::Storage("timeout".to_string())));
        let usecase = GetPlayerUseCase::new(Arc::new(players));

        // when (操作):
        let result = usecase.execute(&pid("alice")).await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(LobbyError::Store("storage error: timeout".to_string()))
        );
    }
}
