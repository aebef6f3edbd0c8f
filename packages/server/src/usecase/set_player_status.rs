//! UseCase: プレイヤー状態の変更

use std::sync::Arc;

use crate::domain::{Player, PlayerId, PlayerRepository, PlayerStatus};

use super::error::LobbyError;

/// プレイヤー状態変更のユースケース
pub struct SetPlayerStatusUseCase {
    players: Arc<dyn PlayerRepository>,
}

impl SetPlayerStatusUseCase {
    pub fn new(players: Arc<dyn PlayerRepository>) -> Self {
        Self { players }
    }

    pub async fn execute(
        &self,
        player_id: &PlayerId,
        status: PlayerStatus,
    ) -> Result<Player, LobbyError> {
        let change = Box::new(move |player: &mut Player| player.status = status);
        Ok(self.players.update_player(player_id, change).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecase::test_support::{Fixture, pid};

    #[tokio::test]
    async fn test_set_free_form_status() {
        // テスト項目: 任意の状態タグを保存できる
        // given (前提条件):
        let fx = Fixture::new();
        fx.player("alice").await;
        let usecase = SetPlayerStatusUseCase::new(fx.players.clone());

        // when (操作):
        let player = usecase
            .execute(&pid("alice"), PlayerStatus::from("away".to_string()))
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(player.status, PlayerStatus::Other("away".to_string()));
        assert_eq!(fx.stored_player("alice").await.status, player.status);
    }

    #[tokio::test]
    async fn test_set_status_of_unknown_player() {
        // テスト項目: 存在しないプレイヤーは PlayerNotFound
        // given (前提条件):
        let fx = Fixture::new();
        let usecase = SetPlayerStatusUseCase::new(fx.players.clone());

        // when (操作):
        let result = usecase.execute(&pid("ghost"), PlayerStatus::Leisure).await;

        // then (期待する結果):
        assert_eq!(result, Err(LobbyError::PlayerNotFound("ghost".to_string())));
    }
}
