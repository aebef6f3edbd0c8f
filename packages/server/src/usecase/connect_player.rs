//! UseCase: プレイヤー接続処理
//!
//! 接続ごとに新しいプレイヤー ID を発行し、プレイヤーのレコードを作成して
//! セッションを MessagePusher に登録する。

use std::sync::Arc;

use gomoku_shared::time::Clock;

use crate::domain::{MessagePusher, Player, PlayerId, PlayerRepository, PusherChannel};

use super::error::LobbyError;

/// プレイヤー接続のユースケース
pub struct ConnectPlayerUseCase {
    players: Arc<dyn PlayerRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
}

impl ConnectPlayerUseCase {
    pub fn new(
        players: Arc<dyn PlayerRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            players,
            message_pusher,
            clock,
        }
    }

    /// プレイヤー接続を実行
    ///
    /// # Arguments
    ///
    /// * `sender` - このセッションへの送信チャンネル
    ///
    /// # Returns
    ///
    /// 作成されたプレイヤー（名前 `unnamed`、状態 `leisure`、対局数 0）
    pub async fn execute(&self, sender: PusherChannel) -> Result<Player, LobbyError> {
        // 1. ID を発行してレコードを作成
        let player = Player::new(PlayerId::generate(), self.clock.now_formatted());
        self.players.set_player(&player).await?;

        // 2. MessagePusher にセッションを登録
        self.message_pusher
            .register_client(player.id.clone(), sender)
            .await;

        tracing::info!("Player '{}' connected", player.id);
        Ok(player)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::PlayerStatus,
        infrastructure::message_pusher::WebSocketMessagePusher,
        usecase::test_support::{FIXED_TIME, Fixture},
    };
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn test_connect_creates_player_and_session() {
        // テスト項目: 接続すると既定値のプレイヤーが作られ、セッションが登録される
        // given (前提条件):
        let fx = Fixture::new();
        let pusher = Arc::new(WebSocketMessagePusher::default());
        let usecase = ConnectPlayerUseCase::new(fx.players.clone(), pusher.clone(), fx.clock.clone());
        let (tx, mut rx) = mpsc::unbounded_channel();

        // when (操作):
        let player = usecase.execute(tx).await.unwrap();

        // then (期待する結果):
        assert_eq!(player.name, "unnamed");
        assert_eq!(player.status, PlayerStatus::Leisure);
        assert_eq!(player.login_time, FIXED_TIME);
        assert_eq!(player.matches_played, 0);
        assert_eq!(fx.players.get_player(&player.id).await.unwrap(), player);
        pusher.push_to(&player.id, "ping").await.unwrap();
        assert_eq!(rx.recv().await, Some("ping".to_string()));
    }

    #[tokio::test]
    async fn test_each_connection_gets_a_fresh_id() {
        // テスト項目: 接続ごとに異なるプレイヤー ID が発行される
        // given (前提条件):
        let fx = Fixture::new();
        let pusher = Arc::new(WebSocketMessagePusher::default());
        let usecase = ConnectPlayerUseCase::new(fx.players.clone(), pusher.clone(), fx.clock.clone());

        // when (操作):
        let (tx1, _rx1) = mpsc::unbounded_channel();
        let (tx2, _rx2) = mpsc::unbounded_channel();
        let a = usecase.execute(tx1).await.unwrap();
        let b = usecase.execute(tx2).await.unwrap();

        // then (期待する結果):
        assert_ne!(a.id, b.id);
        assert_eq!(fx.players.list_players().await.unwrap().len(), 2);
        assert!(pusher.push_to(&a.id, "a").await.is_ok());
        assert!(pusher.push_to(&b.id, "b").await.is_ok());
    }
}
