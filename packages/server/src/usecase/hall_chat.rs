//! UseCase: ロビー（ホール）チャット

use std::sync::Arc;

use gomoku_shared::time::Clock;

use crate::domain::{DialogMsg, HallRepository, PlayerId, PlayerRepository};

use super::error::LobbyError;

/// ロビーでの発言
pub struct HallChatUseCase {
    hall: Arc<dyn HallRepository>,
    players: Arc<dyn PlayerRepository>,
    clock: Arc<dyn Clock>,
}

impl HallChatUseCase {
    pub fn new(
        hall: Arc<dyn HallRepository>,
        players: Arc<dyn PlayerRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            hall,
            players,
            clock,
        }
    }

    pub async fn execute(
        &self,
        player_id: &PlayerId,
        content: String,
    ) -> Result<DialogMsg, LobbyError> {
        let sender = self.players.get_player(player_id).await?;
        let msg = DialogMsg::new(self.clock.now_formatted(), sender.name, content);
        self.hall.append_dialog(&msg).await?;
        Ok(msg)
    }
}

/// ロビーチャット履歴の取得
pub struct GetHallDialogUseCase {
    hall: Arc<dyn HallRepository>,
}

impl GetHallDialogUseCase {
    pub fn new(hall: Arc<dyn HallRepository>) -> Self {
        Self { hall }
    }

    pub async fn execute(&self) -> Result<Vec<DialogMsg>, LobbyError> {
        Ok(self.hall.get_dialog().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::DIALOG_CAPACITY,
        usecase::test_support::{FIXED_TIME, Fixture, pid},
    };

    #[tokio::test]
    async fn test_hall_chat_is_bounded() {
        // テスト項目: ロビーチャットは最新 10 件だけ残る
        // given (前提条件):
        let fx = Fixture::new();
        fx.player("alice").await;
        let chat = HallChatUseCase::new(fx.hall.clone(), fx.players.clone(), fx.clock.clone());
        let history = GetHallDialogUseCase::new(fx.hall.clone());

        // when (操作):
        for n in 0..12 {
            chat.execute(&pid("alice"), format!("hi {}", n)).await.unwrap();
        }
        let dialog = history.execute().await.unwrap();

        // then (期待する結果):
        assert_eq!(dialog.len(), DIALOG_CAPACITY);
        assert_eq!(dialog[0].content, "hi 2");
        assert_eq!(dialog[0].from, "alice");
        assert_eq!(dialog[0].time, FIXED_TIME);
    }
}
