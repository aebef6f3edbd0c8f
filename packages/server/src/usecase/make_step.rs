//! UseCase: 着手

use std::sync::Arc;

use crate::domain::{
    GameOver, PlayerId, PlayerRepository, Room, RoomId, RoomLockRegistry, RoomRepository, Step,
};

use super::{
    error::MatchError,
    room_access::{locked_room, record_match},
};

/// 着手の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutput {
    pub room: Room,
    pub step: Step,
    /// 五連が完成した場合の終局記録
    pub game_over: Option<GameOver>,
}

/// 着手のユースケース
pub struct MakeStepUseCase {
    locks: Arc<RoomLockRegistry>,
    rooms: Arc<dyn RoomRepository>,
    players: Arc<dyn PlayerRepository>,
}

impl MakeStepUseCase {
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
        step: Step,
    ) -> Result<StepOutput, MatchError> {
        let (_guard, mut room) = locked_room(&self.locks, self.rooms.as_ref(), room_id).await?;
        let game_over = room.place(player_id, step)?;

        if let Some(game_over) = &game_over {
            let ids: Vec<PlayerId> = game_over.participants().map(|d| d.id().clone()).collect();
            record_match(self.players.as_ref(), &ids).await?;
            tracing::info!(
                "Game over in room '{}': five in a row by '{}'",
                room_id,
                player_id
            );
        }
        self.rooms.set_room(&room).await?;

        Ok(StepOutput {
            room,
            step,
            game_over,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{Cause, Color, RuleViolation},
        usecase::test_support::{Fixture, pid},
    };

    fn usecase(fx: &Fixture) -> MakeStepUseCase {
        MakeStepUseCase::new(fx.locks.clone(), fx.rooms.clone(), fx.players.clone())
    }

    #[tokio::test]
    async fn test_winning_sequence_on_row_seven() {
        // テスト項目: 7 行目に黒が 5 連を作ると 9 手目で終局し、色が入れ替わる
        // given (前提条件): alice = 黒, bob = 白
        let fx = Fixture::new();
        let room = fx.started_room().await;
        let usecase = usecase(&fx);
        let moves = [
            ("alice", 7, 0),
            ("bob", 0, 0),
            ("alice", 7, 1),
            ("bob", 0, 1),
            ("alice", 7, 2),
            ("bob", 0, 2),
            ("alice", 7, 3),
            ("bob", 0, 3),
        ];
        for (who, i, j) in moves {
            let out = usecase
                .execute(&pid(who), &room.id, Step::new(i, j).unwrap())
                .await
                .unwrap();
            assert!(out.game_over.is_none());
        }

        // when (操作):
        let out = usecase
            .execute(&pid("alice"), &room.id, Step::new(7, 4).unwrap())
            .await
            .unwrap();

        // then (期待する結果):
        let game_over = out.game_over.unwrap();
        assert_eq!(game_over.cause, Cause::Five);
        assert_eq!(game_over.winner.unwrap().id(), &pid("alice"));
        assert_eq!(game_over.loser.unwrap().id(), &pid("bob"));
        let stored = fx.stored_room(&room.id).await;
        assert_eq!(stored.steps.len(), 9);
        assert!(!stored.started);
        assert!(!stored.host.ready);
        assert_eq!(stored.host.color, Color::White);
        assert_eq!(stored.challenger.unwrap().color, Color::Black);
        assert_eq!(fx.stored_player("alice").await.matches_played, 1);
        assert_eq!(fx.stored_player("bob").await.matches_played, 1);
    }

    #[tokio::test]
    async fn test_step_before_start_is_rejected() {
        // テスト項目: 開始前の着手は拒否され、ルームは変わらない
        // given (前提条件):
        let fx = Fixture::new();
        let room = fx.room("alice").await;

        // when (操作):
        let result = usecase(&fx)
            .execute(&pid("alice"), &room.id, Step::new(7, 7).unwrap())
            .await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(MatchError::Rule(RuleViolation::NotStarted(room.id.clone())))
        );
        assert!(fx.stored_room(&room.id).await.steps.is_empty());
    }
}
