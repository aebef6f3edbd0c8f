//! UseCase: 待った
//!
//! 要求側が `Consent::Request` を送り、相手が `Accept` / `Decline` で答える。
//! 盤面が変わるのは `Accept` のときだけで、それ以外は相手への中継のみ。

use std::sync::Arc;

use crate::domain::{Consent, PlayerId, Room, RoomId, RoomLockRegistry, RoomRepository};

use super::{error::MatchError, room_access::locked_room};

/// 待ったの結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetractOutput {
    pub room: Room,
    /// 呼び出し側の相手（待ったの要求・応答の中継先）
    pub opponent: PlayerId,
    pub consent: Consent,
    /// 取り除いた手数（承諾時のみ 1 または 2）
    pub count: usize,
}

/// 待ったのユースケース
pub struct RetractStepUseCase {
    locks: Arc<RoomLockRegistry>,
    rooms: Arc<dyn RoomRepository>,
}

impl RetractStepUseCase {
    pub fn new(locks: Arc<RoomLockRegistry>, rooms: Arc<dyn RoomRepository>) -> Self {
        Self { locks, rooms }
    }

    pub async fn execute(
        &self,
        player_id: &PlayerId,
        room_id: &RoomId,
        consent: Consent,
    ) -> Result<RetractOutput, MatchError> {
        let (_guard, mut room) = locked_room(&self.locks, self.rooms.as_ref(), room_id).await?;
        let retraction = room.retract(player_id, consent)?;

        if retraction.removed > 0 {
            self.rooms.set_room(&room).await?;
            tracing::info!(
                "Retracted {} step(s) in room '{}'",
                retraction.removed,
                room_id
            );
        }

        Ok(RetractOutput {
            room,
            opponent: retraction.opponent,
            consent,
            count: retraction.removed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{RuleViolation, Step},
        usecase::test_support::{Fixture, pid},
    };

    async fn room_with_steps(fx: &Fixture, steps: &[(u8, u8)]) -> Room {
        let mut room = fx.started_room().await;
        room.steps = steps.iter().map(|&(i, j)| Step::new(i, j).unwrap()).collect();
        fx.rooms.set_room(&room).await.unwrap();
        room
    }

    #[tokio::test]
    async fn test_accept_removes_steps_and_persists() {
        // テスト項目: 承諾すると手が戻り、ストアにも反映される
        // given (前提条件): 黒・白・黒。bob (白) の要求を alice が承諾
        let fx = Fixture::new();
        let room = room_with_steps(&fx, &[(7, 7), (7, 8), (8, 8)]).await;
        let usecase = RetractStepUseCase::new(fx.locks.clone(), fx.rooms.clone());

        // when (操作):
        let out = usecase
            .execute(&pid("alice"), &room.id, Consent::Accept)
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(out.count, 2);
        assert_eq!(out.opponent, pid("bob"));
        assert_eq!(fx.stored_room(&room.id).await.steps.len(), 1);
    }

    #[tokio::test]
    async fn test_request_is_relayed_without_mutation() {
        // テスト項目: 要求は相手 ID を返すだけで盤面を変えない
        // given (前提条件):
        let fx = Fixture::new();
        let room = room_with_steps(&fx, &[(7, 7), (7, 8)]).await;
        let usecase = RetractStepUseCase::new(fx.locks.clone(), fx.rooms.clone());

        // when (操作):
        let out = usecase
            .execute(&pid("bob"), &room.id, Consent::Request)
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(out.count, 0);
        assert_eq!(out.opponent, pid("alice"));
        assert_eq!(fx.stored_room(&room.id).await.steps.len(), 2);
    }

    #[tokio::test]
    async fn test_retract_without_steps() {
        // テスト項目: 着手がなければ待ったはできない
        // given (前提条件):
        let fx = Fixture::new();
        let room = fx.started_room().await;
        let usecase = RetractStepUseCase::new(fx.locks.clone(), fx.rooms.clone());

        // when (操作):
        let result = usecase.execute(&pid("bob"), &room.id, Consent::Accept).await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(MatchError::Rule(RuleViolation::NoSteps(room.id.clone())))
        );
    }
}
