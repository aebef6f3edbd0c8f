//! UseCase: ルーム退室
//!
//! 退室者の席によって結果が変わる。
//!
//! | 退室者 | 結果 |
//! |---|---|
//! | host（挑戦者なし） | ルーム削除。観戦者は `leisure` に戻る |
//! | host（挑戦者あり） | 挑戦者が host に昇格。対局中なら逃亡（挑戦者の勝ち） |
//! | challenger | 挑戦者席が空く。対局中なら逃亡（host の勝ち） |
//! | spectator | 観戦者リストから外れる |

use std::sync::Arc;

use crate::domain::{
    GameOver, LeaveOutcome, PlayerId, PlayerRepository, Room, RoomId, RoomLockRegistry,
    RoomRepository, Seat,
};

use super::{
    error::MatchError,
    room_access::{back_to_leisure, locked_room, record_match, reset_to_leisure},
};

/// 退室の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeaveRoomOutput {
    /// プレイヤーはルームにいなかった。ルームはそのまま
    NotMember(Room),
    /// ルームは残る。対局を放棄した場合は終局記録が付く
    Left {
        room: Room,
        game_over: Option<GameOver>,
    },
    /// ルームは削除された。`spectators` は削除時にいた観戦者
    Deleted {
        room_id: RoomId,
        spectators: Vec<PlayerId>,
    },
}

/// ルーム退室のユースケース
pub struct LeaveRoomUseCase {
    locks: Arc<RoomLockRegistry>,
    rooms: Arc<dyn RoomRepository>,
    players: Arc<dyn PlayerRepository>,
}

impl LeaveRoomUseCase {
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
    ) -> Result<LeaveRoomOutput, MatchError> {
        let (guard, mut room) = locked_room(&self.locks, self.rooms.as_ref(), room_id).await?;
        let seat = room.seat_of(player_id);

        match room.leave(player_id) {
            LeaveOutcome::Absent => Ok(LeaveRoomOutput::NotMember(room)),
            LeaveOutcome::Deleted { spectators } => {
                self.rooms.delete_room(room_id).await?;
                let spectators: Vec<PlayerId> = spectators.into_iter().map(|p| p.id).collect();
                let reset = reset_to_leisure(self.players.as_ref(), &spectators).await;
                guard.unlock();
                self.locks.delete(room_id).await;
                reset?;

                tracing::info!("Room '{}' deleted, host '{}' left", room_id, player_id);
                Ok(LeaveRoomOutput::Deleted {
                    room_id: room_id.clone(),
                    spectators,
                })
            }
            LeaveOutcome::Left { game_over } => {
                if let Some(game_over) = &game_over {
                    let ids: Vec<PlayerId> =
                        game_over.participants().map(|d| d.id().clone()).collect();
                    record_match(self.players.as_ref(), &ids).await?;
                    tracing::info!("Player '{}' escaped from room '{}'", player_id, room_id);
                }
                if matches!(seat, Some(Seat::Spectator(_))) {
                    back_to_leisure(self.players.as_ref(), player_id).await?;
                }
                self.rooms.set_room(&room).await?;

                tracing::info!("Player '{}' left room '{}'", player_id, room_id);
                Ok(LeaveRoomOutput::Left { room, game_over })
            }
        }
    }

    /// 並行して削除されたルームなら何もせず `None` を返す
    pub async fn execute_if_exists(
        &self,
        player_id: &PlayerId,
        room_id: &RoomId,
    ) -> Result<Option<LeaveRoomOutput>, MatchError> {
        if !self.locks.exists(room_id).await {
            tracing::debug!("Room '{}' is already gone, skipping leave", room_id);
            return Ok(None);
        }
        self.execute(player_id, room_id).await.map(Some)
    }
}
