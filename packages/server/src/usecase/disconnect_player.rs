//! UseCase: プレイヤー切断処理
//!
//! セッションを登録解除し、プレイヤーのレコードを削除してから、
//! そのプレイヤーがいた全ルームで退室処理を行う。

use std::sync::Arc;

use crate::domain::{MessagePusher, PlayerId, PlayerRepository, RoomRepository};

use super::{
    error::LobbyError,
    leave_room::{LeaveRoomOutput, LeaveRoomUseCase},
};

/// プレイヤー切断のユースケース
pub struct DisconnectPlayerUseCase {
    rooms: Arc<dyn RoomRepository>,
    players: Arc<dyn PlayerRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    leave_room: Arc<LeaveRoomUseCase>,
}

impl DisconnectPlayerUseCase {
    pub fn new(
        rooms: Arc<dyn RoomRepository>,
        players: Arc<dyn PlayerRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        leave_room: Arc<LeaveRoomUseCase>,
    ) -> Self {
        Self {
            rooms,
            players,
            message_pusher,
            leave_room,
        }
    }

    /// プレイヤー切断を実行
    ///
    /// # Returns
    ///
    /// 退室処理を行った各ルームの結果。あるルームでの退室に失敗しても
    /// 残りのルームの処理は続ける。
    pub async fn execute(&self, player_id: &PlayerId) -> Result<Vec<LeaveRoomOutput>, LobbyError> {
        // 1. セッションを登録解除
        self.message_pusher.unregister_client(player_id).await;

        // 2. プレイヤーのレコードを削除
        self.players.delete_player(player_id).await?;

        // 3. いたルームから退室（一覧はロックなしのスナップショット）
        let rooms = self.rooms.list_rooms().await?;
        let mut outputs = Vec::new();
        for room in rooms.iter().filter(|r| r.contains(player_id)) {
            match self.leave_room.execute_if_exists(player_id, &room.id).await {
                Ok(Some(output)) => outputs.push(output),
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!(
                        "Failed to leave room '{}' for disconnected player '{}': {}",
                        room.id,
                        player_id,
                        e
                    );
                }
            }
        }

        tracing::info!("Player '{}' disconnected", player_id);
        Ok(outputs)
    }
}
