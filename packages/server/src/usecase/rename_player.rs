//! UseCase: プレイヤー名変更
//!
//! 他のプレイヤーと名前が重複する場合は、重複しなくなるまで末尾に `2` を付ける。

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::domain::{Player, PlayerId, PlayerRepository};

use super::error::LobbyError;

/// 名前変更の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameOutput {
    pub player: Player,
    /// 重複回避のため名前を変えた場合 true
    pub adjusted: bool,
}

/// プレイヤー名変更のユースケース
pub struct RenamePlayerUseCase {
    players: Arc<dyn PlayerRepository>,
    /// 重複チェックと保存の間に別の名前変更が割り込まないようにする
    serial: Mutex<()>,
}

impl RenamePlayerUseCase {
    pub fn new(players: Arc<dyn PlayerRepository>) -> Self {
        Self {
            players,
            serial: Mutex::new(()),
        }
    }

    pub async fn execute(
        &self,
        player_id: &PlayerId,
        name: String,
    ) -> Result<RenameOutput, LobbyError> {
        let _serial = self.serial.lock().await;

        let others = self.players.list_players().await?;
        let taken = |candidate: &str| {
            others
                .iter()
                .any(|p| &p.id != player_id && p.name == candidate)
        };

        let mut unique = name.clone();
        while taken(&unique) {
            unique.push('2');
        }
        let adjusted = unique != name;

        let player = self
            .players
            .update_player(player_id, Box::new(move |player: &mut Player| player.name = unique))
            .await?;

        tracing::info!("Player '{}' renamed to '{}'", player_id, player.name);
        Ok(RenameOutput { player, adjusted })
    }
}
