//! Player エンティティ

use serde::{Deserialize, Serialize};

use crate::domain::value_object::{Color, PlayerId, PlayerStatus, Role};

/// 接続中のプレイヤー
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub status: PlayerStatus,
    pub login_time: String,
    pub matches_played: u32,
}

impl Player {
    /// 接続直後のプレイヤー名
    pub const DEFAULT_NAME: &'static str = "unnamed";

    /// 新しく接続したプレイヤーを作成
    pub fn new(id: PlayerId, login_time: String) -> Self {
        Self {
            id,
            name: Self::DEFAULT_NAME.to_string(),
            status: PlayerStatus::Leisure,
            login_time,
            matches_played: 0,
        }
    }
}

/// ルーム内での対局者としてのプレイヤー
///
/// Serialized flat: the player's own fields sit next to `role`, `color` and `ready`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerDetails {
    #[serde(flatten)]
    pub player: Player,
    pub role: Role,
    pub color: Color,
    pub ready: bool,
}

impl PlayerDetails {
    pub fn new(player: Player, role: Role, color: Color) -> Self {
        Self {
            player,
            role,
            color,
            ready: false,
        }
    }

    pub fn id(&self) -> &PlayerId {
        &self.player.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_player_defaults() {
        // テスト項目: 新規プレイヤーは unnamed / leisure / 対局数 0 で作成される
        // given (前提条件):
        let id = PlayerId::new("p1".to_string()).unwrap();

        // when (操作):
        let player = Player::new(id.clone(), "2024-01-01 00:00:00".to_string());

        // then (期待する結果):
        assert_eq!(player.id, id);
        assert_eq!(player.name, "unnamed");
        assert_eq!(player.status, PlayerStatus::Leisure);
        assert_eq!(player.matches_played, 0);
    }

    #[test]
    fn test_player_details_serializes_flat() {
        // テスト項目: PlayerDetails はプレイヤーのフィールドを平坦化してシリアライズする
        // given (前提条件):
        let player = Player::new(
            PlayerId::new("p1".to_string()).unwrap(),
            "2024-01-01 00:00:00".to_string(),
        );
        let details = PlayerDetails::new(player, Role::Host, Color::White);

        // when (操作):
        let json = serde_json::to_value(&details).unwrap();
        let restored: PlayerDetails = serde_json::from_value(json.clone()).unwrap();

        // then (期待する結果):
        assert_eq!(json["id"], "p1");
        assert_eq!(json["status"], "leisure");
        assert_eq!(json["role"], "host");
        assert_eq!(json["color"], 1);
        assert_eq!(json["ready"], false);
        assert_eq!(restored, details);
    }
}
