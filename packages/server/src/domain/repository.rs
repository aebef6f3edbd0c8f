//! Repository trait 定義
//!
//! ドメイン層が必要とするデータアクセスのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。
//!
//! 外部ストアはキー単位の読み書きしか保証しないため、複数キーにまたがる
//! 整合性は呼び出し側（UseCase 層）がルームロックの内側で担保する。

use async_trait::async_trait;

use super::{
    entity::{DialogMsg, Player, Room},
    error::RepositoryError,
    value_object::{PlayerId, RoomId},
};

/// Room Repository trait
///
/// 対局ルームのレコードを ID で読み書きする。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// ルームを取得。存在しなければ `RepositoryError::RoomNotFound`
    async fn get_room(&self, room_id: &RoomId) -> Result<Room, RepositoryError>;

    /// ルームを保存（上書き）
    async fn set_room(&self, room: &Room) -> Result<(), RepositoryError>;

    /// ルームを削除
    async fn delete_room(&self, room_id: &RoomId) -> Result<(), RepositoryError>;

    /// 全ルームを取得
    async fn list_rooms(&self) -> Result<Vec<Room>, RepositoryError>;
}

/// プレイヤーレコードに適用する変更
pub type PlayerChange = Box<dyn FnOnce(&mut Player) + Send>;

/// Player Repository trait
///
/// 既存レコードの変更は `update_player` を通す。読み込みから書き戻しまでを
/// 1 つの操作として行うため、同じプレイヤーへの並行した変更が失われない。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlayerRepository: Send + Sync {
    /// プレイヤーを取得。存在しなければ `RepositoryError::PlayerNotFound`
    async fn get_player(&self, player_id: &PlayerId) -> Result<Player, RepositoryError>;

    async fn set_player(&self, player: &Player) -> Result<(), RepositoryError>;

    /// 保存済みのプレイヤーに `change` を適用して書き戻し、変更後の値を返す。
    /// 存在しなければ `RepositoryError::PlayerNotFound`
    async fn update_player(
        &self,
        player_id: &PlayerId,
        change: PlayerChange,
    ) -> Result<Player, RepositoryError>;

    async fn delete_player(&self, player_id: &PlayerId) -> Result<(), RepositoryError>;

    async fn list_players(&self) -> Result<Vec<Player>, RepositoryError>;
}

/// ロビー（ホール）チャットの Repository trait
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HallRepository: Send + Sync {
    /// 発言を追加。10 件を超えたら古いものから捨てる
    async fn append_dialog(&self, msg: &DialogMsg) -> Result<(), RepositoryError>;

    /// 古い順に全件取得
    async fn get_dialog(&self) -> Result<Vec<DialogMsg>, RepositoryError>;
}
