//! メッセージ送信（通知）の抽象化
//!
//! UseCase / UI 層はこの trait を通じてセッションへメッセージを送る。
//! セッション表はゲーム状態のロックとは独立して守られており、
//! 送信がルームロックを待つことはない。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{error::MessagePushError, value_object::PlayerId};

/// セッションへの送信チャンネル
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// MessagePusher trait
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// セッションを登録
    async fn register_client(&self, player_id: PlayerId, sender: PusherChannel);

    /// セッションを登録解除
    async fn unregister_client(&self, player_id: &PlayerId);

    /// 特定のプレイヤーに送信
    async fn push_to(&self, player_id: &PlayerId, content: &str) -> Result<(), MessagePushError>;

    /// 指定した順にプレイヤーへ送信する。一部の送信失敗は許容する。
    async fn broadcast(&self, targets: Vec<PlayerId>, content: &str)
    -> Result<(), MessagePushError>;

    /// 接続中の全セッションに送信
    async fn broadcast_all(&self, content: &str) -> Result<(), MessagePushError>;
}
