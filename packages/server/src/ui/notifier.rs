//! 通知の宛先ごとの送信
//!
//! - 1 人: `send_to`
//! - ルーム: `send_to_room`（host → challenger → 観戦者の順）
//! - 全セッション: `broadcast`
//!
//! 送信の失敗（切断済みなど）はログに残すだけで、呼び出し側には返さない。

use std::sync::Arc;

use serde::Serialize;

use crate::{
    domain::{GameOver, MessagePusher, PlayerId, Room},
    infrastructure::dto::websocket::{Envelope, OpCode},
};

/// セッションへの通知
#[derive(Clone)]
pub struct Notifier {
    message_pusher: Arc<dyn MessagePusher>,
}

impl Notifier {
    pub fn new(message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self { message_pusher }
    }

    pub async fn send_to<T: Serialize>(&self, player_id: &PlayerId, code: OpCode, data: T) {
        let Some(json) = encode(code, data) else {
            return;
        };
        if let Err(e) = self.message_pusher.push_to(player_id, &json).await {
            tracing::warn!("Failed to send {:?} to '{}': {}", code, player_id, e);
        }
    }

    /// 指定した順に送る
    pub async fn send_to_many<T: Serialize>(&self, targets: Vec<PlayerId>, code: OpCode, data: T) {
        let Some(json) = encode(code, data) else {
            return;
        };
        if let Err(e) = self.message_pusher.broadcast(targets, &json).await {
            tracing::warn!("Failed to send {:?}: {}", code, e);
        }
    }

    pub async fn send_to_room<T: Serialize>(&self, room: &Room, code: OpCode, data: T) {
        self.send_to_many(room.member_ids(), code, data).await;
    }

    pub async fn broadcast<T: Serialize>(&self, code: OpCode, data: T) {
        let Some(json) = encode(code, data) else {
            return;
        };
        if let Err(e) = self.message_pusher.broadcast_all(&json).await {
            tracing::warn!("Failed to broadcast {:?}: {}", code, e);
        }
    }

    pub async fn send_fail(&self, player_id: &PlayerId, message: String) {
        self.send_to(player_id, OpCode::Fail, message).await;
    }

    /// 終局記録を送り、続けてリセット後のルームを送る
    pub async fn send_game_over(&self, room: &Room, game_over: &GameOver) {
        self.send_to_room(room, OpCode::GameOver, game_over).await;
        self.send_to_room(room, OpCode::SetReady, room).await;
    }
}

fn encode<T: Serialize>(code: OpCode, data: T) -> Option<String> {
    match Envelope::new(code, data).to_json() {
        Ok(json) => Some(json),
        Err(e) => {
            tracing::error!("Failed to serialize {:?} message: {}", code, e);
            None
        }
    }
}
