//! WebSocket を使った MessagePusher 実装
//!
//! ## 責務
//!
//! - プレイヤー ID → WebSocket 送信チャンネルの表を管理
//! - 1 人・指定した複数人・全員への送信
//!
//! WebSocket の受け付けと送信チャンネルの生成は UI 層（`ui/handler/websocket.rs`）が行い、
//! この実装は受け取ったチャンネルに書き込むだけ。
//! 表はルームロックとは別の Mutex で守られている。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{MessagePushError, MessagePusher, PlayerId, PusherChannel};

/// WebSocket を使った MessagePusher 実装
pub struct WebSocketMessagePusher {
    /// Key: player_id, Value: そのセッションへの送信チャンネル
    clients: Arc<Mutex<HashMap<PlayerId, PusherChannel>>>,
}

impl WebSocketMessagePusher {
    pub fn new(clients: Arc<Mutex<HashMap<PlayerId, PusherChannel>>>) -> Self {
        Self { clients }
    }
}

impl Default for WebSocketMessagePusher {
    fn default() -> Self {
        Self::new(Arc::new(Mutex::new(HashMap::new())))
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_client(&self, player_id: PlayerId, sender: PusherChannel) {
        let mut clients = self.clients.lock().await;
        tracing::debug!("Player '{}' registered to MessagePusher", player_id);
        clients.insert(player_id, sender);
    }

    async fn unregister_client(&self, player_id: &PlayerId) {
        let mut clients = self.clients.lock().await;
        clients.remove(player_id);
        tracing::debug!("Player '{}' unregistered from MessagePusher", player_id);
    }

    async fn push_to(&self, player_id: &PlayerId, content: &str) -> Result<(), MessagePushError> {
        let clients = self.clients.lock().await;

        let sender = clients
            .get(player_id)
            .ok_or_else(|| MessagePushError::ClientNotFound(player_id.to_string()))?;
        sender
            .send(content.to_string())
            .map_err(|e| MessagePushError::PushFailed(e.to_string()))?;
        tracing::debug!("Pushed message to player '{}'", player_id);
        Ok(())
    }

    async fn broadcast(
        &self,
        targets: Vec<PlayerId>,
        content: &str,
    ) -> Result<(), MessagePushError> {
        let clients = self.clients.lock().await;

        for target in targets {
            match clients.get(&target) {
                // ブロードキャストでは一部の送信失敗を許容
                Some(sender) => {
                    if let Err(e) = sender.send(content.to_string()) {
                        tracing::warn!("Failed to push message to player '{}': {}", target, e);
                    }
                }
                None => {
                    tracing::warn!("Player '{}' has no live session, skipping", target);
                }
            }
        }

        Ok(())
    }

    async fn broadcast_all(&self, content: &str) -> Result<(), MessagePushError> {
        let clients = self.clients.lock().await;

        for (player_id, sender) in clients.iter() {
            if let Err(e) = sender.send(content.to_string()) {
                tracing::warn!("Failed to push message to player '{}': {}", player_id, e);
            }
        }
        tracing::debug!("Broadcasted message to {} sessions", clients.len());

        Ok(())
    }
}
