//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::{mpsc, oneshot};

use crate::{
    domain::PlayerId,
    infrastructure::dto::websocket::OpCode,
    ui::{router, state::AppState},
};

/// Upgrades the request. The player is registered only once the upgrade
/// has completed, so a failed handshake leaves no record behind.
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns a task that drains the session channel into the WebSocket sink.
///
/// Every message addressed to this player (by the router of any session)
/// passes through here.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    // Create a channel for this session's outbound messages
    let (tx, rx) = mpsc::unbounded_channel();

    // Issue an id, create the player record and register the session
    let player = match state.connect_player_usecase.execute(tx).await {
        Ok(player) => player,
        Err(e) => {
            tracing::error!("Failed to register new player: {}", e);
            return;
        }
    };
    tracing::info!("Player '{}' connected", player.id);

    let (sender, mut receiver) = socket.split();
    let player_id: PlayerId = player.id.clone();

    // Start draining before anything is queued for this session
    let mut send_task = pusher_loop(rx, sender);

    // Greet the new player, then tell everyone the lobby changed
    state
        .notifier
        .send_to(&player_id, OpCode::GetPlayer, &player)
        .await;
    match state.get_players_usecase.execute().await {
        Ok(players) => {
            state
                .notifier
                .broadcast(OpCode::GetPlayers, &players)
                .await
        }
        Err(e) => tracing::warn!("Failed to broadcast players: {}", e),
    }

    // Spawn a task to dispatch messages from this client.
    // A frame already being dispatched always runs to completion; `stop`
    // only interrupts the wait for the next one.
    let (stop_tx, mut stop_rx) = oneshot::channel::<()>();
    let state_clone = state.clone();
    let reader_id = player_id.clone();
    let mut recv_task = tokio::spawn(async move {
        loop {
            let next = tokio::select! {
                next = receiver.next() => next,
                _ = &mut stop_rx => break,
            };
            let msg = match next {
                Some(Ok(msg)) => msg,
                Some(Err(e)) => {
                    tracing::error!("WebSocket error from '{}': {}", reader_id, e);
                    break;
                }
                None => break,
            };

            match msg {
                Message::Text(text) => {
                    tracing::debug!("Received from '{}': {}", reader_id, text);
                    router::dispatch(&state_clone, &reader_id, text.as_str()).await;
                }
                Message::Ping(_) => {
                    tracing::trace!("Received ping");
                }
                Message::Close(_) => {
                    tracing::info!("Player '{}' requested close", reader_id);
                    break;
                }
                _ => {}
            }
        }
    });

    let reader_finished = tokio::select! {
        _ = &mut recv_task => true,
        _ = &mut send_task => false,
    };
    if reader_finished {
        send_task.abort();
    } else {
        // The writer is gone; let the reader finish its current frame
        let _ = stop_tx.send(());
        if let Err(e) = recv_task.await {
            tracing::error!("Reader of '{}' failed: {}", player_id, e);
        }
    }

    tracing::debug!("Session of '{}' closed", player_id);
    router::disconnect(&state, &player_id).await;
}
