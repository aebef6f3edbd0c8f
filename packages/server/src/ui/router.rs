//! 受信メッセージのディスパッチ
//!
//! 1 フレームにつき 1 つの操作を実行し、結果を宛先ごとに送る。
//!
//! - 不明なオペコードは無視する（ログのみ）
//! - 失敗した操作は送信元に `fail` を 1 通だけ返す
//! - サーバーからしか送らないオペコード（fail / success / delete-room / game-over）は無視する

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{
    domain::{Color, Consent, PlayerId, PlayerStatus, RoomId, Step},
    infrastructure::dto::websocket::{
        ConsentPayload, EnterRoomPayload, MakeStepPayload, OpCode, RawEnvelope, RetractDto,
        RoomChatDto, RoomChatPayload, SetReadyPayload, StepDto,
    },
    usecase::LeaveRoomOutput,
};

use super::{error::DispatchError, state::AppState};

/// テキストフレーム 1 つを処理する
pub async fn dispatch(state: &AppState, player_id: &PlayerId, text: &str) {
    let envelope: RawEnvelope = match serde_json::from_str(text) {
        Ok(envelope) => envelope,
        Err(e) => {
            let error = DispatchError::from(e);
            tracing::warn!("Malformed frame from '{}': {}", player_id, error);
            state.notifier.send_fail(player_id, error.to_string()).await;
            return;
        }
    };

    let Some(code) = envelope.opcode() else {
        tracing::debug!(
            "Ignoring unknown opcode {} from '{}'",
            envelope.code,
            player_id
        );
        return;
    };

    if let Err(e) = handle(state, player_id, code, envelope.data).await {
        tracing::warn!("{:?} from '{}' failed: {}", code, player_id, e);
        state.notifier.send_fail(player_id, e.to_string()).await;
    }
}

/// 切断したプレイヤーの後始末と通知
pub async fn disconnect(state: &AppState, player_id: &PlayerId) {
    match state.disconnect_player_usecase.execute(player_id).await {
        Ok(outputs) => {
            for output in outputs {
                distribute_leave(state, None, output).await;
            }
        }
        Err(e) => {
            tracing::warn!("Failed to clean up player '{}': {}", player_id, e);
        }
    }
    broadcast_players(state).await;
}

async fn handle(
    state: &AppState,
    player_id: &PlayerId,
    code: OpCode,
    data: Value,
) -> Result<(), DispatchError> {
    let notifier = &state.notifier;

    match code {
        // ========================================
        // ロビー
        // ========================================
        OpCode::HallChat => {
            let content: String = parse(data)?;
            let msg = state.hall_chat_usecase.execute(player_id, content).await?;
            notifier.broadcast(OpCode::HallChat, &msg).await;
        }
        OpCode::GetHallDialog => {
            let dialog = state.get_hall_dialog_usecase.execute().await?;
            notifier.send_to(player_id, code, &dialog).await;
        }
        OpCode::GetPlayer => {
            let player = state.get_player_usecase.execute(player_id).await?;
            notifier.send_to(player_id, code, &player).await;
        }
        OpCode::GetPlayers => {
            let players = state.get_players_usecase.execute().await?;
            notifier.send_to(player_id, code, &players).await;
        }
        OpCode::PlayerRename => {
            let name: String = parse(data)?;
            let output = state.rename_player_usecase.execute(player_id, name).await?;
            if output.adjusted {
                notifier
                    .send_fail(
                        player_id,
                        format!("name already taken, renamed to '{}'", output.player.name),
                    )
                    .await;
            }
            broadcast_players(state).await;
        }
        OpCode::SetPlayerStatus => {
            let status: String = parse(data)?;
            state
                .set_player_status_usecase
                .execute(player_id, PlayerStatus::from(status))
                .await?;
            broadcast_players(state).await;
        }

        // ========================================
        // ルーム
        // ========================================
        OpCode::GetRooms => {
            let rooms = state.get_rooms_usecase.execute().await?;
            notifier.send_to(player_id, code, &rooms).await;
        }
        OpCode::CreateRoom => {
            let color: Color = parse(data)?;
            let room = state.create_room_usecase.execute(player_id, color).await?;
            notifier.send_to(player_id, code, &room).await;
            broadcast_rooms(state).await;
        }
        OpCode::EnterRoom => {
            let payload: EnterRoomPayload = parse(data)?;
            let room = state
                .enter_room_usecase
                .execute(player_id, &payload.rid, payload.role)
                .await?;
            notifier.send_to_room(&room, code, &room).await;
        }
        OpCode::LeaveRoom => {
            let room_id: RoomId = parse(data)?;
            let output = state
                .leave_room_usecase
                .execute(player_id, &room_id)
                .await?;
            distribute_leave(state, Some(player_id), output).await;
        }
        OpCode::RoomChat => {
            let payload: RoomChatPayload = parse(data)?;
            let (room, msg) = state
                .room_chat_usecase
                .execute(player_id, &payload.rid, payload.content)
                .await?;
            let dto = RoomChatDto::from((room.id.clone(), msg));
            notifier.send_to_room(&room, code, &dto).await;
        }

        // ========================================
        // 対局
        // ========================================
        OpCode::SetReady => {
            let payload: SetReadyPayload = parse(data)?;
            let room = state
                .set_ready_usecase
                .execute(player_id, &payload.rid, payload.ready)
                .await?;
            notifier.send_to_room(&room, code, &room).await;
        }
        OpCode::MakeStep => {
            let payload: MakeStepPayload = parse(data)?;
            let step = Step::new(payload.i, payload.j)?;
            let output = state
                .make_step_usecase
                .execute(player_id, &payload.rid, step)
                .await?;
            let dto = StepDto::from((output.room.id.clone(), output.step));
            notifier.send_to_room(&output.room, code, &dto).await;
            if let Some(game_over) = &output.game_over {
                notifier.send_game_over(&output.room, game_over).await;
            }
        }
        OpCode::RetractStep => {
            let payload: ConsentPayload = parse(data)?;
            let output = state
                .retract_step_usecase
                .execute(player_id, &payload.rid, payload.consent)
                .await?;
            if output.consent == Consent::Accept {
                let dto = RetractDto {
                    rid: output.room.id.clone(),
                    consent: output.consent,
                    count: output.count,
                };
                notifier.send_to_room(&output.room, code, &dto).await;
            } else {
                notifier.send_to(&output.opponent, code, &payload).await;
            }
        }
        OpCode::Surrender => {
            let room_id: RoomId = parse(data)?;
            let output = state
                .surrender_usecase
                .execute(player_id, &room_id)
                .await?;
            notifier
                .send_game_over(&output.room, &output.game_over)
                .await;
        }
        OpCode::AskDraw => {
            let payload: ConsentPayload = parse(data)?;
            let output = state
                .draw_usecase
                .execute(player_id, &payload.rid, payload.consent)
                .await?;
            match &output.game_over {
                Some(game_over) => notifier.send_game_over(&output.room, game_over).await,
                None => notifier.send_to(&output.opponent, code, &payload).await,
            }
        }

        OpCode::Fail | OpCode::Success | OpCode::DelRoom | OpCode::GameOver => {
            tracing::debug!("Ignoring server-only opcode {:?} from '{}'", code, player_id);
        }
    }

    Ok(())
}

/// 退室結果の配信
///
/// `leaver` が `None` のときは切断済みのため本人には送らない。
async fn distribute_leave(state: &AppState, leaver: Option<&PlayerId>, output: LeaveRoomOutput) {
    let notifier = &state.notifier;

    match output {
        LeaveRoomOutput::NotMember(room) => {
            if let Some(leaver) = leaver {
                notifier.send_to(leaver, OpCode::LeaveRoom, &room).await;
            }
        }
        LeaveRoomOutput::Left { room, game_over } => {
            let mut audience = room.member_ids();
            audience.extend(leaver.cloned());
            if let Some(game_over) = &game_over {
                notifier
                    .send_to_many(audience.clone(), OpCode::GameOver, game_over)
                    .await;
            }
            notifier
                .send_to_many(audience, OpCode::LeaveRoom, &room)
                .await;
            // 観戦者の状態や対局数が変わっている
            broadcast_players(state).await;
        }
        LeaveRoomOutput::Deleted {
            room_id,
            spectators,
        } => {
            let mut targets: Vec<PlayerId> = leaver.cloned().into_iter().collect();
            targets.extend(spectators);
            notifier
                .send_to_many(targets, OpCode::DelRoom, &room_id)
                .await;
            broadcast_players(state).await;
            broadcast_rooms(state).await;
        }
    }
}

async fn broadcast_players(state: &AppState) {
    match state.get_players_usecase.execute().await {
        Ok(players) => state.notifier.broadcast(OpCode::GetPlayers, &players).await,
        Err(e) => tracing::error!("Failed to load players for broadcast: {}", e),
    }
}

async fn broadcast_rooms(state: &AppState) {
    match state.get_rooms_usecase.execute().await {
        Ok(rooms) => state.notifier.broadcast(OpCode::GetRooms, &rooms).await,
        Err(e) => tracing::error!("Failed to load rooms for broadcast: {}", e),
    }
}

fn parse<T: DeserializeOwned>(data: Value) -> Result<T, DispatchError> {
    Ok(serde_json::from_value(data)?)
}
