//! WebSocket message DTOs.
//!
//! Every frame is a JSON envelope `{"code": <opcode>, "data": <payload>}`.

use serde::{Deserialize, Serialize};

use crate::domain::{Consent, DialogMsg, Role, RoomId};

/// Numeric operation code carried by every envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum OpCode {
    Fail,
    Success,
    HallChat,
    GetHallDialog,
    GetRooms,
    CreateRoom,
    EnterRoom,
    LeaveRoom,
    DelRoom,
    RoomChat,
    GetPlayer,
    GetPlayers,
    PlayerRename,
    SetPlayerStatus,
    SetReady,
    MakeStep,
    RetractStep,
    Surrender,
    AskDraw,
    GameOver,
}

impl OpCode {
    const ALL: [OpCode; 20] = [
        OpCode::Fail,
        OpCode::Success,
        OpCode::HallChat,
        OpCode::GetHallDialog,
        OpCode::GetRooms,
        OpCode::CreateRoom,
        OpCode::EnterRoom,
        OpCode::LeaveRoom,
        OpCode::DelRoom,
        OpCode::RoomChat,
        OpCode::GetPlayer,
        OpCode::GetPlayers,
        OpCode::PlayerRename,
        OpCode::SetPlayerStatus,
        OpCode::SetReady,
        OpCode::MakeStep,
        OpCode::RetractStep,
        OpCode::Surrender,
        OpCode::AskDraw,
        OpCode::GameOver,
    ];
}

impl TryFrom<u8> for OpCode {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(value as usize)
            .copied()
            .ok_or_else(|| format!("unknown opcode {}", value))
    }
}

impl From<OpCode> for u8 {
    fn from(code: OpCode) -> Self {
        code as u8
    }
}

/// Outbound envelope.
#[derive(Debug, Clone, Serialize)]
pub struct Envelope<T> {
    pub code: OpCode,
    pub data: T,
}

impl<T: Serialize> Envelope<T> {
    pub fn new(code: OpCode, data: T) -> Self {
        Self { code, data }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Inbound envelope before the opcode is resolved.
///
/// The code is kept as a plain integer so unknown opcodes can be told apart
/// from malformed frames.
#[derive(Debug, Clone, Deserialize)]
pub struct RawEnvelope {
    pub code: i64,
    #[serde(default)]
    pub data: serde_json::Value,
}

impl RawEnvelope {
    /// `None` for codes outside the known range.
    pub fn opcode(&self) -> Option<OpCode> {
        u8::try_from(self.code)
            .ok()
            .and_then(|c| OpCode::try_from(c).ok())
    }
}

// ========================================
// Inbound payloads
// ========================================

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EnterRoomPayload {
    pub rid: RoomId,
    pub role: Role,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SetReadyPayload {
    pub rid: RoomId,
    pub ready: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MakeStepPayload {
    pub rid: RoomId,
    pub i: u8,
    pub j: u8,
}

/// Payload of retract-step and ask-draw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsentPayload {
    pub rid: RoomId,
    pub consent: Consent,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RoomChatPayload {
    pub rid: RoomId,
    pub content: String,
}

// ========================================
// Outbound payloads
// ========================================

/// A placed stone, sent to the room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepDto {
    pub rid: RoomId,
    pub i: u8,
    pub j: u8,
}

/// Accepted retraction, with the number of removed steps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RetractDto {
    pub rid: RoomId,
    pub consent: Consent,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoomChatDto {
    pub rid: RoomId,
    #[serde(flatten)]
    pub msg: DialogMsg,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opcode_numbering_follows_declaration_order() {
        // テスト項目: オペコードは宣言順に 0 から振られる
        // given (前提条件):

        // when (操作):
        let codes: Vec<u8> = OpCode::ALL.iter().map(|&c| c.into()).collect();

        // then (期待する結果):
        assert_eq!(codes, (0..20).collect::<Vec<u8>>());
        assert_eq!(u8::from(OpCode::MakeStep), 15);
        assert_eq!(OpCode::try_from(19), Ok(OpCode::GameOver));
        assert!(OpCode::try_from(20).is_err());
    }

    #[test]
    fn test_envelope_serialization() {
        // テスト項目: 送信エンベロープは数値コードと data を持つ
        // given (前提条件):
        let envelope = Envelope::new(OpCode::Fail, "room not found");

        // when (操作):
        let json = envelope.to_json().unwrap();

        // then (期待する結果):
        assert_eq!(json, r#"{"code":0,"data":"room not found"}"#);
    }

    #[test]
    fn test_raw_envelope_unknown_and_missing_data() {
        // テスト項目: 範囲外のコードは None、data 省略時は null
        // given (前提条件):
        let known: RawEnvelope = serde_json::from_str(r#"{"code":4}"#).unwrap();
        let unknown: RawEnvelope = serde_json::from_str(r#"{"code":99,"data":1}"#).unwrap();
        let negative: RawEnvelope = serde_json::from_str(r#"{"code":-1}"#).unwrap();

        // when (操作):

        // then (期待する結果):
        assert_eq!(known.opcode(), Some(OpCode::GetRooms));
        assert!(known.data.is_null());
        assert_eq!(unknown.opcode(), None);
        assert_eq!(negative.opcode(), None);
    }

    #[test]
    fn test_consent_payload_rejects_unknown_consent() {
        // テスト項目: 同意値 0/1/2 以外は不正なペイロード
        // given (前提条件):
        let ok = r#"{"rid":"r1","consent":2}"#;
        let bad = r#"{"rid":"r1","consent":5}"#;

        // when (操作):
        let parsed: Result<ConsentPayload, _> = serde_json::from_str(ok);
        let rejected: Result<ConsentPayload, _> = serde_json::from_str(bad);

        // then (期待する結果):
        assert_eq!(parsed.unwrap().consent, Consent::Accept);
        assert!(rejected.is_err());
    }

    #[test]
    fn test_room_chat_dto_flattens_message() {
        // テスト項目: ルームチャットはルーム ID と発言を同じ階層に並べる
        // given (前提条件):
        let dto = RoomChatDto {
            rid: RoomId::new("r1".to_string()).unwrap(),
            msg: DialogMsg::new(
                "2024-01-01 00:00:00".to_string(),
                "alice".to_string(),
                "gg".to_string(),
            ),
        };

        // when (操作):
        let json = serde_json::to_value(&dto).unwrap();

        // then (期待する結果):
        assert_eq!(
            json,
            serde_json::json!({
                "rid": "r1",
                "time": "2024-01-01 00:00:00",
                "from": "alice",
                "content": "gg"
            })
        );
    }
}
