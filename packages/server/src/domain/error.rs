//! ドメイン層のエラー定義

use thiserror::Error;

use super::value_object::{Role, RoomId};

/// 値オブジェクト生成時のエラー（不正な入力）
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    #[error("identifier must not be empty")]
    EmptyId,

    #[error("color must be 0 or 1, got {0}")]
    InvalidColor(u8),

    #[error("consent must be 0 (request), 1 (decline) or 2 (accept), got {0}")]
    InvalidConsent(u8),

    #[error("coordinate ({0}, {1}) is outside the 15x15 board")]
    OutOfBoard(u8, u8),
}

/// ルームの状態遷移の前提条件違反
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleViolation {
    #[error("room '{0}' is not started")]
    NotStarted(RoomId),

    #[error("room '{0}' has no step")]
    NoSteps(RoomId),

    #[error("player '{player}' is not playing in room '{room}'")]
    NotPlaying { player: String, room: RoomId },

    #[error("player '{player}' is already in room '{room}'")]
    AlreadyInRoom { player: String, room: RoomId },

    #[error("room '{0}' already has a challenger")]
    SeatTaken(RoomId),

    #[error("room '{0}' has no opponent")]
    NoOpponent(RoomId),

    #[error("the role '{0}' can't enter a room")]
    CannotEnterAs(Role),

    #[error("it is not the turn of player '{0}'")]
    NotYourTurn(String),

    #[error("cell ({0}, {1}) is already occupied")]
    Occupied(u8, u8),

    #[error("there is no step of the requesting side to retract")]
    NothingToRetract,
}

/// Repository のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("room with id '{0}' not found")]
    RoomNotFound(String),

    #[error("player with id '{0}' not found")]
    PlayerNotFound(String),

    #[error("failed to (de)serialize record: {0}")]
    Serialization(String),

    #[error("storage error: {0}")]
    Storage(String),
}

/// ルームロックのエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LockError {
    #[error("no lock registered for room '{0}'")]
    NotRegistered(String),

    #[error("lock for room '{0}' is already registered")]
    AlreadyRegistered(String),
}

/// メッセージ送信のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    #[error("client '{0}' has no live session")]
    ClientNotFound(String),

    #[error("failed to push message: {0}")]
    PushFailed(String),
}
