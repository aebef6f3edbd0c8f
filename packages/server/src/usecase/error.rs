//! UseCase 層のエラー定義

use thiserror::Error;

use crate::domain::{LockError, RepositoryError, RuleViolation};

/// 対局ルーム操作のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    #[error("room '{0}' not found")]
    RoomNotFound(String),

    #[error("player '{0}' not found")]
    PlayerNotFound(String),

    #[error(transparent)]
    Rule(#[from] RuleViolation),

    #[error("room lock error: {0}")]
    Lock(String),

    #[error("store error: {0}")]
    Store(String),
}

impl From<RepositoryError> for MatchError {
    fn from(e: RepositoryError) -> Self {
        match e {
            RepositoryError::RoomNotFound(id) => MatchError::RoomNotFound(id),
            RepositoryError::PlayerNotFound(id) => MatchError::PlayerNotFound(id),
            other => MatchError::Store(other.to_string()),
        }
    }
}

impl From<LockError> for MatchError {
    fn from(e: LockError) -> Self {
        match e {
            // ロックが無い = ルームが削除済み
            LockError::NotRegistered(id) => MatchError::RoomNotFound(id),
            other => MatchError::Lock(other.to_string()),
        }
    }
}

/// ロビー（プレイヤー管理・ホールチャット）操作のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LobbyError {
    #[error("player '{0}' not found")]
    PlayerNotFound(String),

    #[error("store error: {0}")]
    Store(String),
}

impl From<RepositoryError> for LobbyError {
    fn from(e: RepositoryError) -> Self {
        match e {
            RepositoryError::PlayerNotFound(id) => LobbyError::PlayerNotFound(id),
            other => LobbyError::Store(other.to_string()),
        }
    }
}
