//! UI 層（メッセージのディスパッチ）のエラー定義

use thiserror::Error;

use crate::{
    domain::ValueObjectError,
    usecase::{LobbyError, MatchError},
};

/// 受信メッセージ処理のエラー。どれも送信元に `fail` として返す。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    #[error("malformed message: {0}")]
    Malformed(String),

    #[error(transparent)]
    Match(#[from] MatchError),

    #[error(transparent)]
    Lobby(#[from] LobbyError),
}

impl From<ValueObjectError> for DispatchError {
    fn from(e: ValueObjectError) -> Self {
        DispatchError::Malformed(e.to_string())
    }
}

impl From<serde_json::Error> for DispatchError {
    fn from(e: serde_json::Error) -> Self {
        DispatchError::Malformed(e.to_string())
    }
}
