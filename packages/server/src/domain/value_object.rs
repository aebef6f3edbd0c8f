//! 値オブジェクト
//!
//! 識別子・石の色・着手・同意・プレイヤー状態・ロールを表す。
//! いずれも不正な値を生成時に弾き、以降は常に有効な状態であることを保証する。

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::ValueObjectError;

/// Side length of the square board.
pub const BOARD_SIZE: u8 = 15;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// 空文字列は拒否する
            pub fn new(value: String) -> Result<Self, ValueObjectError> {
                if value.is_empty() {
                    return Err(ValueObjectError::EmptyId);
                }
                Ok(Self(value))
            }

            /// UUID v4 で新しい識別子を発行
            pub fn generate() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn into_string(self) -> String {
                self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = ValueObjectError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(
    /// Opaque player identity issued at connect time.
    PlayerId
);

string_id!(
    /// Room identifier, generated fresh per room.
    RoomId
);

/// Stone color. Black (0) always moves first, so the color of the step at
/// index `k` is `k mod 2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Color {
    Black,
    White,
}

impl Color {
    pub fn opposite(self) -> Self {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    /// Color of the stone placed at `index` in the step sequence.
    pub fn of_step(index: usize) -> Self {
        if index % 2 == 0 {
            Color::Black
        } else {
            Color::White
        }
    }

    /// Offset of this color's first step in the sequence.
    pub fn parity(self) -> usize {
        u8::from(self) as usize
    }
}

impl TryFrom<u8> for Color {
    type Error = ValueObjectError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Color::Black),
            1 => Ok(Color::White),
            other => Err(ValueObjectError::InvalidColor(other)),
        }
    }
}

impl From<Color> for u8 {
    fn from(color: Color) -> Self {
        match color {
            Color::Black => 0,
            Color::White => 1,
        }
    }
}

/// One placed stone. The color is implied by the position in the sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Step {
    pub i: u8,
    pub j: u8,
}

impl Step {
    pub fn new(i: u8, j: u8) -> Result<Self, ValueObjectError> {
        if i >= BOARD_SIZE || j >= BOARD_SIZE {
            return Err(ValueObjectError::OutOfBoard(i, j));
        }
        Ok(Self { i, j })
    }
}

/// Phase of a retract/draw handshake.
///
/// Only [`Consent::Accept`] mutates the room; the other two are relayed to
/// the opponent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Consent {
    Request,
    Decline,
    Accept,
}

impl TryFrom<u8> for Consent {
    type Error = ValueObjectError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Consent::Request),
            1 => Ok(Consent::Decline),
            2 => Ok(Consent::Accept),
            other => Err(ValueObjectError::InvalidConsent(other)),
        }
    }
}

impl From<Consent> for u8 {
    fn from(consent: Consent) -> Self {
        match consent {
            Consent::Request => 0,
            Consent::Decline => 1,
            Consent::Accept => 2,
        }
    }
}

/// Lobby status tag of a player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PlayerStatus {
    Leisure,
    Spectating,
    Other(String),
}

impl From<String> for PlayerStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "leisure" => PlayerStatus::Leisure,
            "spectating" => PlayerStatus::Spectating,
            _ => PlayerStatus::Other(value),
        }
    }
}

impl From<PlayerStatus> for String {
    fn from(status: PlayerStatus) -> Self {
        match status {
            PlayerStatus::Leisure => "leisure".to_string(),
            PlayerStatus::Spectating => "spectating".to_string(),
            PlayerStatus::Other(value) => value,
        }
    }
}

/// Occupant role inside a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Host,
    Challenger,
    Spectator,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Host => "host",
            Role::Challenger => "challenger",
            Role::Spectator => "spectator",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
