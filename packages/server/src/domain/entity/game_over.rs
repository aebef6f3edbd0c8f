//! 対局終了の記録

use serde::{Deserialize, Serialize};

use crate::domain::value_object::RoomId;

use super::player::PlayerDetails;

/// Why a game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cause {
    Five,
    Surrender,
    Draw,
    Escape,
}

/// Termination record sent to the room when a game ends.
///
/// `winner` and `loser` are both `None` for a draw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOver {
    pub rid: RoomId,
    pub winner: Option<PlayerDetails>,
    pub loser: Option<PlayerDetails>,
    pub cause: Cause,
}

impl GameOver {
    pub fn decided(rid: RoomId, winner: PlayerDetails, loser: PlayerDetails, cause: Cause) -> Self {
        Self {
            rid,
            winner: Some(winner),
            loser: Some(loser),
            cause,
        }
    }

    pub fn draw(rid: RoomId) -> Self {
        Self {
            rid,
            winner: None,
            loser: None,
            cause: Cause::Draw,
        }
    }

    /// Both sides of the finished game, winner first.
    pub fn participants(&self) -> impl Iterator<Item = &PlayerDetails> {
        self.winner.iter().chain(self.loser.iter())
    }
}
