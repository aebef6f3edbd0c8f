//! エンティティ定義

mod dialog;
mod game_over;
mod player;
mod room;

pub use dialog::{DIALOG_CAPACITY, Dialog, DialogMsg};
pub use game_over::{Cause, GameOver};
pub use player::{Player, PlayerDetails};
pub use room::{LeaveOutcome, Retraction, Room, Seat};
