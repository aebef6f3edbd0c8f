//! ドメイン層
//!
//! 値オブジェクト・エンティティ・勝敗判定・ルームロック、および
//! Infrastructure 層が実装するインターフェース（Repository, MessagePusher）を定義する。

pub mod entity;
pub mod error;
pub mod five;
pub mod message_pusher;
pub mod repository;
pub mod room_lock;
pub mod value_object;

pub use entity::{
    Cause, DIALOG_CAPACITY, Dialog, DialogMsg, GameOver, LeaveOutcome, Player, PlayerDetails,
    Retraction, Room, Seat,
};
pub use error::{LockError, MessagePushError, RepositoryError, RuleViolation, ValueObjectError};
pub use five::check_five;
pub use message_pusher::{MessagePusher, PusherChannel};
pub use repository::{HallRepository, PlayerChange, PlayerRepository, RoomRepository};
pub use room_lock::{AllRoomsGuard, RoomGuard, RoomLockRegistry};
pub use value_object::{BOARD_SIZE, Color, Consent, PlayerId, PlayerStatus, Role, RoomId, Step};
