//! KeyValueStore を使った Repository 実装
//!
//! レコードは JSON 文字列として保存する。
//!
//! | レコード | 種類 | 名前 |
//! |---|---|---|
//! | Room | ハッシュ | `room` |
//! | Player | ハッシュ | `player` |
//! | ロビーチャット | リスト | `dialog` |

mod hall;
mod player;
mod room;

use serde::{Serialize, de::DeserializeOwned};

use crate::{domain::RepositoryError, infrastructure::kv::StoreError};

pub use hall::KvHallRepository;
pub use player::KvPlayerRepository;
pub use room::KvRoomRepository;

const ROOM_TABLE: &str = "room";
const PLAYER_TABLE: &str = "player";
const DIALOG_LIST: &str = "dialog";

impl From<StoreError> for RepositoryError {
    fn from(e: StoreError) -> Self {
        RepositoryError::Storage(e.0)
    }
}

fn encode<T: Serialize>(value: &T) -> Result<String, RepositoryError> {
    serde_json::to_string(value).map_err(|e| RepositoryError::Serialization(e.to_string()))
}

fn decode<T: DeserializeOwned>(raw: &str) -> Result<T, RepositoryError> {
    serde_json::from_str(raw).map_err(|e| RepositoryError::Serialization(e.to_string()))
}
