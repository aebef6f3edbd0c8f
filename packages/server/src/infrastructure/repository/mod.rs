//! Repository 実装
//!
//! - `kv`: KeyValueStore 上に JSON でレコードを保存する実装

pub mod kv;

pub use kv::{KvHallRepository, KvPlayerRepository, KvRoomRepository};
