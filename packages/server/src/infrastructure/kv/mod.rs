//! キーバリューストア
//!
//! ルーム・プレイヤーのレコードはハッシュ（テーブル名 + キー）、
//! ロビーチャットはリストとして保存する。キーをまたいだトランザクションはない。

mod inmemory;

use async_trait::async_trait;
use thiserror::Error;

pub use inmemory::InMemoryKeyValueStore;

/// ストア操作のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("key/value store error: {0}")]
pub struct StoreError(pub String);

/// 外部キーバリューストアのインターフェース
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// ハッシュ `table` の `key` を取得
    async fn hget(&self, table: &str, key: &str) -> Result<Option<String>, StoreError>;

    /// ハッシュ `table` の `key` に書き込む（上書き）
    async fn hset(&self, table: &str, key: &str, value: String) -> Result<(), StoreError>;

    /// ハッシュ `table` から `key` を削除。存在しなくてもエラーにしない
    async fn hdel(&self, table: &str, key: &str) -> Result<(), StoreError>;

    /// ハッシュ `table` の全値
    async fn hvals(&self, table: &str) -> Result<Vec<String>, StoreError>;

    /// リスト末尾に追加し、追加後の長さを返す
    async fn rpush(&self, list: &str, value: String) -> Result<usize, StoreError>;

    /// リスト先頭を取り出す
    async fn lpop(&self, list: &str) -> Result<Option<String>, StoreError>;

    /// リストの全要素（先頭から）
    async fn lrange(&self, list: &str) -> Result<Vec<String>, StoreError>;
}
