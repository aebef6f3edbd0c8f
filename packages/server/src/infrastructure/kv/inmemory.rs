//! InMemory キーバリューストア実装
//!
//! プロセス内のマップで外部ストアを代替する。永続性はない。

use std::collections::{BTreeMap, HashMap, VecDeque};

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{KeyValueStore, StoreError};

#[derive(Debug, Default)]
struct Tables {
    hashes: HashMap<String, BTreeMap<String, String>>,
    lists: HashMap<String, VecDeque<String>>,
}

/// インメモリ KeyValueStore 実装
#[derive(Debug, Default)]
pub struct InMemoryKeyValueStore {
    tables: Mutex<Tables>,
}

impl InMemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for InMemoryKeyValueStore {
    async fn hget(&self, table: &str, key: &str) -> Result<Option<String>, StoreError> {
        let tables = self.tables.lock().await;
        Ok(tables.hashes.get(table).and_then(|h| h.get(key)).cloned())
    }

    async fn hset(&self, table: &str, key: &str, value: String) -> Result<(), StoreError> {
        let mut tables = self.tables.lock().await;
        tables
            .hashes
            .entry(table.to_string())
            .or_default()
            .insert(key.to_string(), value);
        Ok(())
    }

    async fn hdel(&self, table: &str, key: &str) -> Result<(), StoreError> {
        let mut tables = self.tables.lock().await;
        if let Some(hash) = tables.hashes.get_mut(table) {
            hash.remove(key);
        }
        Ok(())
    }

    async fn hvals(&self, table: &str) -> Result<Vec<String>, StoreError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .hashes
            .get(table)
            .map(|h| h.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn rpush(&self, list: &str, value: String) -> Result<usize, StoreError> {
        let mut tables = self.tables.lock().await;
        let list = tables.lists.entry(list.to_string()).or_default();
        list.push_back(value);
        Ok(list.len())
    }

    async fn lpop(&self, list: &str) -> Result<Option<String>, StoreError> {
        let mut tables = self.tables.lock().await;
        Ok(tables.lists.get_mut(list).and_then(VecDeque::pop_front))
    }

    async fn lrange(&self, list: &str) -> Result<Vec<String>, StoreError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .lists
            .get(list)
            .map(|l| l.iter().cloned().collect())
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_hash_set_get_delete() {
        // テスト項目: ハッシュの書き込み・読み出し・削除
        // given (前提条件):
        let store = InMemoryKeyValueStore::new();
        store.hset("room", "r1", "{}".to_string()).await.unwrap();

        // when (操作):
        let found = store.hget("room", "r1").await.unwrap();
        store.hdel("room", "r1").await.unwrap();
        let deleted = store.hget("room", "r1").await.unwrap();

        // then (期待する結果):
        assert_eq!(found, Some("{}".to_string()));
        assert_eq!(deleted, None);
        assert!(store.hvals("room").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_tables_are_independent() {
        // テスト項目: 同じキーでもテーブルが違えば別レコード
        // given (前提条件):
        let store = InMemoryKeyValueStore::new();

        // when (操作):
        store.hset("room", "x", "room".to_string()).await.unwrap();
        store.hset("player", "x", "player".to_string()).await.unwrap();

        // then (期待する結果):
        assert_eq!(store.hvals("room").await.unwrap(), vec!["room".to_string()]);
        assert_eq!(
            store.hget("player", "x").await.unwrap(),
            Some("player".to_string())
        );
    }

    #[tokio::test]
    async fn test_list_push_pop_range() {
        // テスト項目: リストは末尾に追加・先頭から取り出し
        // given (前提条件):
        let store = InMemoryKeyValueStore::new();

        // when (操作):
        let len_a = store.rpush("dialog", "a".to_string()).await.unwrap();
        let len_b = store.rpush("dialog", "b".to_string()).await.unwrap();
        let popped = store.lpop("dialog").await.unwrap();

        // then (期待する結果):
        assert_eq!((len_a, len_b), (1, 2));
        assert_eq!(popped, Some("a".to_string()));
        assert_eq!(store.lrange("dialog").await.unwrap(), vec!["b".to_string()]);
        assert_eq!(store.lpop("missing").await.unwrap(), None);
    }
}
