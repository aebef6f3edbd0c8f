//! KeyValueStore 上のロビーチャット Repository

use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    domain::{DIALOG_CAPACITY, DialogMsg, HallRepository, RepositoryError},
    infrastructure::kv::KeyValueStore,
};

use super::{DIALOG_LIST, decode, encode};

/// ロビーチャット Repository 実装
pub struct KvHallRepository {
    store: Arc<dyn KeyValueStore>,
}

impl KvHallRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl HallRepository for KvHallRepository {
    async fn append_dialog(&self, msg: &DialogMsg) -> Result<(), RepositoryError> {
        let len = self.store.rpush(DIALOG_LIST, encode(msg)?).await?;
        if len > DIALOG_CAPACITY {
            self.store.lpop(DIALOG_LIST).await?;
        }
        Ok(())
    }

    async fn get_dialog(&self) -> Result<Vec<DialogMsg>, RepositoryError> {
        self.store
            .lrange(DIALOG_LIST)
            .await?
            .iter()
            .map(|raw| decode(raw))
            .collect()
    }
}
