//! ルームごとのロックレジストリ
//!
//! ルームの正本は外部ストアにあるため、ロックはルームオブジェクトではなく
//! ルーム ID をキーとした表で管理する。
//!
//! - `lock`: 1 ルームのロックを取得する。異なるルームの操作は並行に進む。
//! - `lock_all`: 登録済みの全ルームのロックを ID の昇順で取得する。
//!   単一ルームのロックを保持したまま別のロックを取る操作は存在しないため、
//!   昇順での取得とあわせてデッドロックは起きない。
//!
//! `lock_all` はルーム数に比例して待ちが発生し、1 つでも詰まったルームがあると
//! 一覧取得全体が止まる（liveness のリスク）。

use std::{collections::BTreeMap, sync::Arc};

use tokio::sync::{Mutex, OwnedMutexGuard};

use super::{error::LockError, value_object::RoomId};

/// Exclusive hold on one room. Dropping it releases the room.
#[derive(Debug)]
pub struct RoomGuard {
    room_id: RoomId,
    _guard: OwnedMutexGuard<()>,
}

impl RoomGuard {
    pub fn room_id(&self) -> &RoomId {
        &self.room_id
    }

    /// Release the room explicitly.
    pub fn unlock(self) {
        tracing::trace!("Room '{}' unlocked", self.room_id);
    }
}

/// Hold on every room registered when [`RoomLockRegistry::lock_all`] was called.
#[derive(Debug)]
pub struct AllRoomsGuard {
    guards: Vec<OwnedMutexGuard<()>>,
}

impl AllRoomsGuard {
    pub fn len(&self) -> usize {
        self.guards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.guards.is_empty()
    }
}

/// ルーム ID → ミューテックスの表
#[derive(Debug, Default)]
pub struct RoomLockRegistry {
    locks: Mutex<BTreeMap<RoomId, Arc<Mutex<()>>>>,
}

impl RoomLockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 新しいルームのロックを登録する。既に登録済みならエラー。
    pub async fn add(&self, room_id: RoomId) -> Result<(), LockError> {
        let mut locks = self.locks.lock().await;
        if locks.contains_key(&room_id) {
            return Err(LockError::AlreadyRegistered(room_id.into_string()));
        }
        tracing::debug!("Lock registered for room '{}'", room_id);
        locks.insert(room_id, Arc::new(Mutex::new(())));
        Ok(())
    }

    /// ルームのロックを取得する。取得できるまで待つ。
    ///
    /// The registry map itself is only held while looking up the handle, so
    /// waiting on a busy room never blocks `add`/`delete`/`exists`.
    pub async fn lock(&self, room_id: &RoomId) -> Result<RoomGuard, LockError> {
        let handle = {
            let locks = self.locks.lock().await;
            locks
                .get(room_id)
                .cloned()
                .ok_or_else(|| LockError::NotRegistered(room_id.to_string()))?
        };
        let guard = handle.lock_owned().await;
        tracing::trace!("Room '{}' locked", room_id);
        Ok(RoomGuard {
            room_id: room_id.clone(),
            _guard: guard,
        })
    }

    /// 登録済みの全ルームのロックを ID の昇順で取得する
    pub async fn lock_all(&self) -> AllRoomsGuard {
        let handles: Vec<Arc<Mutex<()>>> = {
            let locks = self.locks.lock().await;
            locks.values().cloned().collect()
        };
        let mut guards = Vec::with_capacity(handles.len());
        for handle in handles {
            guards.push(handle.lock_owned().await);
        }
        AllRoomsGuard { guards }
    }

    /// ルームのロックを登録解除する
    ///
    /// Call only after the room record has been deleted and the caller's
    /// [`RoomGuard`] for it has been released.
    pub async fn delete(&self, room_id: &RoomId) {
        let mut locks = self.locks.lock().await;
        if locks.remove(room_id).is_some() {
            tracing::debug!("Lock removed for room '{}'", room_id);
        }
    }

    /// ルームのロックが登録されているか
    pub async fn exists(&self, room_id: &RoomId) -> bool {
        self.locks.lock().await.contains_key(room_id)
    }

    /// 登録済みのルーム数
    pub async fn len(&self) -> usize {
        self.locks.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.locks.lock().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::time::timeout;

    fn rid(id: &str) -> RoomId {
        RoomId::new(id.to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_add_twice_is_rejected() {
        // テスト項目: 同じルーム ID を 2 回登録するとエラー
        // given (前提条件):
        let registry = RoomLockRegistry::new();
        registry.add(rid("r1")).await.unwrap();

        // when (操作):
        let result = registry.add(rid("r1")).await;

        // then (期待する結果):
        assert_eq!(result, Err(LockError::AlreadyRegistered("r1".to_string())));
        assert_eq!(registry.len().await, 1);
    }

    #[tokio::test]
    async fn test_lock_unknown_room_fails() {
        // テスト項目: 未登録のルームはロックできない
        // given (前提条件):
        let registry = RoomLockRegistry::new();

        // when (操作):
        let result = registry.lock(&rid("missing")).await;

        // then (期待する結果):
        assert!(matches!(result, Err(LockError::NotRegistered(id)) if id == "missing"));
    }

    #[tokio::test]
    async fn test_lock_is_exclusive_until_released() {
        // テスト項目: 同じルームのロックは解放されるまで取得できない
        // given (前提条件):
        let registry = Arc::new(RoomLockRegistry::new());
        registry.add(rid("r1")).await.unwrap();
        let guard = registry.lock(&rid("r1")).await.unwrap();

        // when (操作):
        let blocked = timeout(Duration::from_millis(50), registry.lock(&rid("r1"))).await;

        // then (期待する結果):
        assert!(blocked.is_err(), "second lock must wait");
        guard.unlock();
        let acquired = timeout(Duration::from_millis(50), registry.lock(&rid("r1"))).await;
        assert!(acquired.is_ok());
    }

    #[tokio::test]
    async fn test_different_rooms_lock_independently() {
        // テスト項目: 異なるルームのロックは互いに干渉しない
        // given (前提条件):
        let registry = RoomLockRegistry::new();
        registry.add(rid("r1")).await.unwrap();
        registry.add(rid("r2")).await.unwrap();
        let _r1 = registry.lock(&rid("r1")).await.unwrap();

        // when (操作):
        let r2 = timeout(Duration::from_millis(50), registry.lock(&rid("r2"))).await;

        // then (期待する結果):
        assert!(r2.is_ok());
        // 登録 API もロック待ちにブロックされない
        assert!(registry.exists(&rid("r1")).await);
    }

    #[tokio::test]
    async fn test_lock_all_waits_for_held_room() {
        // テスト項目: lock_all は保持中のルームが解放されるまで待ち、全ルームを保持する
        // given (前提条件):
        let registry = Arc::new(RoomLockRegistry::new());
        for id in ["b", "a", "c"] {
            registry.add(rid(id)).await.unwrap();
        }
        let held = registry.lock(&rid("b")).await.unwrap();

        // when (操作):
        let waiting = {
            let registry = registry.clone();
            tokio::spawn(async move { registry.lock_all().await.len() })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!waiting.is_finished());
        drop(held);

        // then (期待する結果):
        let count = timeout(Duration::from_secs(1), waiting)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(count, 3);
    }

    #[tokio::test]
    async fn test_delete_removes_entry() {
        // テスト項目: 削除後は exists が false になり、ロックできない
        // given (前提条件):
        let registry = RoomLockRegistry::new();
        registry.add(rid("r1")).await.unwrap();

        // when (操作):
        registry.delete(&rid("r1")).await;

        // then (期待する結果):
        assert!(!registry.exists(&rid("r1")).await);
        assert!(registry.lock(&rid("r1")).await.is_err());
        assert!(registry.lock_all().await.is_empty());
    }
}
