//! UseCase テスト用の共通フィクスチャ

use std::sync::Arc;

use gomoku_shared::time::{Clock, FixedClock};

use crate::{
    domain::{
        Color, HallRepository, Player, PlayerId, PlayerRepository, Role, Room, RoomId,
        RoomLockRegistry, RoomRepository,
    },
    infrastructure::{
        kv::InMemoryKeyValueStore,
        repository::{KvHallRepository, KvPlayerRepository, KvRoomRepository},
    },
};

/// 2024-01-01 00:00:00 UTC
pub const FIXED_MILLIS: i64 = 1_704_067_200_000;
pub const FIXED_TIME: &str = "2024-01-01 00:00:00";

pub struct Fixture {
    pub locks: Arc<RoomLockRegistry>,
    pub rooms: Arc<dyn RoomRepository>,
    pub players: Arc<dyn PlayerRepository>,
    pub hall: Arc<dyn HallRepository>,
    pub clock: Arc<dyn Clock>,
}

impl Fixture {
    pub fn new() -> Self {
        let store = Arc::new(InMemoryKeyValueStore::new());
        Self {
            locks: Arc::new(RoomLockRegistry::new()),
            rooms: Arc::new(KvRoomRepository::new(store.clone())),
            players: Arc::new(KvPlayerRepository::new(store.clone())),
            hall: Arc::new(KvHallRepository::new(store)),
            clock: Arc::new(FixedClock::new(FIXED_MILLIS)),
        }
    }

    /// 名前付きのプレイヤーを登録する
    pub async fn player(&self, id: &str) -> Player {
        let mut player = Player::new(pid(id), FIXED_TIME.to_string());
        player.name = id.to_string();
        self.players.set_player(&player).await.unwrap();
        player
    }

    /// `host` が黒のルームを登録する
    pub async fn room(&self, host: &str) -> Room {
        let host = self.player(host).await;
        let room = Room::new(RoomId::generate(), host, Color::Black);
        self.locks.add(room.id.clone()).await.unwrap();
        self.rooms.set_room(&room).await.unwrap();
        room
    }

    /// alice (host, 黒) と bob (challenger, 白) が対局中のルームを登録する
    pub async fn started_room(&self) -> Room {
        let mut room = self.room("alice").await;
        let bob = self.player("bob").await;
        room.enter(bob, Role::Challenger).unwrap();
        room.set_ready(&pid("alice"), true).unwrap();
        room.set_ready(&pid("bob"), true).unwrap();
        self.rooms.set_room(&room).await.unwrap();
        room
    }

    pub async fn stored_room(&self, room_id: &RoomId) -> Room {
        self.rooms.get_room(room_id).await.unwrap()
    }

    pub async fn stored_player(&self, id: &str) -> Player {
        self.players.get_player(&pid(id)).await.unwrap()
    }
}

pub fn pid(id: &str) -> PlayerId {
    PlayerId::new(id.to_string()).unwrap()
}
