//! UseCase テスト用の共通ヘルパー

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use mitsumori_shared::time::{Clock, ManualClock};

use crate::{
    config::RoomTtl,
    domain::{
        AdminToken, RoomId, RoomIdGenerator, RoomRepository, RoomState, SessionId, Timestamp,
    },
    infrastructure::repository::InMemoryRoomRepository,
};

pub const ADMIN_TOKEN: &str = "admin-secret";
const START_MILLIS: i64 = 1_700_000_000_000;

pub fn sid(s: &str) -> SessionId {
    SessionId::new(s.to_string()).unwrap()
}

/// 決められた順にルームコードを返す生成器（最後のコードを繰り返す）
pub struct FixedRoomIdGenerator {
    ids: Vec<RoomId>,
    next: AtomicUsize,
}

impl FixedRoomIdGenerator {
    pub fn new(ids: &[&str]) -> Self {
        Self {
            ids: ids
                .iter()
                .map(|id| RoomId::new(id.to_string()).unwrap())
                .collect(),
            next: AtomicUsize::new(0),
        }
    }
}

impl RoomIdGenerator for FixedRoomIdGenerator {
    fn generate(&self) -> RoomId {
        let i = self.next.fetch_add(1, Ordering::SeqCst);
        self.ids[i.min(self.ids.len() - 1)].clone()
    }
}

/// インメモリストアと手動時計の組
pub struct TestEnv {
    pub repository: Arc<InMemoryRoomRepository>,
    pub clock: Arc<ManualClock>,
}

impl TestEnv {
    pub fn new() -> Self {
        let clock = Self::clock();
        let repository = Arc::new(InMemoryRoomRepository::new(
            RoomTtl::default(),
            clock.clone(),
        ));
        Self { repository, clock }
    }

    pub fn clock() -> Arc<ManualClock> {
        Arc::new(ManualClock::new(START_MILLIS))
    }

    /// 参加者なし・管理者トークン `ADMIN_TOKEN` のルームを保存する
    pub async fn seed_room(&self, code: &str) -> RoomState {
        let room = RoomState::new(
            RoomId::new(code.to_string()).unwrap(),
            AdminToken::new(ADMIN_TOKEN.to_string()),
            Timestamp::new(self.clock.now_millis()),
        );
        self.repository.save_room(&room).await.unwrap();
        room
    }

    pub async fn stored(&self, room_id: &RoomId) -> Option<RoomState> {
        self.repository.get_room(room_id).await.unwrap()
    }

    /// 参加順が区別できるよう時計を 1 秒進める
    pub fn tick(&self) {
        self.clock.advance(1_000);
    }
}
