//! InMemory Room Repository 実装
//!
//! ドメイン層が定義する RoomRepository trait の具体的な実装。
//! HashMap をインメモリ DB として使用します。
//!
//! プロセス起動時に 1 度だけ作成し、`Arc` で注入して共有します。
//! グローバル変数にはしません（テストで差し替えられるように）。
//! 各エントリは保存時に失効時刻を持ち、読み込み時に期限切れなら削除されます。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use mitsumori_shared::time::Clock;
use tokio::sync::Mutex;

use crate::{
    config::RoomTtl,
    domain::{RepositoryError, RoomId, RoomRepository, RoomState},
};

#[derive(Debug, Clone)]
struct MemoryEntry {
    room: RoomState,
    /// 失効時刻（Unix epoch ミリ秒）
    expires_at: i64,
}

/// インメモリ Room Repository 実装
pub struct InMemoryRoomRepository {
    rooms: Mutex<HashMap<RoomId, MemoryEntry>>,
    ttl: RoomTtl,
    clock: Arc<dyn Clock>,
}

impl InMemoryRoomRepository {
    /// 新しい InMemoryRoomRepository を作成
    pub fn new(ttl: RoomTtl, clock: Arc<dyn Clock>) -> Self {
        Self {
            rooms: Mutex::new(HashMap::new()),
            ttl,
            clock,
        }
    }

    /// 保持しているエントリ数（期限切れで未回収のものも含む）
    pub async fn len(&self) -> usize {
        self.rooms.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl RoomRepository for InMemoryRoomRepository {
    async fn get_room(&self, room_id: &RoomId) -> Result<Option<RoomState>, RepositoryError> {
        let now = self.clock.now_millis();
        let mut rooms = self.rooms.lock().await;

        let Some(entry) = rooms.get(room_id) else {
            return Ok(None);
        };
        if entry.expires_at < now {
            tracing::debug!("Room {} expired, evicting", room_id);
            rooms.remove(room_id);
            return Ok(None);
        }
        Ok(Some(entry.room.clone()))
    }

    async fn save_room(&self, room: &RoomState) -> Result<(), RepositoryError> {
        let expires_at = self.clock.now_millis() + self.ttl.as_millis();
        let mut rooms = self.rooms.lock().await;
        rooms.insert(
            room.room_id.clone(),
            MemoryEntry {
                room: room.clone(),
                expires_at,
            },
        );
        Ok(())
    }

    async fn delete_room(&self, room_id: &RoomId) -> Result<(), RepositoryError> {
        let mut rooms = self.rooms.lock().await;
        rooms.remove(room_id);
        Ok(())
    }
}
