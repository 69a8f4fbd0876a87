//! UseCase 共通のストアアクセス
//!
//! 全ての操作は「読み込み → 状態遷移 → 保存」の read-modify-write で、
//! リクエストをまたぐロックは取らない（同じルームへの同時更新は後勝ち）。

use std::sync::Arc;

use mitsumori_shared::time::Clock;

use crate::domain::{RoomId, RoomRepository, RoomState, Timestamp};

use super::error::RoomUseCaseError;

pub(crate) struct RoomAccess {
    repository: Arc<dyn RoomRepository>,
    clock: Arc<dyn Clock>,
}

impl RoomAccess {
    pub(crate) fn new(repository: Arc<dyn RoomRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    pub(crate) fn now(&self) -> Timestamp {
        Timestamp::new(self.clock.now_millis())
    }

    /// ルームコードを検証してルームを読み込む
    ///
    /// コードが不正ならストアには触れない。読み込みの失敗は「ルームなし」として扱う。
    pub(crate) async fn load(&self, raw_room_id: &str) -> Result<RoomState, RoomUseCaseError> {
        let room_id = RoomId::new(raw_room_id.to_string())?;
        match self.repository.get_room(&room_id).await {
            Ok(Some(room)) => Ok(room),
            Ok(None) => Err(RoomUseCaseError::RoomNotFound),
            Err(e) => {
                tracing::warn!("Failed to read room {}: {}", room_id, e);
                Err(RoomUseCaseError::RoomNotFound)
            }
        }
    }

    /// ルームが存在するか（ルーム作成時の衝突チェック用）
    ///
    /// 読み込みに失敗したコードは空きとみなさない。
    pub(crate) async fn exists(&self, room_id: &RoomId) -> Result<bool, RoomUseCaseError> {
        self.repository
            .get_room(room_id)
            .await
            .map(|room| room.is_some())
            .map_err(|e| {
                tracing::warn!(
                    "Failed to read room {} while checking for collision: {}",
                    room_id,
                    e
                );
                RoomUseCaseError::StorageUnavailable(e.to_string())
            })
    }

    pub(crate) async fn save(&self, room: &RoomState) -> Result<(), RoomUseCaseError> {
        self.repository
            .save_room(room)
            .await
            .map_err(|e| RoomUseCaseError::StorageUnavailable(e.to_string()))
    }

    pub(crate) async fn delete(&self, room_id: &RoomId) -> Result<(), RoomUseCaseError> {
        self.repository
            .delete_room(room_id)
            .await
            .map_err(|e| RoomUseCaseError::StorageUnavailable(e.to_string()))
    }
}

/// 提示された管理者トークンがルームのものと一致するか
pub fn is_admin(room: &RoomState, presented_admin_token: Option<&str>) -> bool {
    room.admin_token.matches(presented_admin_token)
}

/// 管理者でなければ `Forbidden`
pub(crate) fn require_admin(
    room: &RoomState,
    presented_admin_token: Option<&str>,
) -> Result<(), RoomUseCaseError> {
    if is_admin(room, presented_admin_token) {
        Ok(())
    } else {
        Err(RoomUseCaseError::Forbidden)
    }
}
