//! UseCase: ルームビュー取得（ポーリング）
//!
//! 初めてのセッションはここで参加者として登録される。
//! 既に登録済みなら保存は行わない（ポーリングのたびに書き込まない）。

use std::{borrow::Cow, sync::Arc};

use mitsumori_shared::time::Clock;

use crate::domain::{
    RoomRepository, RoomView, SessionId, logic::ensure_connection, view::project,
};

use super::{
    error::RoomUseCaseError,
    room_access::{RoomAccess, is_admin},
};

/// ルームビュー取得のユースケース
pub struct GetRoomViewUseCase {
    access: RoomAccess,
}

impl GetRoomViewUseCase {
    pub fn new(repository: Arc<dyn RoomRepository>, clock: Arc<dyn Clock>) -> Self {
        Self {
            access: RoomAccess::new(repository, clock),
        }
    }

    /// ルームビュー取得を実行
    ///
    /// # Arguments
    ///
    /// * `room_id` - リクエストされたルームコード（未検証）
    /// * `session_id` - リクエスト元のセッション ID
    /// * `admin_token` - リクエスト元が提示した管理者トークン
    pub async fn execute(
        &self,
        room_id: &str,
        session_id: &SessionId,
        admin_token: Option<&str>,
    ) -> Result<RoomView, RoomUseCaseError> {
        let room = self.access.load(room_id).await?;
        let is_admin = is_admin(&room, admin_token);

        let next = ensure_connection(&room, session_id, self.access.now());
        if let Cow::Owned(ref joined) = next {
            self.access.save(joined).await?;
            tracing::info!("Session joined room {}", joined.room_id);
        }

        Ok(project(&next, session_id, is_admin))
    }
}
