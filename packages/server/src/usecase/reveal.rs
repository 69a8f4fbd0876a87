//! UseCase: 強制公開（管理者のみ）

use std::sync::Arc;

use mitsumori_shared::time::Clock;

use crate::domain::{
    RoomRepository, RoomView, SessionId,
    logic::{ensure_connection, reveal},
    view::project,
};

use super::{
    error::RoomUseCaseError,
    room_access::{RoomAccess, require_admin},
};

/// 強制公開のユースケース
pub struct RevealUseCase {
    access: RoomAccess,
}

impl RevealUseCase {
    pub fn new(repository: Arc<dyn RoomRepository>, clock: Arc<dyn Clock>) -> Self {
        Self {
            access: RoomAccess::new(repository, clock),
        }
    }

    /// 投票がそろっていなくても全員の票を公開する
    pub async fn execute(
        &self,
        room_id: &str,
        session_id: &SessionId,
        admin_token: Option<&str>,
    ) -> Result<RoomView, RoomUseCaseError> {
        let room = self.access.load(room_id).await?;
        require_admin(&room, admin_token)?;
        let now = self.access.now();

        let joined = ensure_connection(&room, session_id, now);
        let next = reveal(&joined, now);
        self.access.save(&next).await?;

        tracing::info!("Room {} revealed by admin", next.room_id);
        Ok(project(&next, session_id, true))
    }
}
