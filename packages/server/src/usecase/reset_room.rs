//! UseCase: 新しいラウンドの開始（管理者のみ）

use std::sync::Arc;

use mitsumori_shared::time::Clock;

use crate::domain::{
    RoomRepository, RoomView, SessionId,
    logic::{ensure_connection, reset},
    view::project,
};

use super::{
    error::RoomUseCaseError,
    room_access::{RoomAccess, require_admin},
};

/// ラウンドリセットのユースケース
pub struct ResetRoomUseCase {
    access: RoomAccess,
}

impl ResetRoomUseCase {
    pub fn new(repository: Arc<dyn RoomRepository>, clock: Arc<dyn Clock>) -> Self {
        Self {
            access: RoomAccess::new(repository, clock),
        }
    }

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
        let next = reset(&joined, now);
        self.access.save(&next).await?;

        tracing::info!("Room {} reset by admin", next.room_id);
        Ok(project(&next, session_id, true))
    }
}
