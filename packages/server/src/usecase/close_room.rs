//! UseCase: ルームの削除（管理者のみ）
//!
//! TTL を待たずにルームを閉じる。以降のアクセスは `RoomNotFound` になる。

use std::sync::Arc;

use mitsumori_shared::time::Clock;

use crate::domain::RoomRepository;

use super::{
    error::RoomUseCaseError,
    room_access::{RoomAccess, require_admin},
};

pub struct CloseRoomUseCase {
    access: RoomAccess,
}

impl CloseRoomUseCase {
    pub fn new(repository: Arc<dyn RoomRepository>, clock: Arc<dyn Clock>) -> Self {
        Self {
            access: RoomAccess::new(repository, clock),
        }
    }

    pub async fn execute(
        &self,
        room_id: &str,
        admin_token: Option<&str>,
    ) -> Result<(), RoomUseCaseError> {
        let room = self.access.load(room_id).await?;
        require_admin(&room, admin_token)?;
        self.access.delete(&room.room_id).await?;

        tracing::info!("Room {} closed by admin", room.room_id);
        Ok(())
    }
}
