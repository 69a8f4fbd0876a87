//! UseCase: カードパックの切り替え（管理者のみ）
//!
//! ルームコードとパック ID はストアを読む前に検証する。

use std::sync::Arc;

use mitsumori_shared::time::Clock;

use crate::domain::{
    CardPack, RoomId, RoomRepository, RoomView, SessionId,
    logic::{change_card_pack, ensure_connection},
    view::project,
};

use super::{
    error::RoomUseCaseError,
    room_access::{RoomAccess, require_admin},
};

/// カードパック切り替えのユースケース
pub struct ChangeCardPackUseCase {
    access: RoomAccess,
}

impl ChangeCardPackUseCase {
    pub fn new(repository: Arc<dyn RoomRepository>, clock: Arc<dyn Clock>) -> Self {
        Self {
            access: RoomAccess::new(repository, clock),
        }
    }

    /// パックを切り替え、全員の票と強制公開を解除する
    ///
    /// # Returns
    ///
    /// * `Err(RoomUseCaseError::InvalidCardPack)` - 未知のパック ID（ストアには触れない）
    /// * `Err(RoomUseCaseError::Forbidden)` - 管理者でない
    pub async fn execute(
        &self,
        room_id: &str,
        session_id: &SessionId,
        admin_token: Option<&str>,
        pack_id: &str,
    ) -> Result<RoomView, RoomUseCaseError> {
        RoomId::new(room_id.to_string())?;
        pack_id.parse::<CardPack>()?;

        let room = self.access.load(room_id).await?;
        require_admin(&room, admin_token)?;
        let now = self.access.now();

        let joined = ensure_connection(&room, session_id, now);
        let next = change_card_pack(&joined, pack_id, now)?;
        self.access.save(&next).await?;

        tracing::info!("Room {} switched to card pack {}", next.room_id, next.card_pack);
        Ok(project(&next, session_id, true))
    }
}
