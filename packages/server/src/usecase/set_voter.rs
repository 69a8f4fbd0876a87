//! UseCase: 投票者フラグの切り替え
//!
//! 公開後も含め、いつでも自分自身のフラグを変更できる。

use std::sync::Arc;

use mitsumori_shared::time::Clock;

use crate::domain::{
    RoomRepository, RoomView, SessionId,
    logic::{ensure_connection, set_voter_flag},
    view::project,
};

use super::{
    error::RoomUseCaseError,
    room_access::{RoomAccess, is_admin},
};

/// 投票者フラグ切り替えのユースケース
pub struct SetVoterUseCase {
    access: RoomAccess,
}

impl SetVoterUseCase {
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
        voter: bool,
    ) -> Result<RoomView, RoomUseCaseError> {
        let room = self.access.load(room_id).await?;
        let is_admin = is_admin(&room, admin_token);
        let now = self.access.now();

        let joined = ensure_connection(&room, session_id, now);
        let next = set_voter_flag(&joined, session_id, voter, now);
        self.access.save(&next).await?;

        Ok(project(&next, session_id, is_admin))
    }
}
