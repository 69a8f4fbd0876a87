//! UseCase: 票の取り消し

use std::sync::Arc;

use mitsumori_shared::time::Clock;

use crate::domain::{
    RoomRepository, RoomView, SessionId,
    logic::{clear_vote, ensure_connection},
    view::project,
};

use super::{
    error::RoomUseCaseError,
    room_access::{RoomAccess, is_admin},
};

/// 票取り消しのユースケース
pub struct ClearVoteUseCase {
    access: RoomAccess,
}

impl ClearVoteUseCase {
    pub fn new(repository: Arc<dyn RoomRepository>, clock: Arc<dyn Clock>) -> Self {
        Self {
            access: RoomAccess::new(repository, clock),
        }
    }

    /// 自分の票を取り消す（公開後は `AlreadyFinished`）
    pub async fn execute(
        &self,
        room_id: &str,
        session_id: &SessionId,
        admin_token: Option<&str>,
    ) -> Result<RoomView, RoomUseCaseError> {
        let room = self.access.load(room_id).await?;
        let is_admin = is_admin(&room, admin_token);
        let now = self.access.now();

        let joined = ensure_connection(&room, session_id, now);
        let next = clear_vote(&joined, session_id, now)?;
        self.access.save(&next).await?;

        Ok(project(&next, session_id, is_admin))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecase::{
        CastVoteUseCase, GetRoomViewUseCase,
        test_support::{TestEnv, sid},
    };

    #[tokio::test]
    async fn test_clear_vote_removes_own_vote() {
        // テスト項目: 取り消すと自分の票だけが消える
        // given (前提条件):
        let env = TestEnv::new();
        env.seed_room("48213").await;
        GetRoomViewUseCase::new(env.repository.clone(), env.clock.clone())
            .execute("48213", &sid("bob"), None)
            .await
            .unwrap();
        let vote = CastVoteUseCase::new(env.repository.clone(), env.clock.clone());
        vote.execute("48213", &sid("alice"), None, "3").await.unwrap();
        let usecase = ClearVoteUseCase::new(env.repository.clone(), env.clock.clone());

        // when (操作):
        let view = usecase.execute("48213", &sid("alice"), None).await.unwrap();

        // then (期待する結果):
        assert_eq!(view.my.vote, None);
        assert_eq!(view.voted_count, 0);
    }

    #[tokio::test]
    async fn test_clear_vote_after_reveal_fails() {
        // テスト項目: 公開後の取り消しは AlreadyFinished
        // given (前提条件):
        let env = TestEnv::new();
        env.seed_room("48213").await;
        CastVoteUseCase::new(env.repository.clone(), env.clock.clone())
            .execute("48213", &sid("alice"), None, "3")
            .await
            .unwrap();
        let usecase = ClearVoteUseCase::new(env.repository.clone(), env.clock.clone());

        // when (操作):
        let result = usecase.execute("48213", &sid("alice"), None).await;

        // then (期待する結果):
        assert_eq!(result, Err(RoomUseCaseError::AlreadyFinished));
    }
}
