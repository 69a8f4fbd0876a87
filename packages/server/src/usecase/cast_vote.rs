//! UseCase: 投票
//!
//! 管理者権限は不要。投票者であること・未公開であること・
//! パックに存在する票であることを状態遷移側で検証する。

use std::sync::Arc;

use mitsumori_shared::time::Clock;

use crate::domain::{
    RoomRepository, RoomView, SessionId,
    logic::{cast_vote, ensure_connection},
    view::project,
};

use super::{
    error::RoomUseCaseError,
    room_access::{RoomAccess, is_admin},
};

/// 投票のユースケース
pub struct CastVoteUseCase {
    access: RoomAccess,
}

impl CastVoteUseCase {
    pub fn new(repository: Arc<dyn RoomRepository>, clock: Arc<dyn Clock>) -> Self {
        Self {
            access: RoomAccess::new(repository, clock),
        }
    }

    /// 投票を実行
    ///
    /// # Returns
    ///
    /// * `Ok(RoomView)` - 投票後のビュー
    /// * `Err(RoomUseCaseError::NotAVoter | AlreadyFinished | InvalidToken)` - 投票できない
    pub async fn execute(
        &self,
        room_id: &str,
        session_id: &SessionId,
        admin_token: Option<&str>,
        vote: &str,
    ) -> Result<RoomView, RoomUseCaseError> {
        let room = self.access.load(room_id).await?;
        let is_admin = is_admin(&room, admin_token);
        let now = self.access.now();

        let joined = ensure_connection(&room, session_id, now);
        let next = cast_vote(&joined, session_id, vote, now)?;
        self.access.save(&next).await?;

        tracing::debug!("Vote cast in room {}", next.room_id);
        Ok(project(&next, session_id, is_admin))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecase::{
        ChangeCardPackUseCase, GetRoomViewUseCase, SetVoterUseCase,
        test_support::{ADMIN_TOKEN, TestEnv, sid},
    };

    #[tokio::test]
    async fn test_vote_is_persisted_and_hidden_from_others() {
        // テスト項目: 投票は保存され、他のセッションからは値が見えない
        // given (前提条件):
        let env = TestEnv::new();
        let room = env.seed_room("48213").await;
        let vote = CastVoteUseCase::new(env.repository.clone(), env.clock.clone());
        let fetch = GetRoomViewUseCase::new(env.repository.clone(), env.clock.clone());
        fetch.execute("48213", &sid("bob"), None).await.unwrap();

        // when (操作):
        env.tick();
        let own = vote.execute("48213", &sid("alice"), None, "8").await.unwrap();
        let other = fetch.execute("48213", &sid("bob"), None).await.unwrap();

        // then (期待する結果):
        assert_eq!(own.my.vote.as_deref(), Some("8"));
        let alice_seen_by_bob = other
            .connections
            .iter()
            .find(|c| c.session_id == sid("alice"))
            .unwrap();
        assert!(alice_seen_by_bob.has_voted);
        assert_eq!(alice_seen_by_bob.vote, None);
        let stored = env.stored(&room.room_id).await.unwrap();
        assert_eq!(
            stored.connection(&sid("alice")).unwrap().vote.as_deref(),
            Some("8")
        );
    }

    #[tokio::test]
    async fn test_non_voter_cannot_vote_and_state_is_unchanged() {
        // テスト項目: 非投票者の投票は NotAVoter で、保存内容は変わらない
        // given (前提条件):
        let env = TestEnv::new();
        let room = env.seed_room("48213").await;
        SetVoterUseCase::new(env.repository.clone(), env.clock.clone())
            .execute("48213", &sid("alice"), None, false)
            .await
            .unwrap();
        let before = env.stored(&room.room_id).await.unwrap();
        let usecase = CastVoteUseCase::new(env.repository.clone(), env.clock.clone());

        // when (操作):
        env.tick();
        let result = usecase.execute("48213", &sid("alice"), None, "5").await;

        // then (期待する結果):
        assert_eq!(result, Err(RoomUseCaseError::NotAVoter));
        assert_eq!(env.stored(&room.room_id).await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_vote_after_everyone_voted_is_already_finished() {
        // テスト項目: 全員投票済み（公開済み）のルームへの投票は AlreadyFinished
        // given (前提条件):
        let env = TestEnv::new();
        env.seed_room("48213").await;
        let usecase = CastVoteUseCase::new(env.repository.clone(), env.clock.clone());
        usecase.execute("48213", &sid("alice"), None, "5").await.unwrap();

        // when (操作):
        let result = usecase.execute("48213", &sid("alice"), None, "8").await;

        // then (期待する結果):
        assert_eq!(result, Err(RoomUseCaseError::AlreadyFinished));
    }

    #[tokio::test]
    async fn test_sequential_pack_scenario() {
        // テスト項目: seq パックで 2 人が投票し、全員投票で両方の票が公開される
        // given (前提条件):
        let env = TestEnv::new();
        env.seed_room("48213").await;
        let fetch = GetRoomViewUseCase::new(env.repository.clone(), env.clock.clone());
        let vote = CastVoteUseCase::new(env.repository.clone(), env.clock.clone());
        ChangeCardPackUseCase::new(env.repository.clone(), env.clock.clone())
            .execute("48213", &sid("admin"), Some(ADMIN_TOKEN), "seq")
            .await
            .unwrap();
        // 管理者は投票しない
        SetVoterUseCase::new(env.repository.clone(), env.clock.clone())
            .execute("48213", &sid("admin"), Some(ADMIN_TOKEN), false)
            .await
            .unwrap();

        // when (操作): voter が "7" を投票し、新しく来たセッションから見る
        env.tick();
        let voter_view = vote.execute("48213", &sid("voter"), None, "7").await.unwrap();
        env.tick();
        let second_view = fetch.execute("48213", &sid("second"), None).await.unwrap();

        // then (期待する結果): 値は隠されている
        assert_eq!(voter_view.my.vote.as_deref(), Some("7"));
        let voter_entry = &second_view.connections[1];
        assert_eq!(voter_entry.session_id, sid("voter"));
        assert!(voter_entry.has_voted);
        assert_eq!(voter_entry.vote, None);
        assert!(!second_view.revealed);

        // when (操作): 2 人目が "?" を投票
        env.tick();
        let second_view = vote.execute("48213", &sid("second"), None, "?").await.unwrap();
        let voter_view = fetch.execute("48213", &sid("voter"), None).await.unwrap();

        // then (期待する結果): 全員投票で公開される
        for view in [&second_view, &voter_view] {
            assert!(view.revealed);
            assert_eq!(view.voter_count, 2);
            assert_eq!(view.voted_count, 2);
            let votes: Vec<Option<&str>> =
                view.connections.iter().map(|c| c.vote.as_deref()).collect();
            assert_eq!(votes, vec![None, Some("7"), Some("?")]);
        }
    }
}
