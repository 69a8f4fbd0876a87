//! UseCase: ルーム作成
//!
//! 空いている 5 桁のルームコードを探し、管理者トークンを発行してルームを保存する。
//! 作成者は最初の参加者として登録される。

use std::sync::Arc;

use mitsumori_shared::time::Clock;

use crate::domain::{
    AdminToken, AdminTokenFactory, RoomId, RoomIdGenerator, RoomRepository, RoomState, SessionId,
    logic::ensure_connection,
};

use super::{error::RoomUseCaseError, room_access::RoomAccess};

/// ルームコード生成の最大試行回数
pub const MAX_ROOM_ID_ATTEMPTS: usize = 30;

/// 作成されたルーム
#[derive(Debug, Clone)]
pub struct CreatedRoom {
    pub room_id: RoomId,
    /// 作成者にだけ渡す秘密値（再発行はしない）
    pub admin_token: AdminToken,
}

/// ルーム作成のユースケース
pub struct CreateRoomUseCase {
    access: RoomAccess,
    id_generator: Arc<dyn RoomIdGenerator>,
}

impl CreateRoomUseCase {
    /// 新しい CreateRoomUseCase を作成
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        clock: Arc<dyn Clock>,
        id_generator: Arc<dyn RoomIdGenerator>,
    ) -> Self {
        Self {
            access: RoomAccess::new(repository, clock),
            id_generator,
        }
    }

    /// ルーム作成を実行
    ///
    /// # Arguments
    ///
    /// * `creator` - 作成者のセッション ID
    ///
    /// # Returns
    ///
    /// * `Ok(CreatedRoom)` - ルームコードと管理者トークン
    /// * `Err(RoomUseCaseError::IdGenerationExhausted)` - 空きコードが見つからない
    /// * `Err(RoomUseCaseError::StorageUnavailable)` - 衝突チェックの読み込みまたは保存に失敗
    pub async fn execute(&self, creator: &SessionId) -> Result<CreatedRoom, RoomUseCaseError> {
        let room_id = self.allocate_room_id().await?;
        let admin_token = AdminTokenFactory::generate();

        let now = self.access.now();
        let room = RoomState::new(room_id.clone(), admin_token.clone(), now);
        let room = ensure_connection(&room, creator, now).into_owned();
        self.access.save(&room).await?;

        tracing::info!("Room {} created", room_id);
        Ok(CreatedRoom {
            room_id,
            admin_token,
        })
    }

    async fn allocate_room_id(&self) -> Result<RoomId, RoomUseCaseError> {
        for attempt in 1..=MAX_ROOM_ID_ATTEMPTS {
            let candidate = self.id_generator.generate();
            if !self.access.exists(&candidate).await? {
                return Ok(candidate);
            }
            tracing::debug!(
                "Room code {} is taken (attempt {}/{})",
                candidate,
                attempt,
                MAX_ROOM_ID_ATTEMPTS
            );
        }
        tracing::error!(
            "Gave up allocating a room code after {} attempts",
            MAX_ROOM_ID_ATTEMPTS
        );
        Err(RoomUseCaseError::IdGenerationExhausted(MAX_ROOM_ID_ATTEMPTS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{MockRoomRepository, RepositoryError},
        usecase::test_support::{FixedRoomIdGenerator, TestEnv, sid},
    };

    #[tokio::test]
    async fn test_create_room_registers_creator_with_goat_pack() {
        // テスト項目: 作成したルームは goat パックで、作成者が投票者として登録される
        // given (前提条件):
        let env = TestEnv::new();
        let usecase = CreateRoomUseCase::new(
            env.repository.clone(),
            env.clock.clone(),
            Arc::new(FixedRoomIdGenerator::new(&["48213"])),
        );

        // when (操作):
        let created = usecase.execute(&sid("alice")).await.unwrap();

        // then (期待する結果):
        assert_eq!(created.room_id.as_str(), "48213");
        let room = env.stored(&created.room_id).await.unwrap();
        assert_eq!(room.card_pack.id(), "goat");
        assert!(!room.forced_reveal);
        assert_eq!(room.admin_token, created.admin_token);
        let alice = room.connection(&sid("alice")).unwrap();
        assert!(alice.voter);
        assert_eq!(alice.vote, None);
    }

    #[tokio::test]
    async fn test_create_room_skips_taken_codes() {
        // テスト項目: 使用中のコードはスキップされる
        // given (前提条件):
        let env = TestEnv::new();
        env.seed_room("11111").await;
        let usecase = CreateRoomUseCase::new(
            env.repository.clone(),
            env.clock.clone(),
            Arc::new(FixedRoomIdGenerator::new(&["11111", "11111", "22222"])),
        );

        // when (操作):
        let created = usecase.execute(&sid("bob")).await.unwrap();

        // then (期待する結果):
        assert_eq!(created.room_id.as_str(), "22222");
    }

    #[tokio::test]
    async fn test_create_room_gives_up_after_max_attempts() {
        // テスト項目: 空きコードが見つからなければ IdGenerationExhausted
        // given (前提条件):
        let env = TestEnv::new();
        env.seed_room("11111").await;
        let usecase = CreateRoomUseCase::new(
            env.repository.clone(),
            env.clock.clone(),
            Arc::new(FixedRoomIdGenerator::new(&["11111"])),
        );

        // when (操作):
        let result = usecase.execute(&sid("bob")).await;

        // then (期待する結果):
        assert_eq!(
            result.map(|c| c.room_id),
            Err(RoomUseCaseError::IdGenerationExhausted(MAX_ROOM_ID_ATTEMPTS))
        );
    }

    #[tokio::test]
    async fn test_create_room_write_failure_is_storage_unavailable() {
        // テスト項目: 保存に失敗したら StorageUnavailable
        // given (前提条件):
        let mut repository = MockRoomRepository::new();
        repository.expect_get_room().returning(|_| Ok(None));
        repository
            .expect_save_room()
            .times(1)
            .returning(|_| Err(RepositoryError::Unavailable("connection refused".to_string())));
        let usecase = CreateRoomUseCase::new(
            Arc::new(repository),
            TestEnv::clock(),
            Arc::new(FixedRoomIdGenerator::new(&["33333"])),
        );

        // when (操作):
        let result = usecase.execute(&sid("alice")).await;

        // then (期待する結果):
        assert!(matches!(
            result,
            Err(RoomUseCaseError::StorageUnavailable(msg)) if msg.contains("connection refused")
        ));
    }

    #[tokio::test]
    async fn test_create_room_read_failure_does_not_claim_code() {
        // テスト項目: 衝突チェックの読み込みに失敗したらコードを確保せず、保存もしない
        // given (前提条件):
        let mut repository = MockRoomRepository::new();
        repository
            .expect_get_room()
            .times(1)
            .returning(|_| Err(RepositoryError::Unavailable("timeout".to_string())));
        repository.expect_save_room().never();
        let usecase = CreateRoomUseCase::new(
            Arc::new(repository),
            TestEnv::clock(),
            Arc::new(FixedRoomIdGenerator::new(&["11111"])),
        );

        // when (操作):
        let result = usecase.execute(&sid("alice")).await;

        // then (期待する結果):
        assert!(matches!(
            result,
            Err(RoomUseCaseError::StorageUnavailable(msg)) if msg.contains("timeout")
        ));
    }
}
