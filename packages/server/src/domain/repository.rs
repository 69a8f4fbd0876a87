//! Repository trait 定義
//!
//! ドメイン層が必要とするルーム状態ストアのインターフェース。
//! 具体的な実装（インメモリ / Upstash Redis REST）は Infrastructure 層が提供する。
//!
//! ## 一貫性
//!
//! ルームコードごとの単純な last-writer-wins レジスタ。get と save の間に
//! トランザクションはなく、同じルームへの同時更新は後勝ちになる。

use async_trait::async_trait;

use super::{RepositoryError, RoomId, RoomState};

/// Room Repository trait
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// ルーム状態を取得
    ///
    /// 未作成・期限切れ・保存データが壊れている場合は `Ok(None)`。
    async fn get_room(&self, room_id: &RoomId) -> Result<Option<RoomState>, RepositoryError>;

    /// ルーム状態を保存し、TTL を現在時刻から延長する
    async fn save_room(&self, room: &RoomState) -> Result<(), RepositoryError>;

    /// ルームを即座に削除
    async fn delete_room(&self, room_id: &RoomId) -> Result<(), RepositoryError>;
}
