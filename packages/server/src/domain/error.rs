//! ドメイン層のエラー定義

use thiserror::Error;

/// 値オブジェクト生成時のバリデーションエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    #[error("room code must be exactly 5 ASCII digits: {0:?}")]
    InvalidRoomCode(String),

    #[error("session id must not be empty")]
    EmptySessionId,
}

/// ルーム状態遷移のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoomError {
    /// 投票者に設定されていないセッションが投票しようとした
    #[error("session is not a voter")]
    NotAVoter,

    /// 既に公開済み（全員投票済み、または強制公開）
    #[error("voting has already finished")]
    AlreadyFinished,

    /// アクティブなカードパックに存在しない票
    #[error("vote {0:?} is not in the active card pack")]
    InvalidToken(String),

    #[error("unknown card pack: {0:?}")]
    InvalidCardPack(String),
}

/// Repository 層のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    /// バックエンドストアへの呼び出しが失敗した
    #[error("room store unavailable: {0}")]
    Unavailable(String),
}
