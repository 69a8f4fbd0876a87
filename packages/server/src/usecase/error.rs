//! UseCase 層のエラー定義
//!
//! 呼び出し側（HTTP UI）が区別できる種類と、人が読めるメッセージを持つ。

use thiserror::Error;

use crate::domain::{RoomError, ValueObjectError};

/// ルーム操作のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoomUseCaseError {
    /// ルームコードが 5 桁の数字でない（ストアには問い合わせない）
    #[error("Invalid room code.")]
    InvalidRoomCode,

    #[error("Room not found.")]
    RoomNotFound,

    /// 管理者トークンが一致しない
    #[error("Only the room admin can do this.")]
    Forbidden,

    #[error("You are not set as a voter.")]
    NotAVoter,

    #[error("Voting has already finished.")]
    AlreadyFinished,

    #[error("Vote {0:?} is not in this card pack.")]
    InvalidToken(String),

    #[error("Unknown card pack {0:?}.")]
    InvalidCardPack(String),

    /// リクエストボディが不正
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// ストアへの書き込みに失敗
    #[error("Room store is unavailable: {0}")]
    StorageUnavailable(String),

    /// 空いているルームコードが見つからなかった
    #[error("Failed to allocate a room code after {0} attempts.")]
    IdGenerationExhausted(usize),
}

impl RoomUseCaseError {
    /// 機械向けのエラー種別
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidRoomCode => "invalid_room_code",
            Self::RoomNotFound => "room_not_found",
            Self::Forbidden => "forbidden",
            Self::NotAVoter => "not_a_voter",
            Self::AlreadyFinished => "already_finished",
            Self::InvalidToken(_) => "invalid_token",
            Self::InvalidCardPack(_) => "invalid_card_pack",
            Self::InvalidRequest(_) => "invalid_request",
            Self::StorageUnavailable(_) => "storage_unavailable",
            Self::IdGenerationExhausted(_) => "id_generation_exhausted",
        }
    }
}

impl From<RoomError> for RoomUseCaseError {
    fn from(e: RoomError) -> Self {
        match e {
            RoomError::NotAVoter => Self::NotAVoter,
            RoomError::AlreadyFinished => Self::AlreadyFinished,
            RoomError::InvalidToken(token) => Self::InvalidToken(token),
            RoomError::InvalidCardPack(pack) => Self::InvalidCardPack(pack),
        }
    }
}

impl From<ValueObjectError> for RoomUseCaseError {
    fn from(e: ValueObjectError) -> Self {
        match e {
            ValueObjectError::InvalidRoomCode(_) => Self::InvalidRoomCode,
            ValueObjectError::EmptySessionId => Self::InvalidRequest(e.to_string()),
        }
    }
}
