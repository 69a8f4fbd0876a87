//! Error types for the planning poker client.

use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// サーバーがエラーレスポンスを返した
    #[error("{message} ({kind}, HTTP {status})")]
    Api {
        status: u16,
        kind: String,
        message: String,
    },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// レスポンスボディを解釈できない
    #[error("Failed to decode server response: {0}")]
    Decode(String),

    /// REPL の入力が不正
    #[error("{0}")]
    InvalidCommand(String),

    #[error("Server at {0} is not reachable")]
    ServerUnreachable(String),
}

impl ClientError {
    /// サーバーが返したエラー種別
    pub fn kind(&self) -> Option<&str> {
        match self {
            Self::Api { kind, .. } => Some(kind.as_str()),
            _ => None,
        }
    }

    /// 自動ポーリングを止めるべきか（ルームが存在しない・コードが不正）
    pub fn stops_polling(&self) -> bool {
        matches!(self.kind(), Some("room_not_found" | "invalid_room_code"))
    }
}
