//! HTTP API DTOs
//!
//! JSON のキーは camelCase。クライアントもこの型でデシリアライズする。

use serde::{Deserialize, Serialize};

/// `POST /api/rooms` のレスポンス
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoomResponseDto {
    pub room_id: String,
}

/// `POST /api/rooms/{room_id}/vote` のリクエスト
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteRequestDto {
    #[serde(default)]
    pub vote: Option<String>,
}

/// `POST /api/rooms/{room_id}/toggle-voter` のリクエスト
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleVoterRequestDto {
    #[serde(default)]
    pub voter: Option<bool>,
}

/// `POST /api/rooms/{room_id}/card-pack` のリクエスト
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardPackRequestDto {
    #[serde(default)]
    pub card_pack: Option<String>,
}

/// 参加者一覧の 1 エントリ
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomViewConnectionDto {
    pub session_id: String,
    pub voter: bool,
    pub has_voted: bool,
    pub vote: Option<String>,
    pub is_self: bool,
}

/// リクエスト元自身のエントリ
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MyConnectionDto {
    pub session_id: String,
    pub voter: bool,
    pub vote: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteStatsDto {
    pub average: Option<f64>,
    pub standard_deviation: Option<f64>,
}

/// ルームビュー（`GET /api/rooms/{room_id}` など）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomViewDto {
    pub room_id: String,
    pub card_pack: String,
    pub cards: Vec<String>,
    pub forced_reveal: bool,
    pub revealed: bool,
    pub is_admin: bool,
    pub connections: Vec<RoomViewConnectionDto>,
    pub voter_count: usize,
    pub voted_count: usize,
    pub my: MyConnectionDto,
    pub stats: Option<VoteStatsDto>,
}

/// エラーレスポンス
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponseDto {
    pub error: String,
    pub kind: String,
}
