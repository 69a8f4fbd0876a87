//! ドメインエンティティ
//!
//! ストアに保存される権威ある状態。JSON 表現は camelCase で、
//! 既存のストア上のデータとそのまま互換になるようにしている。

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{AdminToken, CardPack, RoomId, SessionId, Timestamp};

/// ルーム内の参加者 1 人分の状態
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomConnection {
    pub session_id: SessionId,
    /// 投票完了判定と公開対象に含めるか
    pub voter: bool,
    pub vote: Option<String>,
    /// 初回アクセス時刻（表示順を決める）
    pub joined_at: Timestamp,
    pub updated_at: Timestamp,
}

impl RoomConnection {
    /// 初回アクセス時の参加者（投票者、未投票）
    pub fn new(session_id: SessionId, now: Timestamp) -> Self {
        Self {
            session_id,
            voter: true,
            vote: None,
            joined_at: now,
            updated_at: now,
        }
    }

    /// 空文字でない票を持っているか
    pub fn has_vote(&self) -> bool {
        self.vote.as_deref().is_some_and(|v| !v.is_empty())
    }
}

/// ルームの状態（1 ルームコードにつき 1 つ）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomState {
    pub room_id: RoomId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub card_pack: CardPack,
    pub forced_reveal: bool,
    pub admin_token: AdminToken,
    /// セッション ID → 参加者。メンバーシップは追加のみ。
    #[serde(default)]
    pub connections: HashMap<SessionId, RoomConnection>,
}

impl RoomState {
    /// 参加者のいない新しいルームを作成
    pub fn new(room_id: RoomId, admin_token: AdminToken, now: Timestamp) -> Self {
        Self {
            room_id,
            created_at: now,
            updated_at: now,
            card_pack: CardPack::default(),
            forced_reveal: false,
            admin_token,
            connections: HashMap::new(),
        }
    }

    pub fn connection(&self, session_id: &SessionId) -> Option<&RoomConnection> {
        self.connections.get(session_id)
    }

    pub fn voters(&self) -> impl Iterator<Item = &RoomConnection> {
        self.connections.values().filter(|c| c.voter)
    }
}
