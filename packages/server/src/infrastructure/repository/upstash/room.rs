//! Upstash Redis REST Room Repository 実装
//!
//! Redis コマンドを JSON 配列として REST エンドポイントに POST します。
//!
//! ```text
//! POST {url}
//! Authorization: Bearer {token}
//! ["SET", "pp:room:12345", "{...}", "EX", 7200]
//! → {"result": "OK"}
//! ```
//!
//! 保存値は RoomState の JSON 文字列です。読み込んだ値が壊れていた場合は
//! エラーにせず「ルームなし」として扱います。

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::{
    config::RoomTtl,
    domain::{RepositoryError, RoomId, RoomRepository, RoomState},
};

const KEY_PREFIX: &str = "pp:room:";

/// Redis のキー
pub fn room_key(room_id: &RoomId) -> String {
    format!("{}{}", KEY_PREFIX, room_id.as_str())
}

#[derive(Debug, Deserialize)]
struct UpstashResponse {
    #[serde(default)]
    result: Value,
    #[serde(default)]
    error: Option<String>,
}

/// Upstash Redis REST Room Repository 実装
pub struct UpstashRoomRepository {
    client: reqwest::Client,
    url: String,
    token: String,
    ttl: RoomTtl,
}

impl UpstashRoomRepository {
    pub fn new(client: reqwest::Client, url: String, token: String, ttl: RoomTtl) -> Self {
        Self {
            client,
            url: url.trim_end_matches('/').to_string(),
            token,
            ttl,
        }
    }

    /// コマンドを 1 つ実行して `result` を返す
    async fn command(&self, command: Value) -> Result<Value, RepositoryError> {
        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.token)
            .json(&command)
            .send()
            .await
            .map_err(|e| RepositoryError::Unavailable(e.to_string()))?;

        let status = response.status();
        let body: UpstashResponse = response
            .json()
            .await
            .map_err(|e| RepositoryError::Unavailable(format!("{status}: {e}")))?;

        if let Some(error) = body.error {
            return Err(RepositoryError::Unavailable(error));
        }
        if !status.is_success() {
            return Err(RepositoryError::Unavailable(status.to_string()));
        }
        Ok(body.result)
    }
}

/// GET の結果を RoomState に復元する。復元できなければ None。
fn decode_room(room_id: &RoomId, raw: Value) -> Option<RoomState> {
    let decoded = match raw {
        Value::Null => return None,
        Value::String(text) => serde_json::from_str::<RoomState>(&text),
        object @ Value::Object(_) => serde_json::from_value::<RoomState>(object),
        other => {
            tracing::warn!("Unexpected stored value type for room {}: {}", room_id, other);
            return None;
        }
    };

    match decoded {
        Ok(room) => Some(room),
        Err(e) => {
            tracing::warn!("Discarding undecodable state for room {}: {}", room_id, e);
            None
        }
    }
}

#[async_trait]
impl RoomRepository for UpstashRoomRepository {
    async fn get_room(&self, room_id: &RoomId) -> Result<Option<RoomState>, RepositoryError> {
        let raw = self.command(json!(["GET", room_key(room_id)])).await?;
        Ok(decode_room(room_id, raw))
    }

    async fn save_room(&self, room: &RoomState) -> Result<(), RepositoryError> {
        let payload = serde_json::to_string(room)
            .map_err(|e| RepositoryError::Unavailable(e.to_string()))?;
        self.command(json!([
            "SET",
            room_key(&room.room_id),
            payload,
            "EX",
            self.ttl.as_secs()
        ]))
        .await?;
        Ok(())
    }

    async fn delete_room(&self, room_id: &RoomId) -> Result<(), RepositoryError> {
        self.command(json!(["DEL", room_key(room_id)])).await?;
        Ok(())
    }
}
