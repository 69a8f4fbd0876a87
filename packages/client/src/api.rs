//! HTTP API client.
//!
//! Cookie ストアを有効にした `reqwest::Client` を使うため、
//! セッション Cookie と管理者 Cookie はクライアントのプロセス内で保持される。

use std::time::Duration;

use mitsumori_server::infrastructure::dto::http::{
    CardPackRequestDto, CreateRoomResponseDto, ErrorResponseDto, RoomViewDto,
    ToggleVoterRequestDto, VoteRequestDto,
};
use serde::de::DeserializeOwned;

use crate::error::ClientError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Planning poker API client
pub struct PokerApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl PokerApiClient {
    /// # Arguments
    ///
    /// * `base_url` - サーバーのベース URL（例: "http://127.0.0.1:8080"）
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn room_url(&self, room_id: &str) -> String {
        format!("{}/api/rooms/{}", self.base_url, room_id)
    }

    fn action_url(&self, room_id: &str, action: &str) -> String {
        format!("{}/{}", self.room_url(room_id), action)
    }

    pub async fn health(&self) -> Result<(), ClientError> {
        let response = self
            .http
            .get(format!("{}/api/health", self.base_url))
            .send()
            .await?;
        expect_success(response).await?;
        Ok(())
    }

    /// ルームを作成し、ルームコードを返す（このクライアントが管理者になる）
    pub async fn create_room(&self) -> Result<String, ClientError> {
        let response = self
            .http
            .post(format!("{}/api/rooms", self.base_url))
            .send()
            .await?;
        let created: CreateRoomResponseDto = decode(expect_success(response).await?).await?;
        Ok(created.room_id)
    }

    pub async fn get_room(&self, room_id: &str) -> Result<RoomViewDto, ClientError> {
        let response = self.http.get(self.room_url(room_id)).send().await?;
        decode(expect_success(response).await?).await
    }

    pub async fn vote(&self, room_id: &str, vote: &str) -> Result<RoomViewDto, ClientError> {
        let body = VoteRequestDto {
            vote: Some(vote.to_string()),
        };
        self.post_view(&self.action_url(room_id, "vote"), Some(&body))
            .await
    }

    pub async fn unvote(&self, room_id: &str) -> Result<RoomViewDto, ClientError> {
        self.post_view::<()>(&self.action_url(room_id, "unvote"), None)
            .await
    }

    pub async fn set_voter(&self, room_id: &str, voter: bool) -> Result<RoomViewDto, ClientError> {
        let body = ToggleVoterRequestDto { voter: Some(voter) };
        self.post_view(&self.action_url(room_id, "toggle-voter"), Some(&body))
            .await
    }

    pub async fn reveal(&self, room_id: &str) -> Result<RoomViewDto, ClientError> {
        self.post_view::<()>(&self.action_url(room_id, "reveal"), None)
            .await
    }

    pub async fn reset(&self, room_id: &str) -> Result<RoomViewDto, ClientError> {
        self.post_view::<()>(&self.action_url(room_id, "reset"), None)
            .await
    }

    pub async fn change_card_pack(
        &self,
        room_id: &str,
        card_pack: &str,
    ) -> Result<RoomViewDto, ClientError> {
        let body = CardPackRequestDto {
            card_pack: Some(card_pack.to_string()),
        };
        self.post_view(&self.action_url(room_id, "card-pack"), Some(&body))
            .await
    }

    pub async fn close_room(&self, room_id: &str) -> Result<(), ClientError> {
        let response = self.http.delete(self.room_url(room_id)).send().await?;
        expect_success(response).await?;
        Ok(())
    }

    async fn post_view<B: serde::Serialize>(
        &self,
        url: &str,
        body: Option<&B>,
    ) -> Result<RoomViewDto, ClientError> {
        let mut request = self.http.post(url);
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await?;
        decode(expect_success(response).await?).await
    }
}

/// 2xx 以外はエラーボディを `ClientError::Api` に変換する
async fn expect_success(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await?;
    let (kind, message) = match serde_json::from_str::<ErrorResponseDto>(&text) {
        Ok(body) => (body.kind, body.error),
        Err(_) => ("unknown".to_string(), text),
    };
    Err(ClientError::Api {
        status: status.as_u16(),
        kind,
        message,
    })
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
    let text = response.text().await?;
    serde_json::from_str(&text).map_err(|e| ClientError::Decode(e.to_string()))
}
