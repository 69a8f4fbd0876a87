//! Client execution logic with connection retry.

use std::{sync::Arc, time::Duration};

use super::{api::PokerApiClient, error::ClientError, session::run_client_session};

const MAX_CONNECT_ATTEMPTS: u32 = 5;
const CONNECT_RETRY_INTERVAL_SECS: u64 = 5;

/// どのルームから始めるか
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartRoom {
    /// ルーム外で開始
    None,
    Join(String),
    Create,
}

/// サーバーのヘルスチェックが通るまで待つ
async fn wait_for_server(api: &PokerApiClient) -> Result<(), ClientError> {
    for attempt in 1..=MAX_CONNECT_ATTEMPTS {
        tracing::info!(
            "Checking server at {} (attempt {}/{})",
            api.base_url(),
            attempt,
            MAX_CONNECT_ATTEMPTS
        );
        match api.health().await {
            Ok(()) => return Ok(()),
            Err(e) => tracing::warn!("Server is not ready: {}", e),
        }
        if attempt < MAX_CONNECT_ATTEMPTS {
            tracing::info!("Retrying in {} seconds...", CONNECT_RETRY_INTERVAL_SECS);
            tokio::time::sleep(Duration::from_secs(CONNECT_RETRY_INTERVAL_SECS)).await;
        }
    }
    Err(ClientError::ServerUnreachable(api.base_url().to_string()))
}

/// Run the planning poker client
///
/// # Errors
///
/// Returns an error if the server never becomes reachable, or if the room to
/// start in cannot be created or joined.
pub async fn run_client(url: String, start: StartRoom) -> Result<(), ClientError> {
    let api = Arc::new(PokerApiClient::new(&url)?);
    wait_for_server(&api).await?;
    tracing::info!("Connected to planning poker server!");

    let initial_view = match start {
        StartRoom::None => None,
        StartRoom::Join(room_id) => Some(api.get_room(&room_id).await?),
        StartRoom::Create => {
            let room_id = api.create_room().await?;
            println!("Created room {}. Share the code with your team.", room_id);
            Some(api.get_room(&room_id).await?)
        }
    };

    run_client_session(api, initial_view).await;
    Ok(())
}
