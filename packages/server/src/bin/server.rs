//! Planning poker room server.
//!
//! Rooms live in Upstash Redis when `UPSTASH_REDIS_REST_URL` and
//! `UPSTASH_REDIS_REST_TOKEN` are set, otherwise in process memory.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin mitsumori-server
//! cargo run --bin mitsumori-server -- --host 0.0.0.0 --port 3000 --room-ttl-seconds 3600
//! ```

use std::sync::Arc;

use clap::Parser;
use mitsumori_server::{
    config::{ServerArgs, ServerConfig, StoreBackend},
    domain::{RandomRoomIdGenerator, RoomRepository},
    infrastructure::repository::{InMemoryRoomRepository, UpstashRoomRepository},
    ui::{AppState, Server},
};
use mitsumori_shared::{
    logger::setup_logger,
    time::{Clock, SystemClock},
};

#[tokio::main]
async fn main() {
    setup_logger(env!("CARGO_PKG_NAME"), env!("CARGO_BIN_NAME"), "info");

    let config = ServerConfig::from_args(ServerArgs::parse());
    tracing::info!("Room TTL: {} seconds", config.room_ttl.as_secs());

    // Initialize dependencies in order:
    // 1. Clock
    // 2. Repository
    // 3. UseCases (AppState)
    // 4. Server
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    let repository: Arc<dyn RoomRepository> = match config.store {
        StoreBackend::Upstash { url, token } => {
            tracing::info!("Using Upstash Redis room store at {}", url);
            Arc::new(UpstashRoomRepository::new(
                reqwest::Client::new(),
                url,
                token,
                config.room_ttl,
            ))
        }
        StoreBackend::InMemory => {
            tracing::warn!("Upstash is not configured; rooms are kept in process memory");
            Arc::new(InMemoryRoomRepository::new(config.room_ttl, clock.clone()))
        }
    };

    let state = AppState::new(
        repository,
        clock,
        Arc::new(RandomRoomIdGenerator),
        config.cookies,
    );

    let server = Server::new(state);
    if let Err(e) = server.run(config.host, config.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
