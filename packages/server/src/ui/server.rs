//! Server execution logic.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use super::{
    handler::{
        cast_vote, change_card_pack, clear_vote, close_room, create_room, get_room, health_check,
        reset_room, reveal, toggle_voter,
    },
    signal::shutdown_signal,
    state::AppState,
};

/// ルーティングを組み立てる（結合テストからも利用する）
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/rooms", post(create_room))
        .route("/api/rooms/{room_id}", get(get_room).delete(close_room))
        .route("/api/rooms/{room_id}/vote", post(cast_vote))
        .route("/api/rooms/{room_id}/unvote", post(clear_vote))
        .route("/api/rooms/{room_id}/toggle-voter", post(toggle_voter))
        .route("/api/rooms/{room_id}/reveal", post(reveal))
        .route("/api/rooms/{room_id}/reset", post(reset_room))
        .route("/api/rooms/{room_id}/card-pack", post(change_card_pack))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Planning poker HTTP server
///
/// # Example
///
/// ```ignore
/// let state = AppState::new(repository, clock, id_generator, cookies);
/// Server::new(state).run("127.0.0.1".to_string(), 8080).await?;
/// ```
pub struct Server {
    state: Arc<AppState>,
}

impl Server {
    pub fn new(state: AppState) -> Self {
        Self {
            state: Arc::new(state),
        }
    }

    /// Run the server until Ctrl+C or SIGTERM
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let app = router(self.state);

        let bind_addr = format!("{}:{}", host, port);
        let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

        tracing::info!(
            "Planning poker server listening on {}",
            listener.local_addr()?
        );
        tracing::info!("Create a room: POST http://{}/api/rooms", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
