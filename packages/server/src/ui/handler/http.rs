//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
    http::{HeaderName, StatusCode, header},
    response::IntoResponse,
};
use axum_extra::extract::cookie::CookieJar;
use serde::de::DeserializeOwned;

use crate::{
    domain::{RoomId, RoomView},
    infrastructure::dto::http::{
        CardPackRequestDto, CreateRoomResponseDto, RoomViewDto, ToggleVoterRequestDto,
        VoteRequestDto,
    },
    ui::state::AppState,
    usecase::RoomUseCaseError,
};

use super::session::{grant_admin, presented_admin_token, resolve_session};

type ViewResponse = (CookieJar, [(HeaderName, &'static str); 1], Json<RoomViewDto>);

fn view_response(jar: CookieJar, view: RoomView) -> ViewResponse {
    (
        jar,
        [(header::CACHE_CONTROL, "no-store")],
        Json(RoomViewDto::from(view)),
    )
}

/// 空のボディはデフォルト値として扱う
fn parse_body<T: DeserializeOwned + Default>(body: &Bytes) -> Result<T, RoomUseCaseError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(body)
        .map_err(|e| RoomUseCaseError::InvalidRequest(format!("malformed JSON body: {}", e)))
}

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// `POST /api/rooms`
pub async fn create_room(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> Result<impl IntoResponse, RoomUseCaseError> {
    let (jar, session_id) = resolve_session(jar, state.cookies);
    let created = state.create_room_usecase.execute(&session_id).await?;
    let jar = grant_admin(jar, &created.room_id, &created.admin_token, state.cookies);

    Ok((
        StatusCode::CREATED,
        jar,
        [(header::CACHE_CONTROL, "no-store")],
        Json(CreateRoomResponseDto {
            room_id: created.room_id.into_string(),
        }),
    ))
}

/// `GET /api/rooms/{room_id}`
pub async fn get_room(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
    jar: CookieJar,
) -> Result<ViewResponse, RoomUseCaseError> {
    let (jar, session_id) = resolve_session(jar, state.cookies);
    let admin_token = presented_admin_token(&jar, &room_id);
    let view = state
        .get_room_view_usecase
        .execute(&room_id, &session_id, admin_token.as_deref())
        .await?;
    Ok(view_response(jar, view))
}

/// `POST /api/rooms/{room_id}/vote`
pub async fn cast_vote(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
    jar: CookieJar,
    body: Bytes,
) -> Result<ViewResponse, RoomUseCaseError> {
    RoomId::new(room_id.clone())?;
    let request: VoteRequestDto = parse_body(&body)?;
    let vote = request
        .vote
        .filter(|vote| !vote.is_empty())
        .ok_or_else(|| RoomUseCaseError::InvalidRequest("vote is required".to_string()))?;

    let (jar, session_id) = resolve_session(jar, state.cookies);
    let admin_token = presented_admin_token(&jar, &room_id);
    let view = state
        .cast_vote_usecase
        .execute(&room_id, &session_id, admin_token.as_deref(), &vote)
        .await?;
    Ok(view_response(jar, view))
}

/// `POST /api/rooms/{room_id}/unvote`
pub async fn clear_vote(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
    jar: CookieJar,
) -> Result<ViewResponse, RoomUseCaseError> {
    let (jar, session_id) = resolve_session(jar, state.cookies);
    let admin_token = presented_admin_token(&jar, &room_id);
    let view = state
        .clear_vote_usecase
        .execute(&room_id, &session_id, admin_token.as_deref())
        .await?;
    Ok(view_response(jar, view))
}

/// `POST /api/rooms/{room_id}/toggle-voter`
pub async fn toggle_voter(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
    jar: CookieJar,
    body: Bytes,
) -> Result<ViewResponse, RoomUseCaseError> {
    RoomId::new(room_id.clone())?;
    let request: ToggleVoterRequestDto = parse_body(&body)?;
    let voter = request
        .voter
        .ok_or_else(|| RoomUseCaseError::InvalidRequest("voter is required".to_string()))?;

    let (jar, session_id) = resolve_session(jar, state.cookies);
    let admin_token = presented_admin_token(&jar, &room_id);
    let view = state
        .set_voter_usecase
        .execute(&room_id, &session_id, admin_token.as_deref(), voter)
        .await?;
    Ok(view_response(jar, view))
}

/// `POST /api/rooms/{room_id}/reveal`
pub async fn reveal(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
    jar: CookieJar,
) -> Result<ViewResponse, RoomUseCaseError> {
    let (jar, session_id) = resolve_session(jar, state.cookies);
    let admin_token = presented_admin_token(&jar, &room_id);
    let view = state
        .reveal_usecase
        .execute(&room_id, &session_id, admin_token.as_deref())
        .await?;
    Ok(view_response(jar, view))
}

/// `POST /api/rooms/{room_id}/reset`
pub async fn reset_room(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
    jar: CookieJar,
) -> Result<ViewResponse, RoomUseCaseError> {
    let (jar, session_id) = resolve_session(jar, state.cookies);
    let admin_token = presented_admin_token(&jar, &room_id);
    let view = state
        .reset_room_usecase
        .execute(&room_id, &session_id, admin_token.as_deref())
        .await?;
    Ok(view_response(jar, view))
}

/// `POST /api/rooms/{room_id}/card-pack`
pub async fn change_card_pack(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
    jar: CookieJar,
    body: Bytes,
) -> Result<ViewResponse, RoomUseCaseError> {
    let request: CardPackRequestDto = parse_body(&body)?;
    let pack_id = request.card_pack.unwrap_or_default();

    let (jar, session_id) = resolve_session(jar, state.cookies);
    let admin_token = presented_admin_token(&jar, &room_id);
    let view = state
        .change_card_pack_usecase
        .execute(&room_id, &session_id, admin_token.as_deref(), &pack_id)
        .await?;
    Ok(view_response(jar, view))
}

/// `DELETE /api/rooms/{room_id}`
pub async fn close_room(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
    jar: CookieJar,
) -> Result<StatusCode, RoomUseCaseError> {
    let admin_token = presented_admin_token(&jar, &room_id);
    state
        .close_room_usecase
        .execute(&room_id, admin_token.as_deref())
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
