//! ユースケースのエラーを HTTP レスポンスに変換する

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

use crate::{infrastructure::dto::http::ErrorResponseDto, usecase::RoomUseCaseError};

fn status_code(error: &RoomUseCaseError) -> StatusCode {
    match error {
        RoomUseCaseError::InvalidRoomCode
        | RoomUseCaseError::NotAVoter
        | RoomUseCaseError::AlreadyFinished
        | RoomUseCaseError::InvalidToken(_)
        | RoomUseCaseError::InvalidCardPack(_)
        | RoomUseCaseError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        RoomUseCaseError::RoomNotFound => StatusCode::NOT_FOUND,
        RoomUseCaseError::Forbidden => StatusCode::FORBIDDEN,
        RoomUseCaseError::StorageUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        RoomUseCaseError::IdGenerationExhausted(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for RoomUseCaseError {
    fn into_response(self) -> Response {
        let status = status_code(&self);
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::debug!("Request rejected ({}): {}", self.kind(), self);
        }

        let body = ErrorResponseDto {
            error: self.to_string(),
            kind: self.kind().to_string(),
        };
        (status, [(header::CACHE_CONTROL, "no-store")], Json(body)).into_response()
    }
}
