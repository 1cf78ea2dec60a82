//! Mapping from engine failures to HTTP responses.
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use battle_runtime::{EngineError, MissingEntity};
use serde::Serialize;
use thiserror::Error;

/// Every way a request can fail, with the message sent to the client.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid game ID")]
    InvalidGameId,

    #[error("Unauthorized")]
    Unauthorized,

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    InvalidInput(String),

    #[error("Not in Phase 1")]
    WrongPhase,

    /// The detail is logged, never sent.
    #[error("Internal server error")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidGameId | ApiError::InvalidInput(_) | ApiError::WrongPhase => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn player_game_not_found() -> Self {
        ApiError::NotFound("Player game not found".to_string())
    }
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::NotFound(MissingEntity::TournamentState(_)) => {
                ApiError::player_game_not_found()
            }
            EngineError::NotFound(MissingEntity::Game(_)) => {
                ApiError::NotFound("Game not found".to_string())
            }
            EngineError::NotFound(MissingEntity::Name(id)) => {
                ApiError::NotFound(format!("Name {} not found", id.get()))
            }
            EngineError::WrongPhase { .. } => ApiError::WrongPhase,
            EngineError::InvalidInput(err) => ApiError::InvalidInput(err.to_string()),
            EngineError::Repository(err) => ApiError::Internal(err.to_string()),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            ApiError::Internal(detail) => tracing::error!("Request failed: {}", detail),
            other => tracing::warn!(status = status.as_u16(), "Request rejected: {}", other),
        }
        let body = ErrorBody {
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
