//! API error type
//!
//! [`ApiError`] maps registry and engine failures onto HTTP responses.
//! Bad input is a 400, a move that conflicts with the game's state is a 409.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use playox_core::{GameError, RegistryError};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Unknown or unparseable game identifier
    #[error("Game not found")]
    NotFound(String),

    /// Off-board `x`/`y`, reported as sent since no flat position exists for them
    #[error("coordinates ({x}, {y}) are outside the board (expected 0-2)")]
    InvalidCoordinates { x: i64, y: i64 },

    /// Move body that is not a JSON object with integer `x` and `y`
    #[error("invalid move body: {0}")]
    InvalidBody(String),

    #[error(transparent)]
    Game(#[from] GameError),
}

impl From<RegistryError> for ApiError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::NotFound(id) => ApiError::NotFound(id.to_string()),
            RegistryError::Game(err) => ApiError::Game(err),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidBody(rejection.body_text())
    }
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InvalidCoordinates { .. }
            | ApiError::InvalidBody(_)
            | ApiError::Game(GameError::InvalidPosition(_)) => StatusCode::BAD_REQUEST,
            ApiError::Game(
                GameError::PositionOccupied { .. } | GameError::GameFinished | GameError::WrongTurn(_),
            ) => StatusCode::CONFLICT,
            ApiError::Game(GameError::NoLegalMoves) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "internal error while handling request");
        }

        let body = serde_json::json!({
            "error": self.to_string(),
            "status": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}
