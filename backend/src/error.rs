//! Error types for the session server
//!
//! Every failure a handler can produce is an [`ApiError`]; the HTTP status is
//! derived from the variant and the body is the error message as plain text.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chess_engine::ChessEngineError;
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum ApiError {
    /// Missing, malformed or wrong credentials
    #[error("{0}")]
    Unauthorized(String),

    /// Seat already taken or game full
    #[error("{0}")]
    Forbidden(String),

    /// Unknown game, empty seat or history index past the end
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("Timeout waiting for turn.")]
    TurnTimeout,

    #[error("Server exited while waiting for turn.")]
    Cancelled,

    #[error("{0}")]
    Internal(String),

    /// Move rejected by the rules engine
    #[error("Move is invalid: {0}")]
    Engine(#[from] ChessEngineError),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::TurnTimeout | ApiError::Cancelled => StatusCode::REQUEST_TIMEOUT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Engine(ChessEngineError::InternalInvariant { .. }) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::Engine(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("[SERVER] {}", self);
        }
        (status, self.to_string()).into_response()
    }
}
