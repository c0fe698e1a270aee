//! Mapping of failures to HTTP responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use tokio::task::JoinError;
use tracing::error;

use super::responses::ErrorResponse;
use crate::error::{ErrorKind, TimerError};

/// Every way a request can fail
#[derive(Debug)]
pub enum ApiError {
    /// Missing or wrong API key
    Unauthorized,
    /// Required body field absent or not an integer
    MissingField(&'static str),
    Timer(TimerError),
    /// Blocking engine task panicked or was cancelled
    TaskFailed(JoinError),
}

impl From<TimerError> for ApiError {
    fn from(e: TimerError) -> Self {
        Self::Timer(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            Self::TaskFailed(e) => {
                error!("Timer task failed: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, internal_error())
            }
            Self::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                ErrorResponse {
                    error: "Unauthorized".to_string(),
                    message: Some("Invalid API key".to_string()),
                },
            ),
            Self::MissingField(field) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    error: format!("Missing {}", field),
                    message: None,
                },
            ),
            Self::Timer(e) => match e.kind() {
                ErrorKind::Validation | ErrorKind::StateConflict => (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse {
                        error: e.to_string(),
                        message: None,
                    },
                ),
                ErrorKind::Storage => {
                    error!("Timer storage failure: {}", e);
                    (StatusCode::INTERNAL_SERVER_ERROR, internal_error())
                }
            },
        };

        (status, Json(body)).into_response()
    }
}

fn internal_error() -> ErrorResponse {
    ErrorResponse {
        error: "Internal server error".to_string(),
        message: Some("Timer state could not be persisted".to_string()),
    }
}
