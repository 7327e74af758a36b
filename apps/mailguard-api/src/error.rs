//! Error types for the MailGuard proxy server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use shared_types::RequestError;
use thiserror::Error;

use crate::client::ClientError;

/// Server error types
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Analyzer returned status {0}")]
    UpstreamStatus(u16),

    #[error("Analyzer unreachable: {0}")]
    UpstreamUnreachable(String),

    #[error("Analyzer timed out")]
    UpstreamTimeout,

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    success: bool,
    error: String,
    code: String,
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            ServerError::InvalidRequest(msg) => {
                (StatusCode::BAD_REQUEST, "INVALID_REQUEST", msg.clone())
            }
            ServerError::UpstreamStatus(status) => (
                StatusCode::BAD_GATEWAY,
                "ANALYZER_ERROR",
                format!("Analyzer returned status {}", status),
            ),
            ServerError::UpstreamUnreachable(msg) => (
                StatusCode::BAD_GATEWAY,
                "ANALYZER_UNREACHABLE",
                msg.clone(),
            ),
            ServerError::UpstreamTimeout => (
                StatusCode::GATEWAY_TIMEOUT,
                "ANALYZER_TIMEOUT",
                "Analyzer did not respond in time".to_string(),
            ),
            ServerError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                msg.clone(),
            ),
        };

        let body = ErrorResponse {
            success: false,
            error: message,
            code: code.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<ClientError> for ServerError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Status(status) => ServerError::UpstreamStatus(status),
            ClientError::Transport(e) if e.is_timeout() => ServerError::UpstreamTimeout,
            ClientError::Transport(e) => ServerError::UpstreamUnreachable(e.to_string()),
        }
    }
}

impl From<RequestError> for ServerError {
    fn from(err: RequestError) -> Self {
        ServerError::InvalidRequest(err.to_string())
    }
}
