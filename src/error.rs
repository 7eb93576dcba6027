// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.

use crate::models::ValidationError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Transport failure, timeout, or unreadable response from HCGateway.
    #[error("HCGateway request failed: {0}")]
    RequestFailed(String),

    /// HCGateway answered with a non-2xx status.
    #[error("HCGateway request failed: {url}: HTTP {status}")]
    UpstreamStatus { url: String, status: StatusCode },

    /// Neither refresh nor full login produced a usable token.
    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    #[error("Data validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Message shown to the user when authentication fails.
    pub const CHECK_CREDENTIALS: &'static str = "Authentication failed, check credentials";

    /// Whether this error means the credentials were rejected.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, AppError::AuthFailed(_))
    }

    /// Whether this error came from the network layer.
    pub fn is_transport_failure(&self) -> bool {
        matches!(
            self,
            AppError::RequestFailed(_) | AppError::UpstreamStatus { .. }
        )
    }

    /// Whether HCGateway refused the presented credentials or token.
    pub fn is_credential_rejection(&self) -> bool {
        matches!(
            self,
            AppError::UpstreamStatus {
                status: StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN,
                ..
            }
        )
    }
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::RequestFailed(msg) => {
                (StatusCode::BAD_GATEWAY, "request_failed", Some(msg.clone()))
            }
            AppError::UpstreamStatus { .. } => (
                StatusCode::BAD_GATEWAY,
                "request_failed",
                Some(self.to_string()),
            ),
            AppError::AuthFailed(msg) => {
                tracing::warn!(error = %msg, "Authentication failed");
                (
                    StatusCode::UNAUTHORIZED,
                    "auth_failed",
                    Some(Self::CHECK_CREDENTIALS.to_string()),
                )
            }
            AppError::Validation(err) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "validation_failed",
                Some(err.to_string()),
            ),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "bad_request", Some(msg.clone()))
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None)
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers and services
pub type Result<T> = std::result::Result<T, AppError>;
