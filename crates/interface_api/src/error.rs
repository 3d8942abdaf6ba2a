//! API error handling
//!
//! Every error body carries `"success": false` so invitation mutations keep
//! the `{ "success": bool }` envelope on both paths.

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use validator::ValidationErrors;

use core_kernel::PortError;
use domain_team::{InvitationError, OperationOutcome};
use domain_venue::VenueError;

use crate::auth::AuthError;

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Service unavailable: {0}")]
    Unavailable(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Validation error: {0}")]
    Validation(String, Option<Vec<String>>),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    #[serde(flatten)]
    pub outcome: OperationOutcome,
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation(message.into(), None)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message, details) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg, None),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg, None),
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized", "Unauthorized".to_string(), None),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, "forbidden", msg, None),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg, None),
            ApiError::Unavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, "unavailable", msg, None),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", msg, None),
            ApiError::Validation(msg, details) => (StatusCode::UNPROCESSABLE_ENTITY, "validation_error", msg, details),
        };

        let body = ErrorResponse {
            outcome: OperationOutcome::failure(),
            error: error_type.to_string(),
            message,
            details,
        };

        (status, Json(body)).into_response()
    }
}

impl From<PortError> for ApiError {
    fn from(err: PortError) -> Self {
        let message = err.to_string();
        match err {
            PortError::NotFound { .. } => ApiError::NotFound(message),
            PortError::Validation { .. } => ApiError::validation(message),
            PortError::Conflict { .. } => ApiError::Conflict(message),
            PortError::Connection { .. } => ApiError::Unavailable(message),
            PortError::Internal { .. } => ApiError::Internal(message),
        }
    }
}

impl From<InvitationError> for ApiError {
    fn from(err: InvitationError) -> Self {
        let message = err.to_string();
        match err {
            InvitationError::AccountNotFound(_) | InvitationError::InvitationNotFound(_) => {
                ApiError::NotFound(message)
            }
            InvitationError::AlreadyMember { .. } => ApiError::Conflict(message),
            InvitationError::InvalidInvitation(_) => ApiError::validation(message),
            InvitationError::InvalidToken => ApiError::BadRequest(message),
            InvitationError::Temporal(_) => ApiError::Internal(message),
            InvitationError::Port(port) => port.into(),
        }
    }
}

impl From<VenueError> for ApiError {
    fn from(err: VenueError) -> Self {
        let details = match &err {
            VenueError::IncompleteStep { missing, .. } => {
                Some(missing.iter().map(|f| f.to_string()).collect())
            }
            _ => None,
        };
        ApiError::Validation(err.to_string(), details)
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingPermission(_) => ApiError::Forbidden(err.to_string()),
            AuthError::InvalidSubject(_) => ApiError::BadRequest(err.to_string()),
            AuthError::InvalidToken | AuthError::TokenExpired => ApiError::Unauthorized,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection.status() {
            StatusCode::UNPROCESSABLE_ENTITY => ApiError::validation(rejection.body_text()),
            _ => ApiError::BadRequest(rejection.body_text()),
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        let details = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| match &e.message {
                    Some(message) => format!("{}: {}", field, message),
                    None => format!("{}: {}", field, e.code),
                })
            })
            .collect();
        ApiError::Validation("Request validation failed".to_string(), Some(details))
    }
}
