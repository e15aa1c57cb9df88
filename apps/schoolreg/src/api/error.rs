use axum::{
    Json,
    extract::multipart::{MultipartError, MultipartRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use schoolreg_core::{RegistryError, ValidationError};
use thiserror::Error;
use tracing::{error, warn};

use super::types::ErrorResponse;

/// Errors surfaced to HTTP clients.
///
/// Client mistakes carry their own message. Everything else becomes a
/// generic 500 whose message names only the failed operation; the cause is
/// logged, never returned.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Malformed form data: {0}")]
    MalformedForm(String),

    #[error("{message}")]
    FormRead { status: StatusCode, message: String },

    #[error("{0}")]
    Internal(&'static str),
}

impl ApiError {
    /// Map a registry failure. `operation` is the message shown on a 500.
    pub fn from_registry(err: RegistryError, operation: &'static str) -> Self {
        match err {
            RegistryError::Validation(reason) => {
                warn!(%reason, "submission rejected");
                Self::Validation(reason)
            }
            other => Self::internal(operation, other),
        }
    }

    /// Log `cause` and produce a generic 500.
    pub fn internal(operation: &'static str, cause: impl std::fmt::Display) -> Self {
        error!(%cause, "{operation}");
        Self::Internal(operation)
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::MalformedForm(_) => StatusCode::BAD_REQUEST,
            Self::FormRead { status, .. } => *status,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<MultipartRejection> for ApiError {
    fn from(rejection: MultipartRejection) -> Self {
        warn!(%rejection, "not a multipart request");
        Self::MalformedForm(rejection.body_text())
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        let status = err.status();
        warn!(%status, error = %err, "failed to read multipart body");
        // Oversized bodies come back as 413; anything else is the client's framing.
        let status = if status.is_client_error() {
            status
        } else {
            StatusCode::BAD_REQUEST
        };
        Self::FormRead {
            status,
            message: err.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
