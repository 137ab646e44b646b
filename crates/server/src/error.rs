use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use database::RepositoryError;
use log::error;
use models::validation::ValidationError;
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

/// Errors returned by the course routes
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or malformed input
    #[error("{0}")]
    Validation(String),

    #[error("Course not found")]
    NotFound,

    #[error("Course number already exists")]
    Conflict,

    /// Body exceeded the configured request size limit
    #[error("{0}")]
    PayloadTooLarge(String),

    /// Anything else. Only `message` reaches the client; `detail` is logged.
    #[error("{message}: {detail}")]
    Internal {
        message: &'static str,
        detail: String,
    },
}

/// Body of every error response from the course routes
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub message: String,
}

impl ApiError {
    /// Translate a repository failure, using `message` for unexpected errors
    pub fn from_repository(err: RepositoryError, message: &'static str) -> Self {
        match err {
            RepositoryError::NotFound(_) => Self::NotFound,
            RepositoryError::DuplicateKey(_) => Self::Conflict,
            RepositoryError::KeyChange => Self::Validation(ValidationError::KeyChange.to_string()),
            RepositoryError::Database(e) => Self::Internal {
                message,
                detail: e.to_string(),
            },
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Conflict => StatusCode::CONFLICT,
            Self::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return Self::PayloadTooLarge(rejection.body_text());
        }
        Self::Validation(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = match &self {
            Self::Internal { message, detail } => {
                error!("{message}: {detail}");
                message.to_string()
            }
            other => other.to_string(),
        };

        (self.status(), Json(ErrorResponse { message })).into_response()
    }
}
