use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::accounts::types::AccountError;
use crate::storage::StoreError;
use crate::todos::types::TodoError;

/// Transport-level error: every handler failure ends up here and is mapped
/// to a status code in one place.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid request: {0}")]
    Validation(String),

    #[error("Authentication required")]
    Unauthorized,

    #[error("Not found")]
    NotFound,

    #[error("Already exists")]
    Conflict,

    #[error("A completed to-do cannot be changed")]
    InvalidTransition,

    #[error("Internal error")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Conflict => StatusCode::BAD_REQUEST,
            AppError::InvalidTransition => StatusCode::BAD_REQUEST,
            AppError::Internal(ref detail) => {
                tracing::error!("Request failed: {}", detail);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, self.to_string()).into_response()
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        AppError::Internal(e.to_string())
    }
}

impl From<AccountError> for AppError {
    fn from(e: AccountError) -> Self {
        match e {
            AccountError::AlreadyExists => AppError::Conflict,
            AccountError::InvalidCredentials => AppError::NotFound,
            AccountError::Hashing(detail) => AppError::Internal(detail),
            AccountError::Store(e) => e.into(),
        }
    }
}

impl From<TodoError> for AppError {
    fn from(e: TodoError) -> Self {
        match e {
            TodoError::NotFound => AppError::NotFound,
            TodoError::InvalidTransition => AppError::InvalidTransition,
            TodoError::Store(e) => e.into(),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(e: JsonRejection) -> Self {
        AppError::Validation(e.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(e: QueryRejection) -> Self {
        AppError::Validation(e.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(e: PathRejection) -> Self {
        AppError::Validation(e.body_text())
    }
}
