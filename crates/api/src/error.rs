//! Unified error handling with Sentry integration.
//!
//! Domain services raise typed errors; this module folds them into one
//! `AppError` whose `IntoResponse` maps every kind to a fixed status code and
//! a structured JSON body `{"error": <kind>, "message": <text>}`. Server
//! errors are captured to Sentry before responding; nothing is silently
//! swallowed.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::db::RepositoryError;
use crate::services::{AuthError, CatalogError, OrderError, WishError};

/// Application-level error type for the API.
#[derive(Debug, Error)]
pub enum AppError {
    /// Resource not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Actor does not own the resource being mutated.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Out-of-range quantity or malformed request.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Inventory underflow attempt.
    #[error("insufficient quantity")]
    InsufficientQuantity,

    /// Duplicate wish or duplicate email.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Missing/invalid/expired token.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// OAuth provider unreachable or returned an error.
    #[error("upstream failure: {0}")]
    Upstream(String),

    /// Database operation failed.
    #[error("database error: {0}")]
    Database(RepositoryError),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// The machine-readable kind carried in the response body.
    const fn kind(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "not_found",
            Self::Forbidden(_) => "forbidden",
            Self::InvalidInput(_) => "invalid_input",
            Self::InsufficientQuantity => "insufficient_quantity",
            Self::Conflict(_) => "conflict",
            Self::Unauthorized(_) => "unauthorized",
            Self::Upstream(_) => "upstream_failure",
            Self::Database(_) | Self::Internal(_) => "internal",
        }
    }

    const fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Self::InsufficientQuantity | Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Upstream(_) => StatusCode::BAD_GATEWAY,
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Structured error body returned to clients.
#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'static str,
    message: &'a str,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if matches!(self, Self::Database(_) | Self::Internal(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Database(_) | Self::Internal(_) => "internal server error".to_owned(),
            Self::Upstream(_) => "external service error".to_owned(),
            other => other.to_string(),
        };

        let body = ErrorBody {
            error: self.kind(),
            message: &message,
        };

        (self.status(), Json(body)).into_response()
    }
}

impl From<RepositoryError> for AppError {
    fn from(e: RepositoryError) -> Self {
        match e {
            RepositoryError::NotFound => Self::NotFound("resource not found".to_owned()),
            RepositoryError::Conflict(msg) => Self::Conflict(msg),
            RepositoryError::InsufficientQuantity => Self::InsufficientQuantity,
            other => Self::Database(other),
        }
    }
}

impl From<CatalogError> for AppError {
    fn from(e: CatalogError) -> Self {
        match e {
            CatalogError::CategoryNotFound => Self::NotFound("category not found".to_owned()),
            CatalogError::ProductNotFound => Self::NotFound("product not found".to_owned()),
            CatalogError::OptionNotFound => Self::NotFound("option not found".to_owned()),
            CatalogError::InvalidInput(msg) => Self::InvalidInput(msg),
            CatalogError::Repository(e) => e.into(),
        }
    }
}

impl From<WishError> for AppError {
    fn from(e: WishError) -> Self {
        match e {
            WishError::WishNotFound => Self::NotFound("wish not found".to_owned()),
            WishError::ProductNotFound => Self::NotFound("product not found".to_owned()),
            WishError::MemberNotFound => Self::NotFound("member not found".to_owned()),
            WishError::DuplicateWish => {
                Self::Conflict("wish already exists for this product".to_owned())
            }
            WishError::Forbidden => Self::Forbidden("not the owner of this wish".to_owned()),
            WishError::InvalidInput(msg) => Self::InvalidInput(msg),
            WishError::Repository(e) => e.into(),
        }
    }
}

impl From<OrderError> for AppError {
    fn from(e: OrderError) -> Self {
        match e {
            OrderError::MemberNotFound => Self::NotFound("member not found".to_owned()),
            OrderError::OptionNotFound => Self::NotFound("option not found".to_owned()),
            OrderError::InvalidQuantity => Self::InvalidInput(e.to_string()),
            OrderError::InsufficientQuantity => Self::InsufficientQuantity,
            OrderError::Repository(e) => e.into(),
        }
    }
}

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::InvalidEmail(e) => Self::InvalidInput(format!("invalid email: {e}")),
            AuthError::InvalidCredentials => Self::Unauthorized("invalid credentials".to_owned()),
            AuthError::MemberAlreadyExists => {
                Self::Conflict("an account with this email already exists".to_owned())
            }
            AuthError::WeakPassword(msg) => Self::InvalidInput(msg),
            AuthError::Token(e) => Self::Unauthorized(e.to_string()),
            AuthError::Kakao(e) => Self::Upstream(e.to_string()),
            AuthError::Repository(e) => e.into(),
            AuthError::PasswordHash => Self::Internal("password hashing failed".to_owned()),
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
