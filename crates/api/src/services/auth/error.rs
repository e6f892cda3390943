//! Authentication error types.

use thiserror::Error;

use crate::db::RepositoryError;
use crate::services::kakao::KakaoError;

use super::token::TokenError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] giftwise_core::EmailError),

    /// Invalid credentials (wrong password or unknown email).
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Email is already registered.
    #[error("member already exists")]
    MemberAlreadyExists,

    /// Password too weak or invalid.
    #[error("password validation failed: {0}")]
    WeakPassword(String),

    /// Token issuance or verification failed.
    #[error("token error: {0}")]
    Token(#[from] TokenError),

    /// The Kakao exchange failed.
    #[error("kakao error: {0}")]
    Kakao(#[from] KakaoError),

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,
}
