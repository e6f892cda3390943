//! Authentication service.
//!
//! Password registration/login and Kakao OAuth login; all three paths end in
//! the same signed bearer token.

mod error;
pub mod token;

pub use error::AuthError;
pub use token::{TokenError, TokenProvider};

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sqlx::PgPool;

use giftwise_core::Email;

use crate::db::{MemberRepository, RepositoryError};
use crate::models::Member;

use super::kakao::KakaoClient;

/// Minimum password length.
const MIN_PASSWORD_LENGTH: usize = 8;

/// Authentication service.
///
/// Handles member registration, password login, and Kakao OAuth login.
pub struct AuthService<'a> {
    members: MemberRepository<'a>,
    tokens: &'a TokenProvider,
    kakao: &'a KakaoClient,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(pool: &'a PgPool, tokens: &'a TokenProvider, kakao: &'a KakaoClient) -> Self {
        Self {
            members: MemberRepository::new(pool),
            tokens,
            kakao,
        }
    }

    /// Register a new member and issue a token.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` for a malformed email,
    /// `AuthError::WeakPassword` when the password fails validation, and
    /// `AuthError::MemberAlreadyExists` when the email is taken.
    pub async fn register(&self, email: &str, password: &str) -> Result<(Member, String), AuthError> {
        let email = Email::parse(email)?;
        validate_password(password)?;
        let password_hash = hash_password(password)?;

        let member = self
            .members
            .create(&email, &password_hash, None)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::MemberAlreadyExists,
                other => AuthError::Repository(other),
            })?;

        let token = self.tokens.issue(member.id, &member.email)?;
        Ok((member, token))
    }

    /// Login with email and password, issuing a token.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` when the email is unknown or
    /// the password does not match.
    pub async fn login(&self, email: &str, password: &str) -> Result<(Member, String), AuthError> {
        let email = Email::parse(email)?;

        let member = self
            .members
            .get_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        verify_password(password, &member.password_hash)?;

        let token = self.tokens.issue(member.id, &member.email)?;
        Ok((member, token))
    }

    /// Login via Kakao: exchange the authorization code for a profile, find
    /// or create the linked member, and issue the same token type.
    ///
    /// First-time Kakao logins create a member with a placeholder email
    /// derived from the Kakao id and the profile nickname as a placeholder
    /// credential.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Kakao` when the provider exchange fails.
    pub async fn kakao_login(&self, code: &str) -> Result<(Member, String), AuthError> {
        let profile = self.kakao.exchange_code(code).await?;

        let member = match self.members.get_by_kakao_id(&profile.id).await? {
            Some(member) => member,
            None => {
                let email = Email::parse(&format!("kakao.{}@members.kakao.com", profile.id))?;
                let password_hash = hash_password(&profile.nickname)?;
                self.members
                    .create(&email, &password_hash, Some(&profile.id))
                    .await?
            }
        };

        let token = self.tokens.issue(member.id, &member.email)?;
        Ok((member, token))
    }
}

/// Validate password requirements.
fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Hash a password with Argon2id and a fresh salt.
fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|_| AuthError::PasswordHash)?;
    Ok(hash.to_string())
}

/// Verify a password against a stored hash.
fn verify_password(password: &str, stored_hash: &str) -> Result<(), AuthError> {
    let parsed = PasswordHash::new(stored_hash).map_err(|_| AuthError::PasswordHash)?;
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .map_err(|_| AuthError::InvalidCredentials)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_roundtrip() {
        let hash = hash_password("correct horse battery").unwrap();
        assert!(verify_password("correct horse battery", &hash).is_ok());
        assert!(matches!(
            verify_password("wrong password!", &hash),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_short_password_is_rejected() {
        assert!(matches!(
            validate_password("short"),
            Err(AuthError::WeakPassword(_))
        ));
        assert!(validate_password("long enough").is_ok());
    }

    #[test]
    fn test_hashes_are_salted() {
        let a = hash_password("same password").unwrap();
        let b = hash_password("same password").unwrap();
        assert_ne!(a, b);
    }
}
