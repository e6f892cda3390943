//! Bearer token issuance and verification.
//!
//! Tokens are HS256 JWTs carrying the member id as the subject, the email as
//! a claim, and an expiry. The gateway verifies them statelessly; there is no
//! server-side session store.

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use giftwise_core::{Email, MemberId};

use crate::models::CurrentMember;

/// Errors that can occur when issuing or verifying tokens.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    /// The token is malformed, has a bad signature, or is expired.
    #[error("invalid token: {0}")]
    Invalid(#[from] jsonwebtoken::errors::Error),

    /// The subject claim is not a member id.
    #[error("invalid subject claim")]
    InvalidSubject,

    /// The email claim is not a valid email.
    #[error("invalid email claim: {0}")]
    InvalidEmail(#[from] giftwise_core::EmailError),
}

/// JWT claims carried by a Giftwise bearer token.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// Member id, stringified.
    sub: String,
    /// Member email.
    email: String,
    /// Expiry, seconds since the epoch.
    exp: i64,
    /// Issued-at, seconds since the epoch.
    iat: i64,
}

/// Issues and verifies signed bearer tokens.
#[derive(Clone)]
pub struct TokenProvider {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl TokenProvider {
    /// Create a provider from the shared signing secret and a token lifetime
    /// in minutes.
    #[must_use]
    pub fn new(secret: &SecretString, ttl_minutes: i64) -> Self {
        let bytes = secret.expose_secret().as_bytes();
        Self {
            encoding_key: EncodingKey::from_secret(bytes),
            decoding_key: DecodingKey::from_secret(bytes),
            ttl: Duration::minutes(ttl_minutes),
        }
    }

    /// Issue a token for a member.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Invalid` if signing fails.
    pub fn issue(&self, id: MemberId, email: &Email) -> Result<String, TokenError> {
        let now = Utc::now();
        let claims = Claims {
            sub: id.as_i64().to_string(),
            email: email.as_str().to_owned(),
            exp: (now + self.ttl).timestamp(),
            iat: now.timestamp(),
        };

        Ok(jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &self.encoding_key,
        )?)
    }

    /// Verify a token and resolve the acting member.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Invalid` for a bad signature, malformed token, or
    /// expired token; `TokenError::InvalidSubject`/`InvalidEmail` when the
    /// claims do not decode to a member identity.
    pub fn verify(&self, token: &str) -> Result<CurrentMember, TokenError> {
        let validation = Validation::new(Algorithm::HS256);
        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &validation)?;

        let id = data
            .claims
            .sub
            .parse::<i64>()
            .map_err(|_| TokenError::InvalidSubject)?;
        let email = Email::parse(&data.claims.email)?;

        Ok(CurrentMember {
            id: MemberId::new(id),
            email,
        })
    }
}
