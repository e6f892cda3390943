//! Member domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use giftwise_core::{Email, MemberId};

/// A registered member (domain type).
///
/// Identity is immutable once created except for credential rotation; the
/// password hash lives here because every auth path needs it.
#[derive(Debug, Clone)]
pub struct Member {
    /// Unique member ID.
    pub id: MemberId,
    /// Member's email address (unique).
    pub email: Email,
    /// Argon2 hash of the member's password.
    pub password_hash: String,
    /// Kakao account identifier for OAuth-linked members.
    pub kakao_id: Option<String>,
    /// When the member registered.
    pub created_at: DateTime<Utc>,
    /// When the member was last updated.
    pub updated_at: DateTime<Utc>,
}

/// The member resolved from a valid bearer token.
///
/// Inserted into request extensions by the auth gateway; this is the sole
/// mechanism by which downstream services learn who is calling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentMember {
    /// Member ID from the token subject.
    pub id: MemberId,
    /// Email claim from the token.
    pub email: Email,
}
