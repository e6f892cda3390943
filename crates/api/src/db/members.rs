//! Member repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use giftwise_core::{Email, MemberId};

use super::RepositoryError;
use crate::models::Member;

/// Internal row type for member queries.
#[derive(Debug, sqlx::FromRow)]
struct MemberRow {
    id: i64,
    email: String,
    password_hash: String,
    kakao_id: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<MemberRow> for Member {
    type Error = RepositoryError;

    fn try_from(row: MemberRow) -> Result<Self, Self::Error> {
        let email = Email::parse(&row.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        Ok(Self {
            id: MemberId::new(row.id),
            email,
            password_hash: row.password_hash,
            kakao_id: row.kakao_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const MEMBER_COLUMNS: &str = "id, email, password_hash, kakao_id, created_at, updated_at";

/// Repository for member database operations.
pub struct MemberRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> MemberRepository<'a> {
    /// Create a new member repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a member by their ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: MemberId) -> Result<Option<Member>, RepositoryError> {
        let row = sqlx::query_as::<_, MemberRow>(&format!(
            "SELECT {MEMBER_COLUMNS} FROM member WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Get a member by their email address.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_email(&self, email: &Email) -> Result<Option<Member>, RepositoryError> {
        let row = sqlx::query_as::<_, MemberRow>(&format!(
            "SELECT {MEMBER_COLUMNS} FROM member WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Get a member by their Kakao account identifier.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_kakao_id(&self, kakao_id: &str) -> Result<Option<Member>, RepositoryError> {
        let row = sqlx::query_as::<_, MemberRow>(&format!(
            "SELECT {MEMBER_COLUMNS} FROM member WHERE kakao_id = $1"
        ))
        .bind(kakao_id)
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Create a new member.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email (or Kakao identifier)
    /// is already registered, `RepositoryError::Database` otherwise.
    pub async fn create(
        &self,
        email: &Email,
        password_hash: &str,
        kakao_id: Option<&str>,
    ) -> Result<Member, RepositoryError> {
        let row = sqlx::query_as::<_, MemberRow>(&format!(
            "INSERT INTO member (email, password_hash, kakao_id)
             VALUES ($1, $2, $3)
             RETURNING {MEMBER_COLUMNS}"
        ))
        .bind(email)
        .bind(password_hash)
        .bind(kakao_id)
        .fetch_one(self.pool)
        .await
        .map_err(|e| RepositoryError::from_unique_violation(e, "member"))?;

        row.try_into()
    }

    /// Rotate a member's password hash.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the member does not exist.
    pub async fn update_password_hash(
        &self,
        id: MemberId,
        password_hash: &str,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE member SET password_hash = $2, updated_at = now() WHERE id = $1",
        )
        .bind(id)
        .bind(password_hash)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
