//! Database operations for the Giftwise `PostgreSQL` database.
//!
//! # Tables
//!
//! - `member` - Registered members (password and Kakao OAuth identities)
//! - `category` - Product categories
//! - `product` - Products, each owned by a category
//! - `product_option` - Purchasable variants carrying inventory quantity
//! - `wish` - Per-member saved products, unique per (member, product)
//! - `orders` - Placed orders (non-owning references)
//!
//! Repositories use runtime `sqlx::query_as` with `#[derive(sqlx::FromRow)]`
//! row types that convert into domain models via `TryFrom`.
//!
//! # Migrations
//!
//! Migrations live in `crates/api/migrations/` and run via:
//! ```bash
//! cargo run -p giftwise-cli -- migrate
//! ```

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

pub mod categories;
pub mod members;
pub mod options;
pub mod orders;
pub mod products;
pub mod wishes;

pub use categories::CategoryRepository;
pub use members::MemberRepository;
pub use options::OptionRepository;
pub use orders::OrderRepository;
pub use products::{ProductRepository, ProductSortKey};
pub use wishes::{WishRepository, WishSortKey};

/// Errors that can occur during repository operations.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique email or duplicate wish).
    #[error("constraint violation: {0}")]
    Conflict(String),

    /// Conditional inventory decrement matched no row with enough stock.
    #[error("insufficient quantity")]
    InsufficientQuantity,
}

impl RepositoryError {
    /// Translate a sqlx error into `Conflict` when it is a unique violation,
    /// keeping the original error otherwise.
    pub(crate) fn from_unique_violation(e: sqlx::Error, what: &str) -> Self {
        if let sqlx::Error::Database(ref db_err) = e
            && db_err.is_unique_violation()
        {
            return Self::Conflict(format!("{what} already exists"));
        }
        Self::Database(e)
    }

    /// Translate a sqlx error into `Conflict` when it is a foreign-key
    /// violation, keeping the original error otherwise.
    pub(crate) fn from_foreign_key_violation(e: sqlx::Error, what: &str) -> Self {
        if let sqlx::Error::Database(ref db_err) = e
            && db_err.is_foreign_key_violation()
        {
            return Self::Conflict(format!("{what} is still referenced"));
        }
        Self::Database(e)
    }
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
