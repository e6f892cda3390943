//! Wish repository for database operations.
//!
//! Wish listings join the product in one query so paginated views never do
//! per-row lookups. Uniqueness per (member, product) is a database
//! constraint; violations surface as `Conflict`.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use giftwise_core::{MemberId, Page, PageRequest, Price, ProductId, SortDirection, WishId};

use super::RepositoryError;
use crate::models::{Wish, WishView};

/// Sort keys accepted by the wish listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WishSortKey {
    /// Sort by surrogate ID (natural order).
    #[default]
    Id,
    /// Sort by desired quantity.
    Quantity,
    /// Sort by creation time.
    CreatedAt,
}

impl WishSortKey {
    /// The qualified column this key sorts on.
    #[must_use]
    pub const fn column(self) -> &'static str {
        match self {
            Self::Id => "w.id",
            Self::Quantity => "w.quantity",
            Self::CreatedAt => "w.created_at",
        }
    }

    /// Parse a key from its query-parameter form; unknown keys fall back to
    /// the natural id order.
    #[must_use]
    pub fn parse_or_default(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "quantity" => Self::Quantity,
            "created_at" | "createdat" => Self::CreatedAt,
            _ => Self::Id,
        }
    }
}

/// Internal row type for wish queries.
#[derive(Debug, sqlx::FromRow)]
struct WishRow {
    id: i64,
    member_id: i64,
    product_id: i64,
    quantity: i64,
    created_at: DateTime<Utc>,
}

impl From<WishRow> for Wish {
    fn from(row: WishRow) -> Self {
        Self {
            id: WishId::new(row.id),
            member_id: MemberId::new(row.member_id),
            product_id: ProductId::new(row.product_id),
            quantity: row.quantity,
            created_at: row.created_at,
        }
    }
}

/// Internal row type for the wish/product join.
#[derive(Debug, sqlx::FromRow)]
struct WishViewRow {
    id: i64,
    product_id: i64,
    product_name: String,
    product_price: i64,
    product_image_url: String,
    quantity: i64,
    created_at: DateTime<Utc>,
}

impl TryFrom<WishViewRow> for WishView {
    type Error = RepositoryError;

    fn try_from(row: WishViewRow) -> Result<Self, Self::Error> {
        let product_price = Price::new(row.product_price).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid price in database: {e}"))
        })?;

        Ok(Self {
            id: WishId::new(row.id),
            product_id: ProductId::new(row.product_id),
            product_name: row.product_name,
            product_price,
            product_image_url: row.product_image_url,
            quantity: row.quantity,
            created_at: row.created_at,
        })
    }
}

const WISH_COLUMNS: &str = "id, member_id, product_id, quantity, created_at";

/// Repository for wish database operations.
pub struct WishRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> WishRepository<'a> {
    /// Create a new wish repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a wish by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: WishId) -> Result<Option<Wish>, RepositoryError> {
        let row = sqlx::query_as::<_, WishRow>(&format!(
            "SELECT {WISH_COLUMNS} FROM wish WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Create a wish for a (member, product) pair.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the member already wished for
    /// this product, `RepositoryError::Database` otherwise.
    pub async fn create(
        &self,
        member_id: MemberId,
        product_id: ProductId,
        quantity: i64,
    ) -> Result<Wish, RepositoryError> {
        let row = sqlx::query_as::<_, WishRow>(&format!(
            "INSERT INTO wish (member_id, product_id, quantity)
             VALUES ($1, $2, $3)
             RETURNING {WISH_COLUMNS}"
        ))
        .bind(member_id)
        .bind(product_id)
        .bind(quantity)
        .fetch_one(self.pool)
        .await
        .map_err(|e| RepositoryError::from_unique_violation(e, "wish"))?;

        Ok(row.into())
    }

    /// Set a wish's quantity.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the wish does not exist.
    pub async fn update_quantity(
        &self,
        id: WishId,
        quantity: i64,
    ) -> Result<Wish, RepositoryError> {
        let row = sqlx::query_as::<_, WishRow>(&format!(
            "UPDATE wish SET quantity = $2 WHERE id = $1 RETURNING {WISH_COLUMNS}"
        ))
        .bind(id)
        .bind(quantity)
        .fetch_optional(self.pool)
        .await?;

        row.map(Into::into).ok_or(RepositoryError::NotFound)
    }

    /// Delete a wish.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the wish does not exist.
    pub async fn delete(&self, id: WishId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM wish WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    /// List one page of a member's wishes joined with their products.
    ///
    /// An empty page is a valid result, never an error.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if either query fails.
    pub async fn list_page_by_member(
        &self,
        member_id: MemberId,
        request: PageRequest,
        sort_key: WishSortKey,
        direction: SortDirection,
    ) -> Result<Page<WishView>, RepositoryError> {
        // Sort column and direction come from closed enums, never user input.
        let rows = sqlx::query_as::<_, WishViewRow>(&format!(
            "SELECT w.id, w.product_id, p.name AS product_name,
                    p.price AS product_price, p.image_url AS product_image_url,
                    w.quantity, w.created_at
             FROM wish w
             JOIN product p ON p.id = w.product_id
             WHERE w.member_id = $1
             ORDER BY {} {}, w.id ASC
             LIMIT $2 OFFSET $3",
            sort_key.column(),
            direction.as_sql(),
        ))
        .bind(member_id)
        .bind(request.limit())
        .bind(request.offset())
        .fetch_all(self.pool)
        .await?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM wish WHERE member_id = $1")
            .bind(member_id)
            .fetch_one(self.pool)
            .await?;

        let content = rows
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page::new(content, request, total.unsigned_abs()))
    }
}
