//! Product option repository for database operations.
//!
//! Owns the decrement-and-check: an atomic conditional subtraction that fails
//! rather than underflows, serialized per row by the database.

use sqlx::PgPool;

use giftwise_core::{OptionId, ProductId};

use super::RepositoryError;
use crate::models::ProductOption;

/// Internal row type for option queries.
#[derive(Debug, sqlx::FromRow)]
struct OptionRow {
    id: i64,
    name: String,
    quantity: i64,
    product_id: i64,
}

impl From<OptionRow> for ProductOption {
    fn from(row: OptionRow) -> Self {
        Self {
            id: OptionId::new(row.id),
            name: row.name,
            quantity: row.quantity,
            product_id: ProductId::new(row.product_id),
        }
    }
}

const OPTION_COLUMNS: &str = "id, name, quantity, product_id";

/// Repository for product option database operations.
pub struct OptionRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OptionRepository<'a> {
    /// Create a new option repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get an option by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: OptionId) -> Result<Option<ProductOption>, RepositoryError> {
        let row = sqlx::query_as::<_, OptionRow>(&format!(
            "SELECT {OPTION_COLUMNS} FROM product_option WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// List all options owned by a product, id ascending.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_by_product(
        &self,
        product_id: ProductId,
    ) -> Result<Vec<ProductOption>, RepositoryError> {
        let rows = sqlx::query_as::<_, OptionRow>(&format!(
            "SELECT {OPTION_COLUMNS} FROM product_option WHERE product_id = $1 ORDER BY id"
        ))
        .bind(product_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Add an option to a product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails (including a
    /// foreign-key failure when the product does not exist).
    pub async fn create(
        &self,
        product_id: ProductId,
        name: &str,
        quantity: i64,
    ) -> Result<ProductOption, RepositoryError> {
        let row = sqlx::query_as::<_, OptionRow>(&format!(
            "INSERT INTO product_option (name, quantity, product_id)
             VALUES ($1, $2, $3)
             RETURNING {OPTION_COLUMNS}"
        ))
        .bind(name)
        .bind(quantity)
        .bind(product_id)
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    /// Replace an option's name and quantity.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the option does not exist.
    pub async fn update(
        &self,
        id: OptionId,
        name: &str,
        quantity: i64,
    ) -> Result<ProductOption, RepositoryError> {
        let row = sqlx::query_as::<_, OptionRow>(&format!(
            "UPDATE product_option SET name = $2, quantity = $3 WHERE id = $1
             RETURNING {OPTION_COLUMNS}"
        ))
        .bind(id)
        .bind(name)
        .bind(quantity)
        .fetch_optional(self.pool)
        .await?;

        row.map(Into::into).ok_or(RepositoryError::NotFound)
    }

    /// Atomically subtract `amount` from an option's quantity.
    ///
    /// The row-level conditional update is the serialization point: two
    /// concurrent orders cannot both pass the check and drive the quantity
    /// negative. Draining to exactly zero succeeds.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::InsufficientQuantity` if the option holds
    /// less than `amount` (the quantity is left unchanged), or
    /// `RepositoryError::NotFound` if the option does not exist.
    pub async fn decrement_quantity(
        &self,
        executor: &mut sqlx::PgConnection,
        id: OptionId,
        amount: i64,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE product_option
             SET quantity = quantity - $2
             WHERE id = $1 AND quantity >= $2",
        )
        .bind(id)
        .bind(amount)
        .execute(&mut *executor)
        .await?;

        if result.rows_affected() == 1 {
            return Ok(());
        }

        // Zero rows: distinguish a missing option from insufficient stock.
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM product_option WHERE id = $1)")
                .bind(id)
                .fetch_one(executor)
                .await?;

        if exists {
            Err(RepositoryError::InsufficientQuantity)
        } else {
            Err(RepositoryError::NotFound)
        }
    }
}
