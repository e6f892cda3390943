//! Order repository for database operations.
//!
//! Order placement is one transaction: resolve the option, decrement its
//! inventory conditionally, insert the order row, and drop any wish the buyer
//! held for the product. A failed decrement rolls the whole thing back, so a
//! decrement without a persisted order is never observable.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use giftwise_core::{MemberId, OptionId, OrderId, ProductId};

use super::{OptionRepository, RepositoryError};
use crate::models::Order;

/// Internal row type for order queries.
#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: i64,
    member_id: i64,
    option_id: i64,
    product_id: i64,
    quantity: i64,
    message: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<OrderRow> for Order {
    fn from(row: OrderRow) -> Self {
        Self {
            id: OrderId::new(row.id),
            member_id: MemberId::new(row.member_id),
            option_id: OptionId::new(row.option_id),
            product_id: ProductId::new(row.product_id),
            quantity: row.quantity,
            message: row.message,
            created_at: row.created_at,
        }
    }
}

const ORDER_COLUMNS: &str = "id, member_id, option_id, product_id, quantity, message, created_at";

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Place an order for `buyer` against `option_id`, decrementing the
    /// option's inventory in the same transaction.
    ///
    /// Any wish the buyer held for the ordered product is removed as part of
    /// the transaction.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the option does not exist,
    /// `RepositoryError::InsufficientQuantity` if it holds less than
    /// `quantity`, and `RepositoryError::Database` for other failures. No
    /// partial effects remain on error.
    pub async fn place(
        &self,
        buyer: MemberId,
        option_id: OptionId,
        quantity: i64,
        message: Option<&str>,
    ) -> Result<Order, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let product_id: Option<i64> =
            sqlx::query_scalar("SELECT product_id FROM product_option WHERE id = $1")
                .bind(option_id)
                .fetch_optional(&mut *tx)
                .await?;
        let product_id = product_id.ok_or(RepositoryError::NotFound)?;

        OptionRepository::new(self.pool)
            .decrement_quantity(&mut *tx, option_id, quantity)
            .await?;

        let row = sqlx::query_as::<_, OrderRow>(&format!(
            "INSERT INTO orders (member_id, option_id, product_id, quantity, message)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {ORDER_COLUMNS}"
        ))
        .bind(buyer)
        .bind(option_id)
        .bind(product_id)
        .bind(quantity)
        .bind(message)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM wish WHERE member_id = $1 AND product_id = $2")
            .bind(buyer)
            .bind(product_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(row.into())
    }

    /// Get an order by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: OrderId) -> Result<Option<Order>, RepositoryError> {
        let row = sqlx::query_as::<_, OrderRow>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }
}
