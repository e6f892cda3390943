//! Product repository for database operations.
//!
//! Listing supports sorting by id, name, or price; every ORDER BY carries an
//! `id ASC` tie-break so pages are stable when sort keys compare equal.

use sqlx::PgPool;

use giftwise_core::{CategoryId, Page, PageRequest, Price, ProductId, SortDirection};

use super::RepositoryError;
use crate::models::Product;

/// Sort keys accepted by the product listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProductSortKey {
    /// Sort by surrogate ID (natural order).
    #[default]
    Id,
    /// Sort by product name.
    Name,
    /// Sort by price.
    Price,
}

impl ProductSortKey {
    /// The column this key sorts on.
    #[must_use]
    pub const fn column(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
            Self::Price => "price",
        }
    }

    /// Parse a key from its query-parameter form; unknown keys fall back to
    /// the natural id order.
    #[must_use]
    pub fn parse_or_default(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "name" => Self::Name,
            "price" => Self::Price,
            _ => Self::Id,
        }
    }
}

/// Internal row type for product queries.
#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: i64,
    name: String,
    price: i64,
    image_url: String,
    category_id: i64,
}

impl TryFrom<ProductRow> for Product {
    type Error = RepositoryError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        let price = Price::new(row.price).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid price in database: {e}"))
        })?;

        Ok(Self {
            id: ProductId::new(row.id),
            name: row.name,
            price,
            image_url: row.image_url,
            category_id: CategoryId::new(row.category_id),
        })
    }
}

const PRODUCT_COLUMNS: &str = "id, name, price, image_url, category_id";

/// Repository for product database operations.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a product by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM product WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Create a product together with its initial option, atomically.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any statement fails; nothing is
    /// persisted in that case.
    pub async fn create_with_option(
        &self,
        name: &str,
        price: Price,
        image_url: &str,
        category_id: CategoryId,
        option_name: &str,
        option_quantity: i64,
    ) -> Result<Product, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "INSERT INTO product (name, price, image_url, category_id)
             VALUES ($1, $2, $3, $4)
             RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(name)
        .bind(price)
        .bind(image_url)
        .bind(category_id)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("INSERT INTO product_option (name, quantity, product_id) VALUES ($1, $2, $3)")
            .bind(option_name)
            .bind(option_quantity)
            .bind(row.id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        row.try_into()
    }

    /// Update a product in place.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product does not exist.
    pub async fn update(
        &self,
        id: ProductId,
        name: &str,
        price: Price,
        image_url: &str,
        category_id: CategoryId,
    ) -> Result<Product, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "UPDATE product
             SET name = $2, price = $3, image_url = $4, category_id = $5
             WHERE id = $1
             RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(id)
        .bind(name)
        .bind(price)
        .bind(image_url)
        .bind(category_id)
        .fetch_optional(self.pool)
        .await?;

        row.ok_or(RepositoryError::NotFound)?.try_into()
    }

    /// Delete a product; its options cascade.
    ///
    /// Order rows hold non-cascading references, so a product with order
    /// history cannot be deleted.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product does not exist and
    /// `RepositoryError::Conflict` if orders still reference it.
    pub async fn delete(&self, id: ProductId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM product WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(|e| RepositoryError::from_foreign_key_violation(e, "product"))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    /// List one page of products.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if either query fails.
    pub async fn list_page(
        &self,
        request: PageRequest,
        sort_key: ProductSortKey,
        direction: SortDirection,
    ) -> Result<Page<Product>, RepositoryError> {
        // Sort column and direction come from closed enums, never user input.
        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM product
             ORDER BY {} {}, id ASC
             LIMIT $1 OFFSET $2",
            sort_key.column(),
            direction.as_sql(),
        ))
        .bind(request.limit())
        .bind(request.offset())
        .fetch_all(self.pool)
        .await?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM product")
            .fetch_one(self.pool)
            .await?;

        let content = rows
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page::new(content, request, total.unsigned_abs()))
    }
}
