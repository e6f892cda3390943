//! Catalog service: products, categories, and option management.

use sqlx::PgPool;
use thiserror::Error;

use giftwise_core::{CategoryId, OptionId, Page, PageRequest, Price, ProductId, SortDirection};

use crate::db::products::ProductSortKey;
use crate::db::{CategoryRepository, OptionRepository, ProductRepository, RepositoryError};
use crate::models::{Category, Product, ProductOption};

/// Errors that can occur during catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The referenced category does not exist.
    #[error("category not found")]
    CategoryNotFound,

    /// The product does not exist.
    #[error("product not found")]
    ProductNotFound,

    /// The option does not exist.
    #[error("option not found")]
    OptionNotFound,

    /// Quantity or price is out of range.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Catalog service over the category, product, and option repositories.
pub struct CatalogService<'a> {
    categories: CategoryRepository<'a>,
    products: ProductRepository<'a>,
    options: OptionRepository<'a>,
}

impl<'a> CatalogService<'a> {
    /// Create a new catalog service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            categories: CategoryRepository::new(pool),
            products: ProductRepository::new(pool),
            options: OptionRepository::new(pool),
        }
    }

    /// List every category.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Repository` if the query fails.
    pub async fn list_categories(&self) -> Result<Vec<Category>, CatalogError> {
        Ok(self.categories.list_all().await?)
    }

    /// Create a category.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Repository` if the insert fails.
    pub async fn create_category(
        &self,
        name: &str,
        color: &str,
        image_url: &str,
    ) -> Result<Category, CatalogError> {
        Ok(self.categories.create(name, color, image_url).await?)
    }

    /// Create a product with its initial option.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::CategoryNotFound` if the category is
    /// unresolved and `CatalogError::InvalidInput` for a negative option
    /// quantity.
    pub async fn create_product(
        &self,
        name: &str,
        price: Price,
        image_url: &str,
        category_id: CategoryId,
        option_name: &str,
        option_quantity: i64,
    ) -> Result<Product, CatalogError> {
        if option_quantity < 0 {
            return Err(CatalogError::InvalidInput(
                "option quantity cannot be negative".to_owned(),
            ));
        }

        self.resolve_category(category_id).await?;

        Ok(self
            .products
            .create_with_option(name, price, image_url, category_id, option_name, option_quantity)
            .await?)
    }

    /// Get a product by id.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::ProductNotFound` if absent.
    pub async fn get_product(&self, id: ProductId) -> Result<Product, CatalogError> {
        self.products
            .get_by_id(id)
            .await?
            .ok_or(CatalogError::ProductNotFound)
    }

    /// Update a product in place, re-resolving its category.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::CategoryNotFound` / `ProductNotFound` when a
    /// reference is unresolved.
    pub async fn update_product(
        &self,
        id: ProductId,
        name: &str,
        price: Price,
        image_url: &str,
        category_id: CategoryId,
    ) -> Result<Product, CatalogError> {
        self.resolve_category(category_id).await?;

        self.products
            .update(id, name, price, image_url, category_id)
            .await
            .map_err(|e| match e {
                RepositoryError::NotFound => CatalogError::ProductNotFound,
                other => CatalogError::Repository(other),
            })
    }

    /// Delete a product; its options cascade.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::ProductNotFound` if absent.
    pub async fn delete_product(&self, id: ProductId) -> Result<(), CatalogError> {
        self.products.delete(id).await.map_err(|e| match e {
            RepositoryError::NotFound => CatalogError::ProductNotFound,
            other => CatalogError::Repository(other),
        })
    }

    /// List one page of products.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Repository` if the query fails.
    pub async fn list_products(
        &self,
        request: PageRequest,
        sort_key: ProductSortKey,
        direction: SortDirection,
    ) -> Result<Page<Product>, CatalogError> {
        Ok(self.products.list_page(request, sort_key, direction).await?)
    }

    /// List a product's options.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::ProductNotFound` if the product is unresolved.
    pub async fn list_options(&self, product_id: ProductId) -> Result<Vec<ProductOption>, CatalogError> {
        self.get_product(product_id).await?;
        Ok(self.options.list_by_product(product_id).await?)
    }

    /// Add an option to a product.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::ProductNotFound` if the product is unresolved
    /// and `CatalogError::InvalidInput` for a negative quantity.
    pub async fn add_option(
        &self,
        product_id: ProductId,
        name: &str,
        quantity: i64,
    ) -> Result<ProductOption, CatalogError> {
        if quantity < 0 {
            return Err(CatalogError::InvalidInput(
                "option quantity cannot be negative".to_owned(),
            ));
        }
        self.get_product(product_id).await?;
        Ok(self.options.create(product_id, name, quantity).await?)
    }

    /// Replace an option's name and quantity.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::OptionNotFound` if absent and
    /// `CatalogError::InvalidInput` for a negative quantity.
    pub async fn update_option(
        &self,
        id: OptionId,
        name: &str,
        quantity: i64,
    ) -> Result<ProductOption, CatalogError> {
        if quantity < 0 {
            return Err(CatalogError::InvalidInput(
                "option quantity cannot be negative".to_owned(),
            ));
        }
        self.options.update(id, name, quantity).await.map_err(|e| match e {
            RepositoryError::NotFound => CatalogError::OptionNotFound,
            other => CatalogError::Repository(other),
        })
    }

    async fn resolve_category(&self, id: CategoryId) -> Result<Category, CatalogError> {
        self.categories
            .get_by_id(id)
            .await?
            .ok_or(CatalogError::CategoryNotFound)
    }
}
