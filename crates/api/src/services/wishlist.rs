//! Wishlist service.
//!
//! Per (member, product) pair a wish is either absent or active; an update
//! that drives the quantity to zero or below deletes it. Duplicate creation
//! is rejected with a conflict rather than upserted.

use sqlx::PgPool;
use thiserror::Error;

use giftwise_core::{MemberId, Page, PageRequest, ProductId, SortDirection, WishId};

use crate::db::wishes::WishSortKey;
use crate::db::{MemberRepository, ProductRepository, RepositoryError, WishRepository};
use crate::models::{Wish, WishView};

/// Errors that can occur during wishlist operations.
#[derive(Debug, Error)]
pub enum WishError {
    /// The wish does not exist.
    #[error("wish not found")]
    WishNotFound,

    /// The referenced product does not exist.
    #[error("product not found")]
    ProductNotFound,

    /// The referenced member does not exist.
    #[error("member not found")]
    MemberNotFound,

    /// The member already holds a wish for this product.
    #[error("wish already exists for this product")]
    DuplicateWish,

    /// The acting member does not own the wish.
    #[error("forbidden")]
    Forbidden,

    /// The initial quantity is not positive.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Wishlist service over the wish, product, and member repositories.
pub struct WishlistService<'a> {
    wishes: WishRepository<'a>,
    products: ProductRepository<'a>,
    members: MemberRepository<'a>,
}

impl<'a> WishlistService<'a> {
    /// Create a new wishlist service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            wishes: WishRepository::new(pool),
            products: ProductRepository::new(pool),
            members: MemberRepository::new(pool),
        }
    }

    /// Create a wish for a member and product.
    ///
    /// # Errors
    ///
    /// Returns `WishError::ProductNotFound` / `MemberNotFound` when a
    /// reference is unresolved, `WishError::InvalidInput` for a non-positive
    /// quantity, and `WishError::DuplicateWish` when the pair already has a
    /// wish.
    pub async fn create_wish(
        &self,
        member_id: MemberId,
        product_id: ProductId,
        quantity: i64,
    ) -> Result<Wish, WishError> {
        if quantity <= 0 {
            return Err(WishError::InvalidInput(
                "wish quantity must be positive".to_owned(),
            ));
        }

        self.products
            .get_by_id(product_id)
            .await?
            .ok_or(WishError::ProductNotFound)?;
        self.members
            .get_by_id(member_id)
            .await?
            .ok_or(WishError::MemberNotFound)?;

        self.wishes
            .create(member_id, product_id, quantity)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => WishError::DuplicateWish,
                other => WishError::Repository(other),
            })
    }

    /// Set a wish's quantity; zero or below deletes the wish.
    ///
    /// Returns the wish as it stands after the update, or `None` when the
    /// quantity transition removed it.
    ///
    /// # Errors
    ///
    /// Returns `WishError::WishNotFound` when the wish is unresolved and
    /// `WishError::Forbidden` when `actor` does not own it; a forbidden call
    /// never mutates state.
    pub async fn update_quantity(
        &self,
        wish_id: WishId,
        actor: MemberId,
        new_quantity: i64,
    ) -> Result<Option<Wish>, WishError> {
        let wish = self.owned_wish(wish_id, actor).await?;

        if new_quantity <= 0 {
            self.wishes.delete(wish.id).await?;
            return Ok(None);
        }

        Ok(Some(self.wishes.update_quantity(wish.id, new_quantity).await?))
    }

    /// Delete a wish.
    ///
    /// # Errors
    ///
    /// Returns `WishError::WishNotFound` / `Forbidden` under the same rules
    /// as [`Self::update_quantity`].
    pub async fn delete_wish(&self, wish_id: WishId, actor: MemberId) -> Result<(), WishError> {
        let wish = self.owned_wish(wish_id, actor).await?;
        Ok(self.wishes.delete(wish.id).await?)
    }

    /// List one page of a member's wishes joined with their products.
    ///
    /// An empty page is a valid result, never an error.
    ///
    /// # Errors
    ///
    /// Returns `WishError::Repository` if the query fails.
    pub async fn list_wishes(
        &self,
        member_id: MemberId,
        request: PageRequest,
        sort_key: WishSortKey,
        direction: SortDirection,
    ) -> Result<Page<WishView>, WishError> {
        Ok(self
            .wishes
            .list_page_by_member(member_id, request, sort_key, direction)
            .await?)
    }

    /// Resolve a wish and check ownership. The existence check runs first so
    /// an unknown wish reports `WishNotFound`, not `Forbidden`.
    async fn owned_wish(&self, wish_id: WishId, actor: MemberId) -> Result<Wish, WishError> {
        let wish = self
            .wishes
            .get_by_id(wish_id)
            .await?
            .ok_or(WishError::WishNotFound)?;

        if wish.member_id != actor {
            return Err(WishError::Forbidden);
        }
        Ok(wish)
    }
}
