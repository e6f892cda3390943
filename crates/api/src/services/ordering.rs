//! Ordering service.
//!
//! Converts an option selection into an order: resolve the buyer, validate
//! the quantity, then hand off to the order repository which decrements
//! inventory and persists the order in one transaction.

use sqlx::PgPool;
use thiserror::Error;

use giftwise_core::{MemberId, OptionId};

use crate::db::{MemberRepository, OptionRepository, OrderRepository, RepositoryError};
use crate::models::Order;
use crate::models::order::{MAX_ORDER_QUANTITY, MIN_ORDER_QUANTITY, quantity_in_range};

/// Errors that can occur when placing an order.
#[derive(Debug, Error)]
pub enum OrderError {
    /// The buyer does not exist.
    #[error("member not found")]
    MemberNotFound,

    /// The ordered option does not exist.
    #[error("option not found")]
    OptionNotFound,

    /// The quantity is outside `1..=100_000_000`.
    #[error("quantity must be between {MIN_ORDER_QUANTITY} and {MAX_ORDER_QUANTITY}")]
    InvalidQuantity,

    /// The option holds less stock than requested.
    #[error("insufficient quantity")]
    InsufficientQuantity,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Ordering service over the member, option, and order repositories.
pub struct OrderingService<'a> {
    members: MemberRepository<'a>,
    options: OptionRepository<'a>,
    orders: OrderRepository<'a>,
}

impl<'a> OrderingService<'a> {
    /// Create a new ordering service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            members: MemberRepository::new(pool),
            options: OptionRepository::new(pool),
            orders: OrderRepository::new(pool),
        }
    }

    /// Place an order.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::MemberNotFound` / `OptionNotFound` when a
    /// reference is unresolved, `OrderError::InvalidQuantity` for an
    /// out-of-range quantity, and `OrderError::InsufficientQuantity` when
    /// inventory cannot cover the order. No partial effects remain on error.
    pub async fn place_order(
        &self,
        buyer: MemberId,
        option_id: OptionId,
        quantity: i64,
        message: Option<&str>,
    ) -> Result<Order, OrderError> {
        self.members
            .get_by_id(buyer)
            .await?
            .ok_or(OrderError::MemberNotFound)?;

        // Resolve the option before validating the quantity: an unknown
        // option reports OptionNotFound even for an out-of-range amount.
        self.options
            .get_by_id(option_id)
            .await?
            .ok_or(OrderError::OptionNotFound)?;

        if !quantity_in_range(quantity) {
            return Err(OrderError::InvalidQuantity);
        }

        self.orders
            .place(buyer, option_id, quantity, message)
            .await
            .map_err(|e| match e {
                RepositoryError::NotFound => OrderError::OptionNotFound,
                RepositoryError::InsufficientQuantity => OrderError::InsufficientQuantity,
                other => OrderError::Repository(other),
            })
    }
}
