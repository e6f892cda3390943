//! Order domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use giftwise_core::{MemberId, OptionId, OrderId, ProductId};

/// Smallest quantity a single order may carry.
pub const MIN_ORDER_QUANTITY: i64 = 1;

/// Largest quantity a single order may carry.
pub const MAX_ORDER_QUANTITY: i64 = 100_000_000;

/// A placed order.
///
/// Holds non-owning references to the buyer, the ordered option, and its
/// product; deleting any of those does not erase order history.
#[derive(Debug, Clone, Serialize)]
pub struct Order {
    /// Unique order ID.
    pub id: OrderId,
    /// The buyer.
    pub member_id: MemberId,
    /// The ordered option.
    pub option_id: OptionId,
    /// The option's product at order time.
    pub product_id: ProductId,
    /// Ordered quantity, within `1..=100_000_000`.
    pub quantity: i64,
    /// Optional gift message.
    pub message: Option<String>,
    /// When the order was placed.
    pub created_at: DateTime<Utc>,
}

/// Whether `quantity` is inside the allowed order range.
#[must_use]
pub const fn quantity_in_range(quantity: i64) -> bool {
    MIN_ORDER_QUANTITY <= quantity && quantity <= MAX_ORDER_QUANTITY
}
