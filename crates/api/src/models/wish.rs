//! Wishlist domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use giftwise_core::{MemberId, Price, ProductId, WishId};

/// A member's saved intent to acquire a quantity of a product.
///
/// At most one wish exists per (member, product) pair; an update that drives
/// the quantity to zero or below deletes the wish instead.
#[derive(Debug, Clone, Serialize)]
pub struct Wish {
    /// Unique wish ID.
    pub id: WishId,
    /// Owning member.
    pub member_id: MemberId,
    /// Target product.
    pub product_id: ProductId,
    /// Desired quantity, always `> 0` while the wish exists.
    pub quantity: i64,
    /// When the wish was created.
    pub created_at: DateTime<Utc>,
}

/// A wish joined with its product for listings.
///
/// Projected in a single query so paginated listings do not perform per-row
/// product lookups.
#[derive(Debug, Clone, Serialize)]
pub struct WishView {
    /// Unique wish ID.
    pub id: WishId,
    /// Target product.
    pub product_id: ProductId,
    /// Product display name.
    pub product_name: String,
    /// Product price.
    pub product_price: Price,
    /// Product image reference.
    pub product_image_url: String,
    /// Desired quantity.
    pub quantity: i64,
    /// When the wish was created.
    pub created_at: DateTime<Utc>,
}
