//! Catalog domain types: categories, products, and their options.

use serde::Serialize;

use giftwise_core::{CategoryId, OptionId, Price, ProductId};

/// A product category.
#[derive(Debug, Clone, Serialize)]
pub struct Category {
    /// Unique category ID.
    pub id: CategoryId,
    /// Display name.
    pub name: String,
    /// Display color (hex string, e.g. `#6c95d1`).
    pub color: String,
    /// Image reference.
    pub image_url: String,
}

/// A product. Always references exactly one existing category.
#[derive(Debug, Clone, Serialize)]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Non-negative price.
    pub price: Price,
    /// Image reference.
    pub image_url: String,
    /// Owning category.
    pub category_id: CategoryId,
}

/// A purchasable variant of a product carrying its own inventory quantity.
///
/// Quantity never goes negative: it is only decremented through the
/// conditional update in the option repository.
#[derive(Debug, Clone, Serialize)]
pub struct ProductOption {
    /// Unique option ID.
    pub id: OptionId,
    /// Variant name (e.g. "Large", "Red").
    pub name: String,
    /// Remaining inventory, `>= 0`.
    pub quantity: i64,
    /// Owning product.
    pub product_id: ProductId,
}
