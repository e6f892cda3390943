//! Domain models for the Giftwise API.
//!
//! These types represent validated domain objects separate from database row
//! types; repositories convert rows into them via `TryFrom`.

pub mod catalog;
pub mod member;
pub mod order;
pub mod wish;

pub use catalog::{Category, Product, ProductOption};
pub use member::{CurrentMember, Member};
pub use order::Order;
pub use wish::{Wish, WishView};
