//! Service layer: transactional use cases over the repositories.
//!
//! Services are constructed per request from `&PgPool` (constructor
//! injection, no framework magic) and raise typed errors that the boundary
//! layer translates to status codes.

pub mod auth;
pub mod catalog;
pub mod kakao;
pub mod ordering;
pub mod wishlist;

pub use auth::{AuthError, AuthService};
pub use catalog::{CatalogError, CatalogService};
pub use kakao::{KakaoClient, KakaoError, KakaoProfile};
pub use ordering::{OrderError, OrderingService};
pub use wishlist::{WishError, WishlistService};
