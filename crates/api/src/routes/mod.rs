//! HTTP route handlers for the Giftwise API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                     - Liveness check
//! GET  /health/ready               - Readiness check (DB ping)
//!
//! # Membership & auth (public)
//! POST /api/members/register       - Register, returns token
//! POST /api/members/login          - Login, returns token
//! GET  /api/oauth2/kakao           - Kakao OAuth callback, returns token
//!
//! # Catalog
//! GET  /api/categories             - List categories
//! POST /api/categories             - Create category
//! GET  /api/products               - Paginated product listing
//! POST /api/products               - Create product (with initial option)
//! GET  /api/products/{id}          - Product detail
//! PUT  /api/products/{id}          - Update product
//! DELETE /api/products/{id}        - Delete product (options cascade)
//! GET  /api/products/{id}/options  - List options
//! POST /api/products/{id}/options  - Add option
//! PUT  /api/options/{id}           - Update option
//!
//! # Wishlist (token-gated)
//! GET  /api/wishes                 - Paginated wish listing for the caller
//! POST /api/wishes                 - Create wish
//! PUT  /api/wishes/{id}            - Update quantity (zero deletes)
//! DELETE /api/wishes/{id}          - Delete wish
//!
//! # Ordering (token-gated)
//! POST /api/orders                 - Place order
//!
//! # Views
//! GET  /view/products              - Public product listing page
//! GET  /view/join                  - Public join page
//! GET  /view/login                 - Public login page
//! GET  /view/wishes                - Wishlist page (token-gated)
//! ```

pub mod categories;
pub mod members;
pub mod oauth;
pub mod orders;
pub mod products;
pub mod views;
pub mod wishes;

use axum::{
    Router,
    routing::{get, post, put},
};
use serde::Deserialize;

use giftwise_core::{PageRequest, SortDirection};

use crate::state::AppState;

/// Pagination query parameters shared by every listing endpoint.
///
/// `sort` takes the form `key` or `key,direction` (e.g. `price,desc`);
/// unspecified sort defaults to natural id-ascending order.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    /// 0-based page index.
    pub page: Option<u32>,
    /// Page size, clamped server-side.
    pub size: Option<u32>,
    /// Sort specification, `key[,asc|desc]`.
    pub sort: Option<String>,
}

impl PageQuery {
    /// The validated page request.
    #[must_use]
    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(
            self.page.unwrap_or(0),
            self.size.unwrap_or(giftwise_core::page::DEFAULT_PAGE_SIZE),
        )
    }

    /// The sort key and direction parts, both may be absent.
    #[must_use]
    pub fn sort_parts(&self) -> (Option<&str>, SortDirection) {
        match self.sort.as_deref() {
            None => (None, SortDirection::Asc),
            Some(spec) => match spec.split_once(',') {
                Some((key, dir)) => (Some(key), SortDirection::parse_or_default(dir)),
                None => (Some(spec), SortDirection::Asc),
            },
        }
    }
}

/// Create the membership/auth routes router.
pub fn member_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(members::register))
        .route("/login", post(members::login))
}

/// Create the category routes router.
pub fn category_routes() -> Router<AppState> {
    Router::new().route("/", get(categories::index).post(categories::create))
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index).post(products::create))
        .route(
            "/{id}",
            get(products::show)
                .put(products::update)
                .delete(products::delete),
        )
        .route(
            "/{id}/options",
            get(products::list_options).post(products::add_option),
        )
}

/// Create the wish routes router.
pub fn wish_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(wishes::index).post(wishes::create))
        .route("/{id}", put(wishes::update).delete(wishes::delete))
}

/// Create the view routes router.
pub fn view_routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(views::products_page))
        .route("/join", get(views::join_page))
        .route("/login", get(views::login_page))
        .route("/wishes", get(views::wishes_page))
}

/// Create all routes for the API.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/api/members", member_routes())
        .route("/api/oauth2/kakao", get(oauth::kakao_callback))
        .nest("/api/categories", category_routes())
        .nest("/api/products", product_routes())
        .route("/api/options/{id}", put(products::update_option))
        .nest("/api/wishes", wish_routes())
        .route("/api/orders", post(orders::create))
        .nest("/view", view_routes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_parts_splits_key_and_direction() {
        let query = PageQuery {
            sort: Some("price,desc".to_owned()),
            ..PageQuery::default()
        };
        let (key, dir) = query.sort_parts();
        assert_eq!(key, Some("price"));
        assert_eq!(dir, SortDirection::Desc);
    }

    #[test]
    fn test_sort_defaults_to_ascending() {
        let query = PageQuery {
            sort: Some("name".to_owned()),
            ..PageQuery::default()
        };
        let (key, dir) = query.sort_parts();
        assert_eq!(key, Some("name"));
        assert_eq!(dir, SortDirection::Asc);

        let empty = PageQuery::default();
        assert_eq!(empty.sort_parts(), (None, SortDirection::Asc));
    }

    #[test]
    fn test_page_request_defaults() {
        let query = PageQuery::default();
        let request = query.page_request();
        assert_eq!(request.page(), 0);
        assert_eq!(request.size(), giftwise_core::page::DEFAULT_PAGE_SIZE);
    }
}
