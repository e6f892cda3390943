//! Server-rendered view routes.
//!
//! The product, join, and login pages are public; the wishlist page sits
//! behind the auth gateway and renders the caller's own wishes.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
};

use crate::{
    db::{ProductSortKey, WishSortKey},
    error::AppError,
    models::{CurrentMember, Product, WishView},
    routes::PageQuery,
    services::{CatalogService, WishlistService},
    state::AppState,
};

/// Product listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "products.html")]
pub struct ProductsTemplate {
    pub products: Vec<Product>,
    pub page: u32,
    pub total_pages: u64,
}

/// Join page template.
#[derive(Template, WebTemplate)]
#[template(path = "join.html")]
pub struct JoinTemplate {}

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "login.html")]
pub struct LoginTemplate {}

/// Wishlist page template.
#[derive(Template, WebTemplate)]
#[template(path = "wishes.html")]
pub struct WishesTemplate {
    pub email: String,
    pub wishes: Vec<WishView>,
}

/// `GET /view/products` - public product listing page.
pub async fn products_page(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<impl IntoResponse, AppError> {
    let (sort_key, direction) = query.sort_parts();
    let sort_key = sort_key.map_or(ProductSortKey::Id, ProductSortKey::parse_or_default);

    let catalog = CatalogService::new(state.pool());
    let page = catalog
        .list_products(query.page_request(), sort_key, direction)
        .await?;

    Ok(ProductsTemplate {
        page: page.page,
        total_pages: page.total_pages(),
        products: page.content,
    })
}

/// `GET /view/join` - public join page.
pub async fn join_page() -> JoinTemplate {
    JoinTemplate {}
}

/// `GET /view/login` - public login page.
pub async fn login_page() -> LoginTemplate {
    LoginTemplate {}
}

/// `GET /view/wishes` - the caller's wishlist page.
pub async fn wishes_page(
    State(state): State<AppState>,
    member: CurrentMember,
) -> Result<impl IntoResponse, AppError> {
    let wishlist = WishlistService::new(state.pool());
    let page = wishlist
        .list_wishes(
            member.id,
            giftwise_core::PageRequest::default(),
            WishSortKey::CreatedAt,
            giftwise_core::SortDirection::Desc,
        )
        .await?;

    Ok(WishesTemplate {
        email: member.email.to_string(),
        wishes: page.content,
    })
}
