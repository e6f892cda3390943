//! Wishlist routes. Every handler runs behind the auth gateway, so the
//! caller arrives as a [`CurrentMember`] in the request extensions.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};

use giftwise_core::{ProductId, WishId};

use crate::{
    db::WishSortKey,
    error::AppError,
    models::{CurrentMember, Wish},
    routes::PageQuery,
    services::WishlistService,
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct CreateWishRequest {
    pub product_id: ProductId,
    pub quantity: i64,
}

#[derive(Debug, Deserialize)]
pub struct UpdateWishRequest {
    pub quantity: i64,
}

/// Outcome of a quantity update. A zero-or-below quantity deletes the wish,
/// in which case `wish` is absent and `deleted` is set.
#[derive(Debug, Serialize)]
pub struct UpdateWishResponse {
    pub wish: Option<Wish>,
    pub deleted: bool,
}

/// `GET /api/wishes` - one page of the caller's wishes.
pub async fn index(
    State(state): State<AppState>,
    member: CurrentMember,
    Query(query): Query<PageQuery>,
) -> Result<impl IntoResponse, AppError> {
    let (sort_key, direction) = query.sort_parts();
    let sort_key = sort_key.map_or(WishSortKey::Id, WishSortKey::parse_or_default);

    let wishlist = WishlistService::new(state.pool());
    let page = wishlist
        .list_wishes(member.id, query.page_request(), sort_key, direction)
        .await?;
    Ok(Json(page))
}

/// `POST /api/wishes` - add a product to the caller's wishlist.
pub async fn create(
    State(state): State<AppState>,
    member: CurrentMember,
    Json(payload): Json<CreateWishRequest>,
) -> Result<impl IntoResponse, AppError> {
    let wishlist = WishlistService::new(state.pool());
    let wish = wishlist
        .create_wish(member.id, payload.product_id, payload.quantity)
        .await?;

    tracing::info!(wish_id = %wish.id, member_id = %member.id, "wish created");

    Ok((StatusCode::CREATED, Json(wish)))
}

/// `PUT /api/wishes/{id}` - set a wish's quantity; zero or below deletes it.
pub async fn update(
    State(state): State<AppState>,
    member: CurrentMember,
    Path(id): Path<WishId>,
    Json(payload): Json<UpdateWishRequest>,
) -> Result<impl IntoResponse, AppError> {
    let wishlist = WishlistService::new(state.pool());
    let wish = wishlist
        .update_quantity(id, member.id, payload.quantity)
        .await?;

    let deleted = wish.is_none();
    Ok(Json(UpdateWishResponse { wish, deleted }))
}

/// `DELETE /api/wishes/{id}` - remove a wish from the caller's wishlist.
pub async fn delete(
    State(state): State<AppState>,
    member: CurrentMember,
    Path(id): Path<WishId>,
) -> Result<impl IntoResponse, AppError> {
    let wishlist = WishlistService::new(state.pool());
    wishlist.delete_wish(id, member.id).await?;
    Ok(StatusCode::NO_CONTENT)
}
