//! Ordering routes.

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Deserialize;

use giftwise_core::OptionId;

use crate::{
    error::AppError,
    models::CurrentMember,
    services::OrderingService,
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct PlaceOrderRequest {
    pub option_id: OptionId,
    pub quantity: i64,
    pub message: Option<String>,
}

/// `POST /api/orders` - place an order against a product option.
///
/// Decrements the option's inventory and removes any wish the caller holds
/// for the ordered product, all inside one transaction.
pub async fn create(
    State(state): State<AppState>,
    member: CurrentMember,
    Json(payload): Json<PlaceOrderRequest>,
) -> Result<impl IntoResponse, AppError> {
    let ordering = OrderingService::new(state.pool());
    let order = ordering
        .place_order(
            member.id,
            payload.option_id,
            payload.quantity,
            payload.message.as_deref(),
        )
        .await?;

    tracing::info!(
        order_id = %order.id,
        member_id = %member.id,
        option_id = %payload.option_id,
        quantity = payload.quantity,
        "order placed"
    );

    Ok((StatusCode::CREATED, Json(order)))
}
