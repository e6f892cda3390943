//! Product and option routes.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;

use giftwise_core::{CategoryId, OptionId, Price, ProductId};

use crate::{
    db::ProductSortKey,
    error::AppError,
    routes::PageQuery,
    services::CatalogService,
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    pub price: i64,
    pub image_url: String,
    pub category_id: CategoryId,
    pub option_name: String,
    pub option_quantity: i64,
}

#[derive(Debug, Deserialize)]
pub struct UpdateProductRequest {
    pub name: String,
    pub price: i64,
    pub image_url: String,
    pub category_id: CategoryId,
}

#[derive(Debug, Deserialize)]
pub struct CreateOptionRequest {
    pub name: String,
    pub quantity: i64,
}

fn parse_price(amount: i64) -> Result<Price, AppError> {
    Price::new(amount).map_err(|e| AppError::InvalidInput(e.to_string()))
}

/// `GET /api/products` - one page of products.
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<impl IntoResponse, AppError> {
    let (sort_key, direction) = query.sort_parts();
    let sort_key = sort_key.map_or(ProductSortKey::Id, ProductSortKey::parse_or_default);

    let catalog = CatalogService::new(state.pool());
    let page = catalog
        .list_products(query.page_request(), sort_key, direction)
        .await?;
    Ok(Json(page))
}

/// `POST /api/products` - create a product with its initial option.
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreateProductRequest>,
) -> Result<impl IntoResponse, AppError> {
    let price = parse_price(payload.price)?;

    let catalog = CatalogService::new(state.pool());
    let product = catalog
        .create_product(
            &payload.name,
            price,
            &payload.image_url,
            payload.category_id,
            &payload.option_name,
            payload.option_quantity,
        )
        .await?;

    tracing::info!(product_id = %product.id, "product created");

    Ok((StatusCode::CREATED, Json(product)))
}

/// `GET /api/products/{id}` - product detail.
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<impl IntoResponse, AppError> {
    let catalog = CatalogService::new(state.pool());
    let product = catalog.get_product(id).await?;
    Ok(Json(product))
}

/// `PUT /api/products/{id}` - replace a product's fields.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
    Json(payload): Json<UpdateProductRequest>,
) -> Result<impl IntoResponse, AppError> {
    let price = parse_price(payload.price)?;

    let catalog = CatalogService::new(state.pool());
    let product = catalog
        .update_product(id, &payload.name, price, &payload.image_url, payload.category_id)
        .await?;
    Ok(Json(product))
}

/// `DELETE /api/products/{id}` - delete a product, cascading its options.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<impl IntoResponse, AppError> {
    let catalog = CatalogService::new(state.pool());
    catalog.delete_product(id).await?;

    tracing::info!(product_id = %id, "product deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// `GET /api/products/{id}/options` - list a product's options.
pub async fn list_options(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<impl IntoResponse, AppError> {
    let catalog = CatalogService::new(state.pool());
    let options = catalog.list_options(id).await?;
    Ok(Json(options))
}

/// `POST /api/products/{id}/options` - add an option to a product.
pub async fn add_option(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
    Json(payload): Json<CreateOptionRequest>,
) -> Result<impl IntoResponse, AppError> {
    let catalog = CatalogService::new(state.pool());
    let option = catalog.add_option(id, &payload.name, payload.quantity).await?;
    Ok((StatusCode::CREATED, Json(option)))
}

/// `PUT /api/options/{id}` - replace an option's name and quantity.
pub async fn update_option(
    State(state): State<AppState>,
    Path(id): Path<OptionId>,
    Json(payload): Json<CreateOptionRequest>,
) -> Result<impl IntoResponse, AppError> {
    let catalog = CatalogService::new(state.pool());
    let option = catalog
        .update_option(id, &payload.name, payload.quantity)
        .await?;
    Ok(Json(option))
}
