//! Category routes.

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Deserialize;

use crate::{error::AppError, services::CatalogService, state::AppState};

#[derive(Debug, Deserialize)]
pub struct CreateCategoryRequest {
    pub name: String,
    pub color: String,
    pub image_url: String,
}

/// `GET /api/categories` - list every category.
pub async fn index(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let catalog = CatalogService::new(state.pool());
    let categories = catalog.list_categories().await?;
    Ok(Json(categories))
}

/// `POST /api/categories` - create a category.
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreateCategoryRequest>,
) -> Result<impl IntoResponse, AppError> {
    let catalog = CatalogService::new(state.pool());
    let category = catalog
        .create_category(&payload.name, &payload.color, &payload.image_url)
        .await?;
    Ok((StatusCode::CREATED, Json(category)))
}
