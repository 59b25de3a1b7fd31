//! Product API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use validator::Validate;

use shared::error::ApiError;
use shared::response::ApiResponse;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Product, ProductCategory, ProductCreate, ProductUpdate};
use crate::db::repository::ProductRepository;
use crate::db::repository::product::ProductFilter;
use crate::utils::AppResult;

/// Query params for the public catalog listing
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub category: Option<ProductCategory>,
    pub available: Option<bool>,
    pub search: Option<String>,
}

/// GET /api/products - list the catalog
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<ApiResponse<Vec<Product>>>> {
    let repo = ProductRepository::new(state.get_db());
    let products = repo
        .find_all(ProductFilter {
            category: query.category,
            available: query.available,
            search: query.search,
        })
        .await
        .map_err(ApiError::from)?;

    let count = products.len();
    Ok(Json(ApiResponse::ok_with_count(products, count)))
}

/// GET /api/products/category/:category - available products in a category
pub async fn list_by_category(
    State(state): State<ServerState>,
    Path(category): Path<ProductCategory>,
) -> AppResult<Json<ApiResponse<Vec<Product>>>> {
    let repo = ProductRepository::new(state.get_db());
    let products = repo
        .find_by_category(category)
        .await
        .map_err(ApiError::from)?;

    let count = products.len();
    Ok(Json(ApiResponse::ok_with_count(products, count)))
}

/// GET /api/products/:id - single product
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Product>>> {
    let repo = ProductRepository::new(state.get_db());
    let product = repo
        .find_by_id(&id)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::not_found("Product"))?;

    Ok(Json(ApiResponse::ok(product)))
}

/// POST /api/products - create a product
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<ProductCreate>,
) -> AppResult<(StatusCode, Json<ApiResponse<Product>>)> {
    payload
        .validate()
        .map_err(|e| ApiError::validation(e.to_string()))?;

    let repo = ProductRepository::new(state.get_db());
    let product = repo.create(payload).await.map_err(ApiError::from)?;

    tracing::info!(name = %product.name, by = %user.email, "Product created");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok_with_message(
            product,
            "Product created successfully",
        )),
    ))
}

/// PUT /api/products/:id - update a product
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<ProductUpdate>,
) -> AppResult<Json<ApiResponse<Product>>> {
    payload
        .validate()
        .map_err(|e| ApiError::validation(e.to_string()))?;

    let repo = ProductRepository::new(state.get_db());
    let product = repo.update(&id, payload).await.map_err(ApiError::from)?;

    tracing::info!(name = %product.name, by = %user.email, "Product updated");

    Ok(Json(ApiResponse::ok_with_message(
        product,
        "Product updated successfully",
    )))
}

/// DELETE /api/products/:id - delete a product
pub async fn remove(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<()>>> {
    let repo = ProductRepository::new(state.get_db());
    repo.delete(&id).await.map_err(ApiError::from)?;

    tracing::info!(id = %id, by = %user.email, "Product deleted");

    Ok(Json(ApiResponse::message_only("Product deleted successfully")))
}
