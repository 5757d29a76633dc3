//! Admin routes.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use catalog_engine::{Category, Product, ProductDraft, ProductId, ProductPatch};

use crate::error::Result;
use crate::handlers::{
    handle_admin_products, handle_categories, handle_create, handle_delete, handle_edit,
    handle_stats, AdminProductsResponse, DeleteResponse, StatsResponse,
};
use crate::AppState;

/// Create admin routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/admin/products", get(list_handler).post(create_handler))
        .route("/admin/products/{id}", put(edit_handler).delete(delete_handler))
        .route("/admin/stats", get(stats_handler))
        .route("/admin/categories", get(categories_handler))
}

/// GET /admin/products - Unfiltered catalog with origins.
async fn list_handler(State(state): State<AppState>) -> Result<Json<AdminProductsResponse>> {
    Ok(Json(handle_admin_products(&state).await?))
}

/// POST /admin/products - Create a local product.
async fn create_handler(
    State(state): State<AppState>,
    Json(draft): Json<ProductDraft>,
) -> Result<(StatusCode, Json<Product>)> {
    let product = handle_create(&state, draft).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// PUT /admin/products/{id} - Edit a remote or local product.
async fn edit_handler(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
    Json(patch): Json<ProductPatch>,
) -> Result<Json<Product>> {
    Ok(Json(handle_edit(&state, id, patch).await?))
}

/// DELETE /admin/products/{id}
async fn delete_handler(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<DeleteResponse>> {
    Ok(Json(handle_delete(&state, id).await?))
}

/// GET /admin/stats
async fn stats_handler(State(state): State<AppState>) -> Result<Json<StatsResponse>> {
    Ok(Json(handle_stats(&state).await?))
}

/// GET /admin/categories
async fn categories_handler(State(state): State<AppState>) -> Result<Json<Vec<Category>>> {
    Ok(Json(handle_categories(&state).await?))
}
