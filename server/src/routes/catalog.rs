//! Storefront catalog routes.

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use catalog_engine::ProductId;

use crate::error::Result;
use crate::handlers::{
    handle_home, handle_product_detail, handle_shop, HomeResponse, ProductDetailResponse,
    ShopQuery, ShopResponse,
};
use crate::AppState;

/// Create catalog routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/catalog/home", get(home_handler))
        .route("/catalog/shop", get(shop_handler))
        .route("/catalog/products/{id}", get(product_handler))
}

/// GET /catalog/home
async fn home_handler(State(state): State<AppState>) -> Result<Json<HomeResponse>> {
    Ok(Json(handle_home(&state).await?))
}

/// GET /catalog/shop - Filtered, paginated shop listing.
async fn shop_handler(
    State(state): State<AppState>,
    Query(query): Query<ShopQuery>,
) -> Result<Json<ShopResponse>> {
    Ok(Json(handle_shop(&state, query).await?))
}

/// GET /catalog/products/{id}
async fn product_handler(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<ProductDetailResponse>> {
    Ok(Json(handle_product_detail(&state, id).await?))
}
