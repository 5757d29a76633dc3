//! Cart routes.

use axum::{
    extract::{Path, State},
    routing::{get, patch, post},
    Json, Router,
};
use catalog_engine::{CheckoutSummary, ProductId};

use crate::error::Result;
use crate::handlers::{
    handle_add_item, handle_change_quantity, handle_checkout, handle_clear_cart,
    handle_get_cart, handle_remove_item, AddToCartRequest, CartResponse, ChangeQuantityRequest,
};
use crate::AppState;

/// Create cart routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/cart", get(get_handler).delete(clear_handler))
        .route("/cart/items", post(add_handler))
        .route("/cart/items/{id}", patch(change_handler).delete(remove_handler))
        .route("/cart/checkout", post(checkout_handler))
}

async fn get_handler(State(state): State<AppState>) -> Result<Json<CartResponse>> {
    Ok(Json(handle_get_cart(&state).await?))
}

/// POST /cart/items - Add one unit of a product.
async fn add_handler(
    State(state): State<AppState>,
    Json(request): Json<AddToCartRequest>,
) -> Result<Json<CartResponse>> {
    Ok(Json(handle_add_item(&state, request).await?))
}

/// PATCH /cart/items/{id} - Change a quantity by a signed delta.
async fn change_handler(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
    Json(request): Json<ChangeQuantityRequest>,
) -> Result<Json<CartResponse>> {
    Ok(Json(handle_change_quantity(&state, id, request).await?))
}

async fn remove_handler(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<CartResponse>> {
    Ok(Json(handle_remove_item(&state, id).await?))
}

async fn clear_handler(State(state): State<AppState>) -> Result<Json<CartResponse>> {
    Ok(Json(handle_clear_cart(&state).await?))
}

/// POST /cart/checkout - Simulated checkout.
async fn checkout_handler(State(state): State<AppState>) -> Result<Json<CheckoutSummary>> {
    Ok(Json(handle_checkout(&state).await?))
}
