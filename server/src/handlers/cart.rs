//! Cart endpoints and checkout simulation.

use catalog_engine::{Cart, CartItem, CheckoutSummary, Error as EngineError, ProductId};
use serde::{Deserialize, Serialize};

use super::resolve_one;
use crate::error::{AppError, Result};
use crate::storage;
use crate::AppState;

/// Cart contents with totals.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<CartItem>,
    pub count: u64,
    pub total: f64,
}

impl From<&Cart> for CartResponse {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart.items().to_vec(),
            count: cart.count(),
            total: cart.total(),
        }
    }
}

/// Request body for adding to the cart.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
    pub product_id: ProductId,
}

/// Request body for changing a quantity.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeQuantityRequest {
    /// Signed delta; the quantity never drops below one
    pub change: i64,
}

pub async fn handle_get_cart(state: &AppState) -> Result<CartResponse> {
    let cart = storage::load_cart(state.slots.as_ref()).await?;
    Ok(CartResponse::from(&cart))
}

/// Add one unit of a product, resolved through the overlay.
pub async fn handle_add_item(state: &AppState, request: AddToCartRequest) -> Result<CartResponse> {
    let _guard = state.mutation_lock.lock().await;

    let overlay = storage::load_overlay(state.slots.as_ref()).await?;
    let product = resolve_one(&overlay, state.catalog.as_ref(), request.product_id).await?;

    let mut cart = storage::load_cart(state.slots.as_ref()).await?;
    cart.add(product);
    storage::save_cart(state.slots.as_ref(), &cart).await?;

    Ok(CartResponse::from(&cart))
}

pub async fn handle_change_quantity(
    state: &AppState,
    id: ProductId,
    request: ChangeQuantityRequest,
) -> Result<CartResponse> {
    let _guard = state.mutation_lock.lock().await;

    let mut cart = storage::load_cart(state.slots.as_ref()).await?;
    cart.change_quantity(id, request.change)?;
    storage::save_cart(state.slots.as_ref(), &cart).await?;

    Ok(CartResponse::from(&cart))
}

pub async fn handle_remove_item(state: &AppState, id: ProductId) -> Result<CartResponse> {
    let _guard = state.mutation_lock.lock().await;

    let mut cart = storage::load_cart(state.slots.as_ref()).await?;
    cart.remove(id).ok_or(EngineError::CartItemNotFound(id))?;
    storage::save_cart(state.slots.as_ref(), &cart).await?;

    Ok(CartResponse::from(&cart))
}

pub async fn handle_clear_cart(state: &AppState) -> Result<CartResponse> {
    let _guard = state.mutation_lock.lock().await;

    let mut cart = storage::load_cart(state.slots.as_ref()).await?;
    cart.clear();
    storage::save_cart(state.slots.as_ref(), &cart).await?;

    Ok(CartResponse::from(&cart))
}

/// Simulated checkout: report the totals and empty the cart.
pub async fn handle_checkout(state: &AppState) -> Result<CheckoutSummary> {
    let _guard = state.mutation_lock.lock().await;

    let mut cart = storage::load_cart(state.slots.as_ref()).await?;
    if cart.is_empty() {
        return Err(AppError::BadRequest("cart is empty".to_string()));
    }

    let summary = cart.checkout();
    storage::save_cart(state.slots.as_ref(), &cart).await?;

    tracing::info!(count = summary.count, total = summary.total, "Checked out");
    Ok(summary)
}
