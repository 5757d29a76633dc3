//! Admin views and product mutations.

use catalog_engine::{
    Category, DeleteEffect, Filters, Origin, Product, ProductDraft, ProductId, ProductPatch,
};
use serde::Serialize;

use super::{fetch_remote, now_millis, resolve_one, RemoteStatus};
use crate::error::{AppError, Result};
use crate::storage;
use crate::AppState;

/// A product in the admin list, tagged with where it came from.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminProduct {
    #[serde(flatten)]
    pub product: Product,
    pub origin: Origin,
}

/// Response for the admin product list.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminProductsResponse {
    pub products: Vec<AdminProduct>,
    pub remote: RemoteStatus,
}

/// Dashboard counters.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    /// Products in the unfiltered catalog
    pub product_count: usize,
    pub local_count: usize,
    pub deleted_count: usize,
    pub remote: RemoteStatus,
}

/// Response for a delete.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResponse {
    pub id: ProductId,
    pub effect: &'static str,
}

/// Every product the storefront could show, unfiltered.
pub async fn handle_admin_products(state: &AppState) -> Result<AdminProductsResponse> {
    let overlay = storage::load_overlay(state.slots.as_ref()).await?;
    let (remote, status) = fetch_remote(state.catalog.as_ref()).await;

    let catalog = overlay.resolve(&remote, Filters::admin());
    let products = catalog
        .entries()
        .map(|(origin, product)| AdminProduct {
            product: product.clone(),
            origin,
        })
        .collect();

    Ok(AdminProductsResponse {
        products,
        remote: status,
    })
}

pub async fn handle_stats(state: &AppState) -> Result<StatsResponse> {
    let overlay = storage::load_overlay(state.slots.as_ref()).await?;
    let (remote, status) = fetch_remote(state.catalog.as_ref()).await;

    Ok(StatsResponse {
        product_count: overlay.resolve(&remote, Filters::admin()).len(),
        local_count: overlay.overrides().len(),
        deleted_count: overlay.deleted().len(),
        remote: status,
    })
}

/// Upstream categories offered by the product form.
pub async fn handle_categories(state: &AppState) -> Result<Vec<Category>> {
    Ok(state.catalog.categories().await?)
}

/// Create a local product.
///
/// The draft's category is matched by id against the upstream categories and
/// falls back to the local category. The product is persisted before the
/// upstream is told about it; a failed upload is only logged.
pub async fn handle_create(state: &AppState, mut draft: ProductDraft) -> Result<Product> {
    let known = match state.catalog.categories().await {
        Ok(categories) => categories,
        Err(e) => {
            tracing::warn!("Upstream categories unavailable: {}", e);
            Vec::new()
        }
    };
    draft.resolve_category(&known);

    let product = {
        let _guard = state.mutation_lock.lock().await;

        let mut overlay = storage::load_overlay(state.slots.as_ref()).await?;
        let outcome = overlay.create(draft.clone(), now_millis())?;
        storage::save_overlay(state.slots.as_ref(), &overlay, outcome.changed).await?;
        outcome.value
    };

    tracing::info!(id = product.id, "Created local product");

    if let Err(e) = state.catalog.create_product(&draft).await {
        tracing::warn!(id = product.id, "Upstream upload failed: {}", e);
    }

    Ok(product)
}

/// Pin an edited copy of a product under its id.
pub async fn handle_edit(state: &AppState, id: ProductId, patch: ProductPatch) -> Result<Product> {
    if patch.is_empty() {
        return Err(AppError::BadRequest("patch changes no fields".to_string()));
    }

    let _guard = state.mutation_lock.lock().await;

    let mut overlay = storage::load_overlay(state.slots.as_ref()).await?;
    let base = resolve_one(&overlay, state.catalog.as_ref(), id).await?;
    let outcome = overlay.edit(&base, &patch)?;
    storage::save_overlay(state.slots.as_ref(), &overlay, outcome.changed).await?;

    tracing::info!(id, "Edited product");
    Ok(outcome.value)
}

/// Delete a product from every view.
pub async fn handle_delete(state: &AppState, id: ProductId) -> Result<DeleteResponse> {
    let _guard = state.mutation_lock.lock().await;

    let mut overlay = storage::load_overlay(state.slots.as_ref()).await?;
    let outcome = overlay.delete(id);
    storage::save_overlay(state.slots.as_ref(), &overlay, outcome.changed).await?;

    let effect = match outcome.value {
        DeleteEffect::RemovedOverride(_) => "removedOverride",
        DeleteEffect::Suppressed => "suppressed",
        DeleteEffect::AlreadyDeleted => "alreadyDeleted",
    };
    tracing::info!(id, effect, "Deleted product");

    Ok(DeleteResponse { id, effect })
}
