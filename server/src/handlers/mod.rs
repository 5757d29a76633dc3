//! Request handlers.
//!
//! Handlers load the overlay and cart from the slot store, fetch the remote
//! catalog, and run the engine. Mutating handlers hold the state's mutation
//! lock from load to persist.

mod admin;
mod cart;
mod catalog;

pub use admin::*;
pub use cart::*;
pub use catalog::*;

use catalog_engine::{OverlayState, Product, ProductId};
use serde::Serialize;

use crate::catalog::CatalogSource;
use crate::error::Result;

/// Outcome of the remote fetch reported alongside catalog views.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum RemoteStatus {
    Ok,
    Unavailable { error: String },
}

/// Fetch the remote list for a view.
///
/// A failed fetch is logged once and yields an empty list, so overrides
/// still resolve.
async fn fetch_remote(catalog: &dyn CatalogSource) -> (Vec<Product>, RemoteStatus) {
    match catalog.products().await {
        Ok(products) => (products, RemoteStatus::Ok),
        Err(e) => {
            tracing::warn!("Remote catalog unavailable: {}", e);
            (
                Vec::new(),
                RemoteStatus::Unavailable {
                    error: e.to_string(),
                },
            )
        }
    }
}

/// Resolve a single id through the overlay.
///
/// The upstream is only asked when the overlay has no say on the id.
async fn resolve_one(
    overlay: &OverlayState,
    catalog: &dyn CatalogSource,
    id: ProductId,
) -> Result<Product> {
    let remote = if overlay.is_known(id) {
        None
    } else {
        catalog.product(id).await?
    };

    Ok(overlay.lookup(id, remote.as_ref())?.clone())
}

/// Milliseconds since the epoch, for local id allocation.
fn now_millis() -> u64 {
    u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or_default()
}
