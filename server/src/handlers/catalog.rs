//! Customer-facing catalog views.

use catalog_engine::{category, Filters, Origin, Product, ProductId, HOME_LIMIT};
use serde::{Deserialize, Serialize};

use super::{fetch_remote, resolve_one, RemoteStatus};
use crate::error::Result;
use crate::storage;
use crate::AppState;

/// Response for the home page.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeResponse {
    pub products: Vec<Product>,
    pub remote: RemoteStatus,
}

/// Query parameters for the shop.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopQuery {
    /// Category bucket, `All` when absent
    pub category: Option<String>,
    /// Free-text search on title and category
    pub search: Option<String>,
    pub offset: Option<usize>,
    /// Page size, everything when absent
    pub limit: Option<usize>,
}

/// Response for the shop.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopResponse {
    pub products: Vec<Product>,
    /// Matching products before pagination
    pub total: usize,
    /// `All` followed by every bucket in the unfiltered shop catalog
    pub categories: Vec<String>,
    pub remote: RemoteStatus,
}

/// Response for a product detail page.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetailResponse {
    pub product: Product,
    pub origin: Origin,
    pub related: Vec<Product>,
}

/// Home page: storefront filters, first [`HOME_LIMIT`] products.
pub async fn handle_home(state: &AppState) -> Result<HomeResponse> {
    let overlay = storage::load_overlay(state.slots.as_ref()).await?;
    let (remote, status) = fetch_remote(state.catalog.as_ref()).await;

    let mut catalog = overlay.resolve(&remote, Filters::storefront());
    catalog.truncate(HOME_LIMIT);

    Ok(HomeResponse {
        products: catalog.into_products(),
        remote: status,
    })
}

/// Shop: shop filters, then category and search, then pagination.
pub async fn handle_shop(state: &AppState, query: ShopQuery) -> Result<ShopResponse> {
    let overlay = storage::load_overlay(state.slots.as_ref()).await?;
    let (remote, status) = fetch_remote(state.catalog.as_ref()).await;

    let catalog = overlay.resolve(&remote, Filters::shop());
    let selected = catalog
        .query()
        .category(query.category.as_deref().unwrap_or(category::ALL_BUCKET))
        .search(query.search.as_deref().unwrap_or_default());

    let total = selected.clone().count();
    let products = selected
        .page(query.offset.unwrap_or(0), query.limit.unwrap_or(total))
        .into_iter()
        .cloned()
        .collect();

    Ok(ShopResponse {
        products,
        total,
        categories: catalog.category_buckets(),
        remote: status,
    })
}

/// Product detail with up to four related products from the same category.
pub async fn handle_product_detail(
    state: &AppState,
    id: ProductId,
) -> Result<ProductDetailResponse> {
    let overlay = storage::load_overlay(state.slots.as_ref()).await?;
    let product = resolve_one(&overlay, state.catalog.as_ref(), id).await?;

    let origin = if overlay.overrides().contains(id) {
        Origin::Local
    } else {
        Origin::Remote
    };

    let neighbours = match state.catalog.category_products(product.category.id).await {
        Ok(products) => products,
        Err(e) => {
            tracing::warn!(
                category = product.category.id,
                "Related products unavailable: {}",
                e
            );
            Vec::new()
        }
    };
    let related = overlay.related(&product, &neighbours);

    Ok(ProductDetailResponse {
        product,
        origin,
        related,
    })
}
