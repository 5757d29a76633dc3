//! The catalog overlay resolver.
//!
//! Merges a freshly fetched remote product list with the local overlay and
//! produces the product sequence every view displays.
//!
//! # Algorithm
//!
//! 1. Collect the override ids
//! 2. Drop remote products that are deleted, overridden, or repeat an id
//!    already kept
//! 3. Apply the view's filters to the remaining remote products
//! 4. Emit override values first, then the surviving remote products
//!
//! Overrides are never filtered: an admin-created product with a placeholder
//! image still reaches shoppers.

use crate::{category, DeletedIdSet, LocalOverrideSet, Origin, OverlayState, Product, ProductId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Host of the upstream placeholder image service.
pub const PLACEHOLDER_HOST: &str = "placeimg.com";

/// Scheme prefix a displayable cover image must start with (`https` included).
pub const IMAGE_SCHEME: &str = "http";

/// Number of products the home page shows.
pub const HOME_LIMIT: usize = 8;

/// Number of related products on a detail page.
pub const RELATED_LIMIT: usize = 4;

/// Which remote products a view hides.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Filters {
    /// Hide products without a usable cover image
    pub require_valid_image: bool,
    /// Hide products whose category name is not clean
    pub require_clean_category: bool,
}

impl Filters {
    /// Admin management view: every manageable product.
    pub fn admin() -> Self {
        Self::default()
    }

    /// Customer views (home, detail, related products).
    pub fn storefront() -> Self {
        Self {
            require_valid_image: true,
            require_clean_category: false,
        }
    }

    /// Shop listing: storefront rules plus clean category names.
    pub fn shop() -> Self {
        Self {
            require_valid_image: true,
            require_clean_category: true,
        }
    }

    /// Whether a remote product passes these filters.
    pub fn admits(&self, product: &Product) -> bool {
        (!self.require_valid_image || has_valid_image(product))
            && (!self.require_clean_category || category::is_clean(&product.category.name))
    }
}

/// The cover image exists, uses an http(s) URL, and is not a placeholder.
pub fn has_valid_image(product: &Product) -> bool {
    match product.first_image() {
        Some(url) => url.starts_with(IMAGE_SCHEME) && !url.contains(PLACEHOLDER_HOST),
        None => false,
    }
}

/// The merged product sequence: overrides first, then remote products.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedCatalog {
    products: Vec<Product>,
    /// The first `local_count` products came from the override set
    local_count: usize,
}

impl ResolvedCatalog {
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn into_products(self) -> Vec<Product> {
        self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Number of products taken from the override set.
    pub fn local_count(&self) -> usize {
        self.local_count
    }

    pub fn ids(&self) -> impl Iterator<Item = ProductId> + '_ {
        self.products.iter().map(|p| p.id)
    }

    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Products tagged with where they came from.
    pub fn entries(&self) -> impl Iterator<Item = (Origin, &Product)> {
        self.products.iter().enumerate().map(move |(i, p)| {
            let origin = if i < self.local_count {
                Origin::Local
            } else {
                Origin::Remote
            };
            (origin, p)
        })
    }

    /// Keep at most `limit` products.
    pub fn truncate(&mut self, limit: usize) {
        self.products.truncate(limit);
        self.local_count = self.local_count.min(limit);
    }
}

/// Merge remote products with local overrides and deletions.
///
/// Pure and total: any input produces a catalog without repeated ids.
pub fn resolve(
    remote: &[Product],
    overrides: &LocalOverrideSet,
    deleted: &DeletedIdSet,
    filters: Filters,
) -> ResolvedCatalog {
    let mut seen: HashSet<ProductId> = overrides.ids().collect();
    let local_count = seen.len();

    let mut products = Vec::with_capacity(local_count + remote.len());
    products.extend(overrides.products().cloned());

    for product in remote {
        if deleted.contains(product.id) || !seen.insert(product.id) {
            continue;
        }
        if filters.admits(product) {
            products.push(product.clone());
        }
    }

    ResolvedCatalog {
        products,
        local_count,
    }
}

impl OverlayState {
    /// Resolve a remote list against this overlay.
    pub fn resolve(&self, remote: &[Product], filters: Filters) -> ResolvedCatalog {
        resolve(remote, self.overrides(), self.deleted(), filters)
    }

    /// Related products for a detail page: same-category products resolved
    /// through the overlay, without the product itself.
    ///
    /// Storefront filters apply to every entry, overrides included.
    pub fn related(&self, product: &Product, category_products: &[Product]) -> Vec<Product> {
        let filters = Filters::storefront();
        self.resolve(category_products, filters)
            .into_products()
            .into_iter()
            .filter(|p| p.id != product.id && p.category.id == product.category.id)
            .filter(|p| filters.admits(p))
            .take(RELATED_LIMIT)
            .collect()
    }
}
