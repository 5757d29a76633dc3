//! Remote catalog access.
//!
//! The upstream API is the read-only source of remote products. Every
//! resolving pass fetches fresh; nothing is cached across requests.

mod http;

pub use http::HttpCatalog;

use async_trait::async_trait;
use catalog_engine::{Category, CategoryId, Product, ProductDraft, ProductId};

/// Errors talking to the remote catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("upstream returned {status}: {body}")]
    Status { status: u16, body: String },
}

/// Source of remote products.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// The full remote product list.
    async fn products(&self) -> Result<Vec<Product>, CatalogError>;

    /// A single remote product, `None` if the upstream does not know it.
    async fn product(&self, id: ProductId) -> Result<Option<Product>, CatalogError>;

    /// The upstream category list.
    async fn categories(&self) -> Result<Vec<Category>, CatalogError>;

    /// Remote products in one category.
    async fn category_products(&self, id: CategoryId) -> Result<Vec<Product>, CatalogError>;

    /// Submit a new product upstream. The upstream copy is not read back
    /// into the overlay.
    async fn create_product(&self, draft: &ProductDraft) -> Result<Product, CatalogError>;
}
