//! HTTP client for the remote product API.

use async_trait::async_trait;
use catalog_engine::{decode_products, Category, CategoryId, Product, ProductDraft, ProductId};
use reqwest::{Client, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;

use super::{CatalogError, CatalogSource};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Body the upstream expects when creating a product.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UpstreamDraft<'a> {
    title: &'a str,
    price: f64,
    description: &'a str,
    category_id: CategoryId,
    images: &'a [String],
}

impl<'a> From<&'a ProductDraft> for UpstreamDraft<'a> {
    fn from(draft: &'a ProductDraft) -> Self {
        Self {
            title: &draft.title,
            price: draft.price,
            description: &draft.description,
            category_id: draft.category.id,
            images: &draft.images,
        }
    }
}

/// Catalog source backed by the upstream REST API.
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    client: Client,
    base_url: String,
}

impl HttpCatalog {
    pub fn new(base_url: impl Into<String>) -> Result<Self, CatalogError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, CatalogError> {
        let response = self.client.get(self.url(path)).send().await?;
        Self::handle_response(response).await
    }

    /// Fetch a product list, skipping entries that do not decode.
    async fn get_products(&self, path: &str) -> Result<Vec<Product>, CatalogError> {
        let values: Vec<serde_json::Value> = self.get_json(path).await?;
        let decoded = decode_products(values);

        for (index, reason) in &decoded.skipped {
            tracing::warn!(path, index, "Skipping malformed upstream product: {}", reason);
        }

        Ok(decoded.products)
    }

    async fn handle_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, CatalogError> {
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CatalogError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response.json().await.map_err(Into::into)
    }
}

#[async_trait]
impl CatalogSource for HttpCatalog {
    async fn products(&self) -> Result<Vec<Product>, CatalogError> {
        self.get_products("products").await
    }

    async fn product(&self, id: ProductId) -> Result<Option<Product>, CatalogError> {
        match self.get_json(&format!("products/{id}")).await {
            Ok(product) => Ok(Some(product)),
            // The upstream answers 400 for ids it never issued
            Err(CatalogError::Status { status, .. })
                if status == StatusCode::NOT_FOUND.as_u16()
                    || status == StatusCode::BAD_REQUEST.as_u16() =>
            {
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    async fn categories(&self) -> Result<Vec<Category>, CatalogError> {
        self.get_json("categories").await
    }

    async fn category_products(&self, id: CategoryId) -> Result<Vec<Product>, CatalogError> {
        self.get_products(&format!("categories/{id}/products")).await
    }

    async fn create_product(&self, draft: &ProductDraft) -> Result<Product, CatalogError> {
        let response = self
            .client
            .post(self.url("products"))
            .json(&UpstreamDraft::from(draft))
            .send()
            .await?;
        Self::handle_response(response).await
    }
}
