//! Product types shared by the resolver, the override set and the cart.

use crate::{error::Result, validate, CategoryId, ProductId};
use serde::{Deserialize, Deserializer, Serialize};

/// Category id used when a local product's category cannot be resolved.
pub const LOCAL_CATEGORY_ID: CategoryId = 999;

/// Category name used when a local product's category cannot be resolved.
pub const LOCAL_CATEGORY_NAME: &str = "Local";

/// Deserialize `null` as the type's default, like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Where a resolved product came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    /// Created or edited locally (override set)
    Local,
    /// Served by the remote catalog
    Remote,
}

/// A product category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: CategoryId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

impl Category {
    pub fn new(id: CategoryId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// The fallback category for locally created products.
    pub fn local() -> Self {
        Self::new(LOCAL_CATEGORY_ID, LOCAL_CATEGORY_NAME)
    }
}

/// A catalog product.
///
/// Unknown upstream fields are ignored. A missing or `null` field decodes as
/// its default: `images` as empty, `category` as [`Category::default`],
/// `price` as zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub price: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: Category,
    #[serde(default, deserialize_with = "null_as_default")]
    pub images: Vec<String>,
}

impl Product {
    pub fn new(
        id: ProductId,
        title: impl Into<String>,
        price: f64,
        description: impl Into<String>,
        category: Category,
        images: Vec<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            price,
            description: description.into(),
            category,
            images,
        }
    }

    /// Build a product from a validated draft.
    pub fn from_draft(id: ProductId, draft: ProductDraft) -> Self {
        Self {
            id,
            title: draft.title,
            price: draft.price,
            description: draft.description,
            category: draft.category,
            images: draft.images,
        }
    }

    /// The cover image, if any.
    pub fn first_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    /// Return a copy with the set fields of `patch` applied.
    pub fn patched(&self, patch: &ProductPatch) -> Self {
        let mut product = self.clone();
        if let Some(title) = &patch.title {
            product.title = title.clone();
        }
        if let Some(price) = patch.price {
            product.price = price;
        }
        if let Some(description) = &patch.description {
            product.description = description.clone();
        }
        if let Some(category) = &patch.category {
            product.category = category.clone();
        }
        if let Some(images) = &patch.images {
            product.images = images.clone();
        }
        product
    }
}

/// Input for creating a local product. The id is allocated by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    pub title: String,
    pub price: f64,
    pub description: String,
    pub category: Category,
    #[serde(default)]
    pub images: Vec<String>,
}

impl ProductDraft {
    pub fn new(
        title: impl Into<String>,
        price: f64,
        description: impl Into<String>,
        category: Category,
        images: Vec<String>,
    ) -> Self {
        Self {
            title: title.into(),
            price,
            description: description.into(),
            category,
            images,
        }
    }

    /// Replace the category with the upstream entry of the same id, or with
    /// [`Category::local`] when the id is unknown.
    pub fn resolve_category(&mut self, known: &[Category]) {
        self.category = known
            .iter()
            .find(|category| category.id == self.category.id)
            .cloned()
            .unwrap_or_else(Category::local);
    }

    /// Check required fields and value ranges.
    pub fn validate(&self) -> Result<()> {
        validate::required_text("title", &self.title)?;
        validate::required_text("description", &self.description)?;
        validate::price(self.price)?;
        validate::images(&self.images)
    }
}

/// A set of changed fields for an edit. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub images: Option<Vec<String>>,
}

impl ProductPatch {
    /// Whether the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.price.is_none()
            && self.description.is_none()
            && self.category.is_none()
            && self.images.is_none()
    }

    /// Validate only the fields this patch sets.
    pub fn validate(&self) -> Result<()> {
        if let Some(title) = &self.title {
            validate::required_text("title", title)?;
        }
        if let Some(description) = &self.description {
            validate::required_text("description", description)?;
        }
        if let Some(price) = self.price {
            validate::price(price)?;
        }
        if let Some(images) = &self.images {
            validate::images(images)?;
        }
        Ok(())
    }
}

/// Products decoded from an upstream list, plus the entries that were skipped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecodedProducts {
    pub products: Vec<Product>,
    /// `(index, reason)` for every entry that failed to decode
    pub skipped: Vec<(usize, String)>,
}

/// Decode an upstream product list entry by entry.
///
/// A malformed entry is skipped instead of failing the whole list.
pub fn decode_products(values: Vec<serde_json::Value>) -> DecodedProducts {
    let mut decoded = DecodedProducts::default();
    for (index, value) in values.into_iter().enumerate() {
        match serde_json::from_value::<Product>(value) {
            Ok(product) => decoded.products.push(product),
            Err(e) => decoded.skipped.push((index, e.to_string())),
        }
    }
    decoded
}
