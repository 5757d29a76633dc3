//! Shop-side querying over a resolved catalog.

use crate::{category, Product, ResolvedCatalog};

/// Builder for filtering a resolved catalog.
#[derive(Debug, Clone)]
pub struct CatalogQuery<'a> {
    products: &'a [Product],
    bucket: Option<String>,
    search: Option<String>,
}

impl<'a> CatalogQuery<'a> {
    pub fn new(products: &'a [Product]) -> Self {
        Self {
            products,
            bucket: None,
            search: None,
        }
    }

    /// Restrict to a category bucket.
    ///
    /// `"All"` matches everything, `"Others"` matches miscellaneous
    /// categories, anything else matches the category name exactly.
    pub fn category(mut self, bucket: impl Into<String>) -> Self {
        let bucket = bucket.into();
        self.bucket = (bucket != category::ALL_BUCKET).then_some(bucket);
        self
    }

    /// Case-insensitive substring match on title or category name.
    pub fn search(mut self, text: impl AsRef<str>) -> Self {
        let text = text.as_ref().to_lowercase();
        self.search = (!text.is_empty()).then_some(text);
        self
    }

    fn matches(&self, product: &Product) -> bool {
        let bucket_ok = match self.bucket.as_deref() {
            None => true,
            Some(category::OTHERS_BUCKET) => category::is_misc(&product.category.name),
            Some(name) => product.category.name == name,
        };
        let search_ok = match &self.search {
            None => true,
            Some(text) => {
                product.title.to_lowercase().contains(text)
                    || product.category.name.to_lowercase().contains(text)
            }
        };
        bucket_ok && search_ok
    }

    /// All matching products.
    pub fn all(self) -> Vec<&'a Product> {
        let products = self.products;
        products.iter().filter(|p| self.matches(p)).collect()
    }

    /// Count matching products.
    pub fn count(self) -> usize {
        let products = self.products;
        products.iter().filter(|p| self.matches(p)).count()
    }

    /// A page of matching products.
    pub fn page(self, offset: usize, limit: usize) -> Vec<&'a Product> {
        let products = self.products;
        products
            .iter()
            .filter(|p| self.matches(p))
            .skip(offset)
            .take(limit)
            .collect()
    }
}

impl ResolvedCatalog {
    /// Start a query over this catalog.
    pub fn query(&self) -> CatalogQuery<'_> {
        CatalogQuery::new(self.products())
    }

    /// `["All", ...]` followed by each category bucket in first-seen order.
    pub fn category_buckets(&self) -> Vec<String> {
        category::buckets(self.products())
    }
}
