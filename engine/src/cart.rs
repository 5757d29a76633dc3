//! Shopping cart.
//!
//! Items keep their insertion order. Quantities never drop below one; an
//! item leaves the cart only through [`Cart::remove`] or [`Cart::clear`].

use crate::{error::Result, Error, Product, ProductId};
use serde::{Deserialize, Serialize};

/// A product in the cart with its quantity.
///
/// Serialized with the product fields flattened next to `quantity`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    #[serde(flatten)]
    pub product: Product,
    pub quantity: u32,
}

impl CartItem {
    pub fn new(product: Product) -> Self {
        Self {
            product,
            quantity: 1,
        }
    }

    pub fn id(&self) -> ProductId {
        self.product.id
    }

    /// Price times quantity.
    pub fn subtotal(&self) -> f64 {
        self.product.price * f64::from(self.quantity)
    }
}

/// Totals reported when the cart is checked out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSummary {
    pub items: Vec<CartItem>,
    pub count: u64,
    pub total: f64,
}

/// The cart contents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn get(&self, id: ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Add one unit of a product.
    pub fn add(&mut self, product: Product) -> &CartItem {
        let index = match self.items.iter().position(|item| item.id() == product.id) {
            Some(index) => {
                let item = &mut self.items[index];
                item.quantity = item.quantity.saturating_add(1);
                index
            }
            None => {
                self.items.push(CartItem::new(product));
                self.items.len() - 1
            }
        };
        &self.items[index]
    }

    /// Remove a product entirely. Returns the removed item.
    pub fn remove(&mut self, id: ProductId) -> Option<CartItem> {
        let index = self.items.iter().position(|item| item.id() == id)?;
        Some(self.items.remove(index))
    }

    /// Adjust a quantity by `delta`, never going below one.
    pub fn change_quantity(&mut self, id: ProductId, delta: i64) -> Result<&CartItem> {
        let item = self
            .items
            .iter_mut()
            .find(|item| item.id() == id)
            .ok_or(Error::CartItemNotFound(id))?;

        let next = i64::from(item.quantity).saturating_add(delta);
        item.quantity = u32::try_from(next.max(1)).unwrap_or(u32::MAX);
        Ok(&*item)
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Raise every quantity below one to one.
    pub(crate) fn enforce_quantity_floor(&mut self) {
        for item in &mut self.items {
            item.quantity = item.quantity.max(1);
        }
    }

    /// Sum of price times quantity.
    pub fn total(&self) -> f64 {
        self.items.iter().map(CartItem::subtotal).sum()
    }

    /// Total number of units.
    pub fn count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Simulated checkout: report the totals and empty the cart.
    pub fn checkout(&mut self) -> CheckoutSummary {
        let summary = CheckoutSummary {
            items: self.items.clone(),
            count: self.count(),
            total: self.total(),
        };
        self.clear();
        summary
    }
}
