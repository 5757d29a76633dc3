//! Local override state and the admin mutations on it.
//!
//! [`OverlayState`] holds the two persisted collections:
//! - [`LocalOverrideSet`]: products created locally or pinned by an edit
//! - [`DeletedIdSet`]: remote ids suppressed from every view
//!
//! Every mutation reports the [`Slot`] it changed so the caller can persist
//! exactly that slot with a single overwrite before acknowledging.

use crate::{
    error::Result, local_id, Error, Product, ProductDraft, ProductId, ProductPatch, Timestamp,
};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::{BTreeMap, BTreeSet};

/// A persisted slot touched by a mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Slot {
    Overrides,
    Deleted,
}

/// Locally created or edited products, keyed by id.
///
/// Serialized as a JSON array of products. On load a later entry with the
/// same id replaces an earlier one. Uses BTreeMap for deterministic ordering.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocalOverrideSet {
    products: BTreeMap<ProductId, Product>,
}

impl LocalOverrideSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.get(&id)
    }

    pub fn contains(&self, id: ProductId) -> bool {
        self.products.contains_key(&id)
    }

    /// Insert or replace by id. Returns the previous record.
    pub fn upsert(&mut self, product: Product) -> Option<Product> {
        self.products.insert(product.id, product)
    }

    pub fn remove(&mut self, id: ProductId) -> Option<Product> {
        self.products.remove(&id)
    }

    pub fn ids(&self) -> impl Iterator<Item = ProductId> + '_ {
        self.products.keys().copied()
    }

    pub fn products(&self) -> impl Iterator<Item = &Product> {
        self.products.values()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn clear(&mut self) {
        self.products.clear();
    }
}

impl FromIterator<Product> for LocalOverrideSet {
    fn from_iter<I: IntoIterator<Item = Product>>(iter: I) -> Self {
        let mut set = Self::new();
        for product in iter {
            set.upsert(product);
        }
        set
    }
}

impl Serialize for LocalOverrideSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.products.values())
    }
}

impl<'de> Deserialize<'de> for LocalOverrideSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let products = Vec::<Product>::deserialize(deserializer)?;
        Ok(products.into_iter().collect())
    }
}

/// Remote product ids hidden from every view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeletedIdSet {
    ids: BTreeSet<ProductId>,
}

impl DeletedIdSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: ProductId) -> bool {
        self.ids.contains(&id)
    }

    /// Returns `false` if the id was already present.
    pub fn insert(&mut self, id: ProductId) -> bool {
        self.ids.insert(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = ProductId> + '_ {
        self.ids.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }
}

impl FromIterator<ProductId> for DeletedIdSet {
    fn from_iter<I: IntoIterator<Item = ProductId>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

/// What a delete did.
#[derive(Debug, Clone, PartialEq)]
pub enum DeleteEffect {
    /// Removed a local override; any remote copy becomes visible again
    RemovedOverride(Product),
    /// Added the id to the deleted set
    Suppressed,
    /// The id was already deleted
    AlreadyDeleted,
}

/// Result of applying a mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct MutationOutcome<T> {
    pub value: T,
    /// The slot that must be persisted, `None` when nothing changed
    pub changed: Option<Slot>,
}

impl<T> MutationOutcome<T> {
    fn changed(value: T, slot: Slot) -> Self {
        Self {
            value,
            changed: Some(slot),
        }
    }

    fn unchanged(value: T) -> Self {
        Self {
            value,
            changed: None,
        }
    }
}

/// The local overlay: override set plus deleted set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverlayState {
    overrides: LocalOverrideSet,
    deleted: DeletedIdSet,
}

impl OverlayState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from loaded collections.
    ///
    /// Ids present in both sets are dropped from the deleted set: the
    /// override is the more recent admin action.
    pub fn from_parts(overrides: LocalOverrideSet, mut deleted: DeletedIdSet) -> Self {
        deleted.ids.retain(|id| !overrides.contains(*id));
        Self { overrides, deleted }
    }

    pub fn overrides(&self) -> &LocalOverrideSet {
        &self.overrides
    }

    pub fn deleted(&self) -> &DeletedIdSet {
        &self.deleted
    }

    pub fn into_parts(self) -> (LocalOverrideSet, DeletedIdSet) {
        (self.overrides, self.deleted)
    }

    /// Whether an id is taken by either collection.
    pub fn is_known(&self, id: ProductId) -> bool {
        self.overrides.contains(id) || self.deleted.contains(id)
    }

    /// Create a new local product from a draft.
    ///
    /// The id is allocated in the local namespace and is free in both sets.
    pub fn create(
        &mut self,
        draft: ProductDraft,
        timestamp: Timestamp,
    ) -> Result<MutationOutcome<Product>> {
        draft.validate()?;

        let id = local_id::allocate(timestamp, |id| self.is_known(id))?;
        let product = Product::from_draft(id, draft);
        self.overrides.upsert(product.clone());

        Ok(MutationOutcome::changed(product, Slot::Overrides))
    }

    /// Pin an edited copy of `base` under its original id.
    ///
    /// `base` may be a remote product or an existing override.
    pub fn edit(&mut self, base: &Product, patch: &ProductPatch) -> Result<MutationOutcome<Product>> {
        if self.deleted.contains(base.id) {
            return Err(Error::ProductDeleted(base.id));
        }
        patch.validate()?;

        let product = base.patched(patch);
        self.overrides.upsert(product.clone());

        Ok(MutationOutcome::changed(product, Slot::Overrides))
    }

    /// Delete a product.
    ///
    /// A local override is removed; anything else is added to the deleted
    /// set. Deleting an already deleted id changes nothing.
    pub fn delete(&mut self, id: ProductId) -> MutationOutcome<DeleteEffect> {
        if let Some(removed) = self.overrides.remove(id) {
            return MutationOutcome::changed(DeleteEffect::RemovedOverride(removed), Slot::Overrides);
        }
        if self.deleted.insert(id) {
            MutationOutcome::changed(DeleteEffect::Suppressed, Slot::Deleted)
        } else {
            MutationOutcome::unchanged(DeleteEffect::AlreadyDeleted)
        }
    }

    /// Resolve one id through the overlay, given a lookup for remote copies.
    pub fn lookup<'a>(
        &'a self,
        id: ProductId,
        remote: Option<&'a Product>,
    ) -> Result<&'a Product> {
        if self.deleted.contains(id) {
            return Err(Error::ProductDeleted(id));
        }
        self.overrides
            .get(id)
            .or(remote.filter(|p| p.id == id))
            .ok_or(Error::ProductNotFound(id))
    }
}
