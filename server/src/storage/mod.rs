//! Slot persistence.
//!
//! The overlay and the cart live in three named JSON slots. A [`SlotStore`]
//! only moves raw strings; the shape of each blob belongs to the engine.

mod memory;

pub use memory::MemorySlotStore;

use async_trait::async_trait;
use catalog_engine::{Cart, OverlayState, Slot, CART_SLOT, DELETED_SLOT, OVERRIDES_SLOT};

use crate::error::Result;

/// Key-value storage for slot blobs. Writes are full overwrites.
#[async_trait]
pub trait SlotStore: Send + Sync {
    /// Read a slot, `None` when it was never written.
    async fn get(&self, name: &str) -> std::result::Result<Option<String>, StoreError>;

    /// Overwrite a slot.
    async fn put(&self, name: &str, value: &str) -> std::result::Result<(), StoreError>;
}

/// Storage backend errors.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Load the overlay. Unreadable slots are logged and load as empty.
pub async fn load_overlay(store: &dyn SlotStore) -> Result<OverlayState> {
    let overrides = store.get(OVERRIDES_SLOT).await?;
    let deleted = store.get(DELETED_SLOT).await?;

    let (overlay, errors) = OverlayState::from_slots(overrides.as_deref(), deleted.as_deref());
    for error in errors {
        tracing::warn!("Falling back to empty slot: {}", error);
    }

    Ok(overlay)
}

/// Persist the slot a mutation changed, if any.
pub async fn save_overlay(
    store: &dyn SlotStore,
    overlay: &OverlayState,
    changed: Option<Slot>,
) -> Result<()> {
    let Some(slot) = changed else {
        return Ok(());
    };

    let value = overlay.encode_slot(slot)?;
    store.put(slot.key(), &value).await?;
    tracing::debug!(slot = slot.key(), "Persisted slot");

    Ok(())
}

/// Load the cart. An unreadable slot is logged and loads as empty.
pub async fn load_cart(store: &dyn SlotStore) -> Result<Cart> {
    let raw = store.get(CART_SLOT).await?;
    let load = Cart::from_slot(raw.as_deref());
    if let Some(error) = load.fallback {
        tracing::warn!("Falling back to empty cart: {}", error);
    }
    Ok(load.value)
}

/// Overwrite the cart slot.
pub async fn save_cart(store: &dyn SlotStore, cart: &Cart) -> Result<()> {
    let value = cart.encode_slot()?;
    store.put(CART_SLOT, &value).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_engine::{Category, ProductDraft};

    #[tokio::test]
    async fn overlay_round_trip_through_store() {
        let store = MemorySlotStore::new();
        let mut overlay = load_overlay(&store).await.unwrap();
        assert!(overlay.overrides().is_empty());

        let draft = ProductDraft::new("Lamp", 40.0, "Desk lamp", Category::local(), vec![]);
        let created = overlay.create(draft, 1_706_745_600_000).unwrap();
        save_overlay(&store, &overlay, created.changed).await.unwrap();
        let deleted = overlay.delete(7);
        save_overlay(&store, &overlay, deleted.changed).await.unwrap();

        let reloaded = load_overlay(&store).await.unwrap();
        assert_eq!(reloaded, overlay);
    }

    #[tokio::test]
    async fn unchanged_mutation_writes_nothing() {
        let store = MemorySlotStore::new();
        save_overlay(&store, &OverlayState::new(), None).await.unwrap();
        assert!(store.get(DELETED_SLOT).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn corrupted_cart_loads_empty() {
        let store = MemorySlotStore::new();
        store.put(CART_SLOT, "{broken").await.unwrap();

        let cart = load_cart(&store).await.unwrap();
        assert!(cart.is_empty());
    }
}
