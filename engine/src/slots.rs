//! Codecs for the persisted key-value slots.
//!
//! Three named slots hold JSON blobs:
//! - [`OVERRIDES_SLOT`]: array of products
//! - [`DELETED_SLOT`]: array of integer ids
//! - [`CART_SLOT`]: array of cart items
//!
//! Reads never fail. A missing, `null`, or unparsable slot loads as empty and
//! the parse error is handed back so the caller can report it. Override
//! entries decode one at a time: a bad entry is dropped and reported, the
//! rest load. Writes are full overwrites of one slot.

use crate::{
    decode_products, error::Result, Cart, DeletedIdSet, Error, LocalOverrideSet, OverlayState,
    Slot,
};
use serde::{de::DeserializeOwned, Serialize};

/// Slot holding locally created and edited products.
pub const OVERRIDES_SLOT: &str = "local_products";

/// Slot holding suppressed remote product ids.
pub const DELETED_SLOT: &str = "deleted_products";

/// Slot holding the cart.
pub const CART_SLOT: &str = "cart";

impl Slot {
    /// The storage key for this slot.
    pub fn key(&self) -> &'static str {
        match self {
            Slot::Overrides => OVERRIDES_SLOT,
            Slot::Deleted => DELETED_SLOT,
        }
    }
}

/// A decoded slot value plus the error that forced a fallback, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotLoad<T> {
    pub value: T,
    pub fallback: Option<Error>,
}

/// Decode a slot, falling back to the empty value.
pub fn decode<T>(slot: &str, raw: Option<&str>) -> SlotLoad<T>
where
    T: DeserializeOwned + Default,
{
    let Some(raw) = raw else {
        return SlotLoad {
            value: T::default(),
            fallback: None,
        };
    };

    match serde_json::from_str::<Option<T>>(raw) {
        Ok(value) => SlotLoad {
            value: value.unwrap_or_default(),
            fallback: None,
        },
        Err(e) => SlotLoad {
            value: T::default(),
            fallback: Some(Error::InvalidSlot {
                slot: slot.to_string(),
                reason: e.to_string(),
            }),
        },
    }
}

/// Encode a slot value for a full overwrite.
pub fn encode<T: Serialize>(slot: &str, value: &T) -> Result<String> {
    serde_json::to_string(value).map_err(|e| Error::InvalidSlot {
        slot: slot.to_string(),
        reason: e.to_string(),
    })
}

/// Decode the override slot entry by entry.
fn decode_overrides(raw: Option<&str>) -> (LocalOverrideSet, Vec<Error>) {
    let load = decode::<Vec<serde_json::Value>>(OVERRIDES_SLOT, raw);
    let decoded = decode_products(load.value);

    let errors = load
        .fallback
        .into_iter()
        .chain(
            decoded
                .skipped
                .into_iter()
                .map(|(index, reason)| Error::InvalidSlot {
                    slot: OVERRIDES_SLOT.to_string(),
                    reason: format!("entry {index}: {reason}"),
                }),
        )
        .collect();

    (decoded.products.into_iter().collect(), errors)
}

impl OverlayState {
    /// Load the overlay from the two raw slot values.
    ///
    /// Returns the state and any fallback errors, in slot order.
    pub fn from_slots(overrides: Option<&str>, deleted: Option<&str>) -> (Self, Vec<Error>) {
        let (overrides, mut errors) = decode_overrides(overrides);
        let deleted = decode::<DeletedIdSet>(DELETED_SLOT, deleted);
        errors.extend(deleted.fallback);

        (Self::from_parts(overrides, deleted.value), errors)
    }

    /// Encode one slot of this overlay.
    pub fn encode_slot(&self, slot: Slot) -> Result<String> {
        match slot {
            Slot::Overrides => encode(slot.key(), self.overrides()),
            Slot::Deleted => encode(slot.key(), self.deleted()),
        }
    }
}

impl Cart {
    /// Load a cart from its raw slot value. Stored quantities below one are
    /// raised to one.
    pub fn from_slot(raw: Option<&str>) -> SlotLoad<Cart> {
        let mut load: SlotLoad<Cart> = decode(CART_SLOT, raw);
        load.value.enforce_quantity_floor();
        load
    }

    /// Encode the cart for its slot.
    pub fn encode_slot(&self) -> Result<String> {
        encode(CART_SLOT, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Category, ProductDraft};

    #[test]
    fn missing_slots_are_empty() {
        let (state, errors) = OverlayState::from_slots(None, None);
        assert!(state.overrides().is_empty());
        assert!(state.deleted().is_empty());
        assert!(errors.is_empty());
    }

    #[test]
    fn empty_arrays_and_null() {
        let (state, errors) = OverlayState::from_slots(Some("[]"), Some("null"));
        assert!(state.overrides().is_empty());
        assert!(state.deleted().is_empty());
        assert!(errors.is_empty());
    }

    #[test]
    fn unparsable_slot_falls_back() {
        let (state, errors) = OverlayState::from_slots(Some("{not json"), Some("[4, 5]"));
        assert!(state.overrides().is_empty());
        assert_eq!(state.deleted().len(), 2);
        assert_eq!(errors.len(), 1);
        assert!(matches!(
            &errors[0],
            Error::InvalidSlot { slot, .. } if slot == OVERRIDES_SLOT
        ));
    }

    #[test]
    fn bad_override_entry_keeps_the_rest() {
        let overrides = r#"[
            {"id": -1, "title": "Kept", "price": 10, "description": "ok",
             "category": {"id": 999, "name": "Local"}, "images": []},
            {"id": -2, "title": "Empty price", "price": null, "description": "ok"},
            {"title": "No id"}
        ]"#;

        let (mut state, errors) = OverlayState::from_slots(Some(overrides), None);
        assert_eq!(state.overrides().len(), 2);
        assert_eq!(state.overrides().get(-2).unwrap().price, 0.0);
        assert_eq!(errors.len(), 1);
        assert!(matches!(
            &errors[0],
            Error::InvalidSlot { slot, reason } if slot == OVERRIDES_SLOT && reason.starts_with("entry 2")
        ));

        // Writing after a create keeps every loaded override
        let created = state
            .create(
                ProductDraft::new("New", 5.0, "new", Category::local(), vec![]),
                5,
            )
            .unwrap();
        let written = state.encode_slot(created.changed.unwrap()).unwrap();
        let (reloaded, errors) = OverlayState::from_slots(Some(written.as_str()), None);
        assert!(errors.is_empty());
        assert_eq!(reloaded.overrides().len(), 3);
    }

    #[test]
    fn wrong_shape_falls_back() {
        let load = decode::<DeletedIdSet>(DELETED_SLOT, Some(r#"["a", "b"]"#));
        assert!(load.value.is_empty());
        assert!(load.fallback.is_some());
    }

    #[test]
    fn legacy_blob_shape() {
        // Shape written by the browser storefront, including extra fields.
        let overrides = r#"[{
            "id": 1706745600000,
            "title": "Local jacket",
            "price": 199,
            "description": "Premium",
            "category": {"name": "Local", "id": 999},
            "images": ["https://placeimg.com/640/480/any"]
        }]"#;

        let (state, errors) = OverlayState::from_slots(Some(overrides), Some("[12, 14]"));
        assert!(errors.is_empty());
        let product = state.overrides().get(1706745600000).unwrap();
        assert_eq!(product.price, 199.0);
        assert!(state.deleted().contains(12));
    }

    #[test]
    fn encode_written_slot() {
        let mut state = OverlayState::new();
        state.delete(3);
        let created = state
            .create(
                ProductDraft::new("Lamp", 5.0, "lamp", Category::local(), vec![]),
                1000,
            )
            .unwrap();

        let overrides = state.encode_slot(created.changed.unwrap()).unwrap();
        let deleted = state.encode_slot(Slot::Deleted).unwrap();
        assert_eq!(deleted, "[3]");

        let (restored, errors) = OverlayState::from_slots(Some(overrides.as_str()), Some(deleted.as_str()));
        assert!(errors.is_empty());
        assert_eq!(restored, state);
    }

    #[test]
    fn slot_keys() {
        assert_eq!(Slot::Overrides.key(), "local_products");
        assert_eq!(Slot::Deleted.key(), "deleted_products");
    }

    #[test]
    fn cart_slot() {
        let load = Cart::from_slot(Some("garbage"));
        assert!(load.value.is_empty());
        assert!(load.fallback.is_some());

        let load = Cart::from_slot(Some(
            r#"[{"id": 1, "title": "Tee", "price": 20, "quantity": 2}]"#,
        ));
        assert!(load.fallback.is_none());
        assert_eq!(load.value.count(), 2);
        assert_eq!(load.value.total(), 40.0);
    }

    #[test]
    fn cart_slot_raises_zero_quantities() {
        let load = Cart::from_slot(Some(
            r#"[{"id": 1, "title": "Tee", "price": 20, "quantity": 0},
                {"id": 2, "title": "Cap", "price": 5, "quantity": 3}]"#,
        ));
        assert!(load.fallback.is_none());
        assert_eq!(load.value.get(1).unwrap().quantity, 1);
        assert_eq!(load.value.count(), 4);
        assert_eq!(load.value.total(), 35.0);
    }
}
