//! # Catalog Engine
//!
//! A deterministic overlay engine for a storefront backed by a third-party
//! product API.
//!
//! The remote catalog is read-only. Admin changes live in a local overlay
//! that is merged over every fresh remote fetch. The engine owns the merge,
//! the overlay mutations, and the shape of the persisted blobs.
//!
//! ## Design Principles
//!
//! - **No IO**: fetching and storage are the caller's job
//! - **Deterministic**: same remote list and overlay, same catalog
//! - **Total**: resolving never fails; bad slots load as empty
//!
//! ## Core Concepts
//!
//! ### Overlay
//!
//! [`OverlayState`] holds a [`LocalOverrideSet`] (products created locally
//! or pinned by an edit) and a [`DeletedIdSet`] (remote ids hidden from
//! every view). Mutations return a [`MutationOutcome`] naming the [`Slot`]
//! to persist.
//!
//! ### Resolution
//!
//! [`resolve`] emits override values first, then remote products that are
//! neither deleted nor overridden. [`Filters`] select what customer views
//! hide; the admin view hides nothing.
//!
//! ### Local ids
//!
//! Local products get negative ids (see [`local_id`]), disjoint from the
//! positive ids the remote catalog assigns.
//!
//! ## Quick Start
//!
//! ```rust
//! use catalog_engine::{Category, Filters, OverlayState, Product, ProductDraft, ProductPatch};
//!
//! let remote = vec![
//!     Product::new(1, "Tee", 20.0, "Cotton", Category::new(1, "Clothes"),
//!         vec!["https://i.imgur.com/tee.jpg".into()]),
//!     Product::new(2, "Cap", 15.0, "Wool", Category::new(1, "Clothes"),
//!         vec!["https://i.imgur.com/cap.jpg".into()]),
//! ];
//!
//! let mut overlay = OverlayState::new();
//!
//! // Pin an edited copy of a remote product
//! let patch = ProductPatch { title: Some("Tee (sale)".into()), ..Default::default() };
//! overlay.edit(&remote[0], &patch).unwrap();
//!
//! // Hide another remote product
//! overlay.delete(2);
//!
//! // Add a local product
//! let draft = ProductDraft::new("Lamp", 40.0, "Desk lamp", Category::local(), vec![]);
//! overlay.create(draft, 1706745600000).unwrap();
//!
//! let catalog = overlay.resolve(&remote, Filters::admin());
//! assert_eq!(catalog.len(), 2);
//! assert!(catalog.products().iter().any(|p| p.title == "Tee (sale)"));
//! ```
//!
//! ## Persistence
//!
//! Use [`OverlayState::from_slots`] and [`OverlayState::encode_slot`] to move
//! the overlay in and out of key-value storage (see [`slots`]).

pub mod cart;
pub mod category;
pub mod error;
pub mod local_id;
pub mod overlay;
pub mod overrides;
pub mod product;
pub mod query;
pub mod slots;
pub mod validate;

// Re-export main types at crate root
pub use cart::{Cart, CartItem, CheckoutSummary};
pub use error::Error;
pub use overlay::{has_valid_image, resolve, Filters, ResolvedCatalog, HOME_LIMIT, RELATED_LIMIT};
pub use overrides::{
    DeleteEffect, DeletedIdSet, LocalOverrideSet, MutationOutcome, OverlayState, Slot,
};
pub use product::{decode_products, Category, DecodedProducts, Origin, Product, ProductDraft, ProductPatch};
pub use query::CatalogQuery;
pub use slots::{SlotLoad, CART_SLOT, DELETED_SLOT, OVERRIDES_SLOT};

/// Type aliases for clarity
pub type ProductId = i64;
pub type CategoryId = i64;
pub type Timestamp = u64;
