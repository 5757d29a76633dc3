//! Error types for the catalog engine.

use crate::ProductId;
use thiserror::Error;

/// All possible errors from the catalog engine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    // Lookup errors
    #[error("product not found: {0}")]
    ProductNotFound(ProductId),

    #[error("product is deleted: {0}")]
    ProductDeleted(ProductId),

    #[error("cart item not found: {0}")]
    CartItemNotFound(ProductId),

    // Validation errors
    #[error("missing required field: {0}")]
    MissingRequiredField(String),

    #[error("invalid field '{field}': {reason}")]
    InvalidField { field: String, reason: String },

    // State errors
    #[error("local id space exhausted")]
    IdSpaceExhausted,

    #[error("invalid slot '{slot}': {reason}")]
    InvalidSlot { slot: String, reason: String },
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, Error>;
