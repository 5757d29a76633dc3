//! Id allocation for locally created products.
//!
//! Remote catalog ids are positive integers. Local ids live in the negative
//! half of the `i64` range, so a locally created product can never shadow a
//! product the remote catalog assigns later.
//!
//! The first candidate is derived from the creation timestamp
//! (`-timestamp`, at most `-1`). If it is already taken the allocator walks
//! downwards until it finds a free id.

use crate::{error::Result, Error, ProductId, Timestamp};

/// Whether an id belongs to the local namespace.
pub fn is_local(id: ProductId) -> bool {
    id < 0
}

/// The first id tried for a product created at `timestamp` (ms since epoch).
pub fn candidate(timestamp: Timestamp) -> ProductId {
    let magnitude = i64::try_from(timestamp).unwrap_or(i64::MAX).max(1);
    -magnitude
}

/// Allocate a local id not rejected by `is_taken`.
pub fn allocate<F>(timestamp: Timestamp, is_taken: F) -> Result<ProductId>
where
    F: Fn(ProductId) -> bool,
{
    let mut id = candidate(timestamp);
    while is_taken(id) {
        id = id.checked_sub(1).ok_or(Error::IdSpaceExhausted)?;
    }
    Ok(id)
}
