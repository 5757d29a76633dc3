//! Database module for PostgreSQL persistence.

mod pool;
mod slots;

pub use pool::*;
pub use slots::*;
