//! Shared utilities.

mod hash;

pub use hash::hash_fields;
