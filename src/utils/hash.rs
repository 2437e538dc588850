//! Content hashing utilities.

use xxhash_rust::xxh3::Xxh3;

/// Hash a sequence of optional string fields.
///
/// Each field is length-prefixed so that `("ab", "c")` and `("a", "bc")`
/// hash differently, and `None` is distinct from `Some("")`.
pub fn hash_fields<'a, I>(fields: I) -> u64
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    let mut hasher = Xxh3::new();
    for field in fields {
        match field {
            Some(value) => {
                hasher.update(&[1]);
                hasher.update(&(value.len() as u64).to_le_bytes());
                hasher.update(value.as_bytes());
            }
            None => hasher.update(&[0]),
        }
    }
    hasher.digest()
}
