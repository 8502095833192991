//! Key hashing used to place entries into buckets.
//!
//! The table only needs a pure, deterministic `&str -> u32` mapping; the
//! bucket index is that value modulo the table capacity. `Bernstein` is
//! the default. Any `Fn(&str) -> u32` can be used instead, which is handy
//! for forcing collisions in tests.

/// A deterministic key hash.
///
/// Implementations must return the same value for the same key on every
/// call and must not touch shared mutable state; the table calls `hash`
/// without holding any lock.
pub trait KeyHash {
    fn hash(&self, key: &str) -> u32;
}

/// Bernstein's djb2 string hash: `h = h * 33 + byte`, seeded with 5381.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Bernstein;

impl KeyHash for Bernstein {
    #[inline]
    fn hash(&self, key: &str) -> u32 {
        bernstein_hash(key)
    }
}

impl<F> KeyHash for F
where
    F: Fn(&str) -> u32,
{
    #[inline]
    fn hash(&self, key: &str) -> u32 {
        self(key)
    }
}

#[inline]
pub fn bernstein_hash(key: &str) -> u32 {
    key.bytes().fold(5381u32, |h, b| {
        (h << 5).wrapping_add(h).wrapping_add(u32::from(b))
    })
}
