//! Table configuration.

use crate::error::{Error, Result};
use crate::hash::{Bernstein, KeyHash};
use crate::table::Table;

/// Bucket count used by [`Table::new`] and [`Config::default`].
pub const DEFAULT_CAPACITY: usize = 4096;

/// Builder for a [`Table`].
///
/// ```
/// use bucket_table::Config;
///
/// let table = Config::new().capacity(64).build().unwrap();
/// table.add_entry("a", 1);
/// assert_eq!(table.capacity(), 64);
/// ```
#[derive(Clone, Debug)]
pub struct Config<H = Bernstein> {
    capacity: usize,
    hasher: H,
}

impl Config<Bernstein> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Default for Config<Bernstein> {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            hasher: Bernstein,
        }
    }
}

impl<H> Config<H>
where
    H: KeyHash,
{
    /// Sets the number of buckets. Must be at least one.
    #[must_use]
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Replaces the key hash.
    #[must_use]
    pub fn hasher<H2: KeyHash>(self, hasher: H2) -> Config<H2> {
        Config {
            capacity: self.capacity,
            hasher,
        }
    }

    /// Creates the table.
    ///
    /// # Errors
    ///
    /// Returns `Error::ZeroCapacity` if the capacity is zero.
    pub fn build(self) -> Result<Table<H>> {
        if self.capacity == 0 {
            return Err(Error::ZeroCapacity);
        }
        Ok(Table::with_capacity_and_hasher(self.capacity, self.hasher))
    }
}
