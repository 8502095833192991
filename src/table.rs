//! Table: fixed array of chains, one lock per bucket.
//!
//! Every operation resolves its bucket without locking, then works on that
//! bucket's chain while holding only that bucket's lock. `add_entry` runs
//! its existence check and the resulting update or insert inside one
//! critical section, so two writers of the same key can never both see it
//! as absent. Writers on different buckets share no lock.

use crate::chain::Chain;
use crate::config::DEFAULT_CAPACITY;
use crate::error::{Error, Result};
use crate::hash::{Bernstein, KeyHash};
use core::fmt;
use core::sync::atomic::{AtomicUsize, Ordering};
use parking_lot::RwLock;

pub struct Table<H = Bernstein> {
    hasher: H,
    buckets: Box<[RwLock<Chain>]>,
    // Incremented inside the bucket critical section that links the entry.
    len: AtomicUsize,
}

impl Table<Bernstein> {
    /// Creates an empty table with `DEFAULT_CAPACITY` buckets.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates an empty table with `capacity` buckets.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero. Use [`crate::Config`] for a fallible
    /// constructor.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, Bernstein)
    }
}

impl Default for Table<Bernstein> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> Table<H>
where
    H: KeyHash,
{
    /// Creates an empty table with `capacity` buckets that places keys
    /// with `hasher`.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn with_capacity_and_hasher(capacity: usize, hasher: H) -> Self {
        assert!(capacity > 0, "{}", Error::ZeroCapacity);
        let buckets = (0..capacity).map(|_| RwLock::new(Chain::new())).collect();
        log::debug!("created table with {capacity} buckets");
        Self {
            hasher,
            buckets,
            len: AtomicUsize::new(0),
        }
    }

    /// Number of buckets. Fixed for the lifetime of the table.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Number of distinct keys stored.
    ///
    /// While writers are active this is a lower bound that may lag behind
    /// inserts still in flight.
    pub fn len(&self) -> usize {
        self.len.load(Ordering::Relaxed)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Index of the bucket that holds (or would hold) `key`.
    ///
    /// Pure function of the key and the capacity; never blocks.
    #[inline]
    pub fn bucket_for(&self, key: &str) -> usize {
        self.hasher.hash(key) as usize % self.buckets.len()
    }

    #[inline]
    fn bucket(&self, key: &str) -> &RwLock<Chain> {
        &self.buckets[self.bucket_for(key)]
    }

    /// Returns whether `key` is present.
    ///
    /// Reads share the bucket lock with other readers and hold it only for
    /// the scan. A `false` result can be stale if another thread is inserting the same key concurrently.
    pub fn contains(&self, key: &str) -> bool {
        self.bucket(key).read().find(key).is_some()
    }

    /// Returns the value stored for `key`, if any. Same consistency as
    /// [`Table::contains`].
    pub fn get(&self, key: &str) -> Option<u32> {
        self.bucket(key).read().find(key).map(|e| e.value)
    }

    /// Returns the value stored for `key`.
    ///
    /// # Panics
    ///
    /// Panics if `key` is absent. Confirm presence with
    /// [`Table::contains`] first, or use [`Table::try_get_value`].
    pub fn get_value(&self, key: &str) -> u32 {
        match self.get(key) {
            Some(value) => value,
            None => panic!("{}", Error::KeyNotFound(key.to_owned())),
        }
    }

    /// Returns the value stored for `key`, or `Error::KeyNotFound`.
    pub fn try_get_value(&self, key: &str) -> Result<u32> {
        self.get(key)
            .ok_or_else(|| Error::KeyNotFound(key.to_owned()))
    }

    /// Inserts `key` with `value`, or overwrites the value if `key` is
    /// already present.
    ///
    /// Blocks only while another thread holds the lock of the same bucket.
    pub fn add_entry(&self, key: &str, value: u32) {
        let index = self.bucket_for(key);
        let mut chain = self.buckets[index].write();

        if let Some(entry) = chain.find_mut(key) {
            entry.value = value;
            return;
        }

        chain.push_head(key, value);
        self.len.fetch_add(1, Ordering::Relaxed);
        drop(chain);

        log::trace!("inserted {key:?} into bucket {index}");
    }

    /// Releases every entry and the table itself.
    ///
    /// Taking `self` by value means no other thread can still hold a
    /// reference; with an `Arc<Table>`, the caller must first reclaim sole
    /// ownership (e.g. `Arc::try_unwrap`) after joining its workers.
    pub fn destroy(self) {
        drop(self);
    }
}

#[cfg(test)]
impl<H> Table<H> {
    /// `(bucket index, key)` for every stored entry, head first per bucket.
    pub(crate) fn placements(&self) -> Vec<(usize, String)> {
        let mut out = Vec::new();
        for (idx, bucket) in self.buckets.iter().enumerate() {
            out.extend(bucket.read().keys().map(|k| (idx, k.to_owned())));
        }
        out
    }
}

impl<H> Drop for Table<H> {
    fn drop(&mut self) {
        let entries: usize = self.buckets.iter_mut().map(|b| b.get_mut().len()).sum();
        debug_assert_eq!(entries, *self.len.get_mut());
        log::debug!(
            "destroying table: {entries} entries in {} buckets",
            self.buckets.len()
        );
    }
}

impl<H> fmt::Debug for Table<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Table")
            .field("capacity", &self.buckets.len())
            .field("len", &self.len.load(Ordering::Relaxed))
            .finish()
    }
}
