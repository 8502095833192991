//! Chain: the entries of one bucket, newest first.
//!
//! A chain owns its entries outright. It performs no synchronization of
//! its own; the table keeps every chain behind that bucket's lock.

#[derive(Debug)]
pub(crate) struct Entry {
    key: Box<str>,
    pub(crate) value: u32,
}

impl Entry {
    pub(crate) fn key(&self) -> &str {
        &self.key
    }
}

/// Entries are stored oldest-to-newest, so the logical head of the chain
/// is the back of the vector and scans walk it in reverse.
#[derive(Debug, Default)]
pub(crate) struct Chain {
    entries: Vec<Entry>,
}

impl Chain {
    pub(crate) const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn find(&self, key: &str) -> Option<&Entry> {
        self.entries.iter().rev().find(|e| e.key() == key)
    }

    pub(crate) fn find_mut(&mut self, key: &str) -> Option<&mut Entry> {
        self.entries.iter_mut().rev().find(|e| e.key() == key)
    }

    /// Link a new entry at the head. The caller has already checked that
    /// `key` is absent from this chain.
    pub(crate) fn push_head(&mut self, key: &str, value: u32) {
        debug_assert!(self.find(key).is_none(), "duplicate key in chain");
        self.entries.push(Entry {
            key: key.into(),
            value,
        });
    }

    /// Keys from head to tail.
    #[cfg(test)]
    pub(crate) fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().rev().map(Entry::key)
    }
}
