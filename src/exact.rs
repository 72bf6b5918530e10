//! Exact distinct counter used as the accuracy baseline.
//!
//! A plain deduplicating set: memory grows with the number of distinct items,
//! which is exactly the cost the estimator avoids. It is the ground truth the
//! comparison harness measures the estimator against.

use std::hash::Hash;
use std::mem::size_of;

use hashbrown::HashSet;

/// Exact cardinality counter over a distinct-item set.
#[derive(Debug, Clone)]
pub struct ExactCounter<T> {
    items: HashSet<T>,
}

impl<T: Hash + Eq> ExactCounter<T> {
    /// Creates an empty counter.
    pub fn new() -> Self {
        Self { items: HashSet::new() }
    }

    /// Insert an item; inserting an already-present item is a no-op.
    #[inline]
    pub fn insert(&mut self, item: T) {
        self.items.insert(item);
    }

    /// Return the number of distinct items seen.
    #[inline]
    pub fn count(&self) -> usize {
        self.items.len()
    }

    /// Return `true` when no item has been observed yet.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Return the approximate memory footprint of the counter.
    pub fn size_of(&self) -> usize {
        size_of::<Self>() + self.items.capacity() * size_of::<T>()
    }
}

impl<T: Hash + Eq> Default for ExactCounter<T> {
    fn default() -> Self {
        Self::new()
    }
}
