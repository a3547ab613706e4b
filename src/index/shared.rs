//! Shared and frozen offset indexes
//!
//! `OffsetIndex::lookup` needs `&mut self` because the first lookup after an
//! out-of-order insert sorts in place. These wrappers cover the two ways of
//! reading from several threads:
//! - `SharedOffsetIndex`: still growing, the sort transition is guarded by a lock
//! - `FrozenOffsetIndex`: done growing, sorted once, read without any lock

use parking_lot::RwLock;

use crate::oid::ObjectId;

use super::{search_sorted, OffsetEntry, OffsetIndex};

/// Offset index behind a `RwLock`
///
/// ## Concurrency:
/// - `add`: exclusive write lock
/// - `lookup` on a sorted index: shared read lock, readers run in parallel
/// - `lookup` on an unsorted index: one write lock to sort, then as above
pub struct SharedOffsetIndex<H = ObjectId> {
    inner: RwLock<OffsetIndex<H>>,
}

impl<H: Copy> SharedOffsetIndex<H> {
    /// Wrap an existing index, sorted or not
    pub fn new(index: OffsetIndex<H>) -> Self {
        Self {
            inner: RwLock::new(index),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self::new(OffsetIndex::with_capacity(capacity))
    }

    /// Record an object under the write lock
    pub fn add(&self, offset: i64, hash: H) {
        self.inner.write().add(offset, hash);
    }

    /// Find the id at `offset`, sorting first if an insert went backwards
    pub fn lookup(&self, offset: i64) -> Option<H> {
        {
            let index = self.inner.read();
            if index.is_sorted() {
                return index.search(offset);
            }
        }

        // Another writer may have sorted in between; lookup re-checks the flag
        self.inner.write().lookup(offset)
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    pub fn is_sorted(&self) -> bool {
        self.inner.read().is_sorted()
    }

    pub fn sort_count(&self) -> u64 {
        self.inner.read().sort_count()
    }

    /// Take the index back out of the lock
    pub fn into_inner(self) -> OffsetIndex<H> {
        self.inner.into_inner()
    }

    pub fn freeze(self) -> FrozenOffsetIndex<H> {
        self.into_inner().freeze()
    }
}

impl<H: Copy> From<OffsetIndex<H>> for SharedOffsetIndex<H> {
    fn from(index: OffsetIndex<H>) -> Self {
        Self::new(index)
    }
}

impl<H: Copy> Default for SharedOffsetIndex<H> {
    fn default() -> Self {
        Self::new(OffsetIndex::new())
    }
}

/// Immutable, sorted offset index.
///
/// Built by [`OffsetIndex::freeze`]. Lookups take `&self`, so the snapshot can
/// be wrapped in an `Arc` and read from any number of threads.
#[derive(Debug, Clone)]
pub struct FrozenOffsetIndex<H = ObjectId> {
    entries: Box<[OffsetEntry<H>]>,
}

impl<H: Copy> FrozenOffsetIndex<H> {
    pub(crate) fn from_sorted(entries: Vec<OffsetEntry<H>>) -> Self {
        debug_assert!(entries.windows(2).all(|w| w[0].offset <= w[1].offset));
        Self {
            entries: entries.into_boxed_slice(),
        }
    }

    pub fn lookup(&self, offset: i64) -> Option<H> {
        search_sorted(&self.entries, offset)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Records in ascending offset order
    pub fn iter(&self) -> impl Iterator<Item = &OffsetEntry<H>> + '_ {
        self.entries.iter()
    }
}
