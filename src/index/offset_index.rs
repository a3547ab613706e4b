//! OffsetIndex implementation
//!
//! Append-only record vector with a sorted flag and sort-on-first-lookup.

use std::mem;

use crate::config::Config;
use crate::oid::ObjectId;

use super::{search_sorted, FrozenOffsetIndex, OffsetEntry};

/// Offset → object id index for one pack.
///
/// Records are appended in arrival order. If an insert goes backwards the
/// index is marked unsorted and the next lookup sorts it once. A parser that
/// scans the pack forward never pays for a sort.
///
/// Offsets are expected to be unique. When they are not, the sort is stable
/// and lookups return the record that was added first.
#[derive(Debug, Clone)]
pub struct OffsetIndex<H = ObjectId> {
    entries: Vec<OffsetEntry<H>>,

    /// Invariant: when true, `entries` is non-decreasing by offset
    sorted: bool,

    sort_passes: u64,
    out_of_order_inserts: u64,
}

/// Point-in-time counters for diagnostics and progress output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IndexStats {
    /// Number of records added
    pub entries: usize,

    /// Number of times the records were re-sorted
    pub sort_passes: u64,

    /// Inserts whose offset was below the previous record's
    pub out_of_order_inserts: u64,

    /// Bytes reserved by the record vector
    pub heap_bytes: usize,
}

impl<H: Copy> OffsetIndex<H> {
    /// Create an empty index
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create an empty index with room for about `capacity` records.
    ///
    /// The hint only sizes the first allocation; growing past it is fine.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            sorted: true,
            sort_passes: 0,
            out_of_order_inserts: 0,
        }
    }

    /// Record that the object at `offset` has id `hash`.
    ///
    /// Always succeeds. Costs one comparison on top of a `Vec::push`.
    pub fn add(&mut self, offset: i64, hash: H) {
        if let Some(last) = self.entries.last() {
            if offset < last.offset {
                self.sorted = false;
                self.out_of_order_inserts += 1;
            }
        }
        self.entries.push(OffsetEntry { offset, hash });
    }

    /// Find the id of the object at exactly `offset`.
    ///
    /// O(log n) when the records are in order. The first call after an
    /// out-of-order insert sorts them first, which is O(n log n).
    pub fn lookup(&mut self, offset: i64) -> Option<H> {
        if self.entries.is_empty() {
            return None;
        }
        self.ensure_sorted();
        self.search(offset)
    }

    /// Like [`lookup`](Self::lookup), returning `missing` when not found
    pub fn lookup_or(&mut self, offset: i64, missing: H) -> H {
        self.lookup(offset).unwrap_or(missing)
    }

    /// Sort the records now instead of on the next lookup
    pub fn ensure_sorted(&mut self) {
        if self.sorted {
            return;
        }

        tracing::debug!(
            entries = self.entries.len(),
            out_of_order = self.out_of_order_inserts,
            "Sorting offset index"
        );

        // Stable, so earlier inserts stay ahead of later ones at equal offsets
        self.entries.sort_by_key(|entry| entry.offset);
        self.sorted = true;
        self.sort_passes += 1;
    }

    /// Search without sorting. Only valid while `sorted` holds.
    pub(crate) fn search(&self, offset: i64) -> Option<H> {
        debug_assert!(self.sorted, "search on unsorted offset index");
        search_sorted(&self.entries, offset)
    }

    /// Sort once and turn into an immutable, shareable snapshot
    pub fn freeze(mut self) -> FrozenOffsetIndex<H> {
        self.ensure_sorted();
        FrozenOffsetIndex::from_sorted(self.entries)
    }

    /// Number of records added, duplicates included
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether the records are currently in offset order
    pub fn is_sorted(&self) -> bool {
        self.sorted
    }

    /// How many sort passes lookups have triggered so far
    pub fn sort_count(&self) -> u64 {
        self.sort_passes
    }

    /// Number of records the index can hold without reallocating
    pub fn capacity(&self) -> usize {
        self.entries.capacity()
    }

    /// Reserve room for at least `additional` more records
    pub fn reserve(&mut self, additional: usize) {
        self.entries.reserve(additional);
    }

    pub fn stats(&self) -> IndexStats {
        IndexStats {
            entries: self.entries.len(),
            sort_passes: self.sort_passes,
            out_of_order_inserts: self.out_of_order_inserts,
            heap_bytes: self.entries.capacity() * mem::size_of::<OffsetEntry<H>>(),
        }
    }
}

impl OffsetIndex<ObjectId> {
    /// Create an empty index sized from `config`
    pub fn from_config(config: &Config) -> Self {
        Self::with_capacity(config.capacity_hint)
    }
}

impl<H: Copy> Default for OffsetIndex<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: Copy> Extend<(i64, H)> for OffsetIndex<H> {
    fn extend<I: IntoIterator<Item = (i64, H)>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.entries.reserve(iter.size_hint().0);
        for (offset, hash) in iter {
            self.add(offset, hash);
        }
    }
}

impl<H: Copy> FromIterator<(i64, H)> for OffsetIndex<H> {
    fn from_iter<I: IntoIterator<Item = (i64, H)>>(iter: I) -> Self {
        let mut index = Self::new();
        index.extend(iter);
        index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_order_counter() {
        let mut index: OffsetIndex<u32> = [(10, 1), (5, 2), (7, 3), (20, 4)].into_iter().collect();

        // 5 < 10 counts; 7 > 5 does not
        assert_eq!(index.stats().out_of_order_inserts, 1);
        assert!(!index.sorted);

        index.ensure_sorted();
        let offsets: Vec<i64> = index.entries.iter().map(|e| e.offset).collect();
        assert_eq!(offsets, vec![5, 7, 10, 20]);
    }

    #[test]
    fn test_stats_heap_bytes_tracks_capacity() {
        let index: OffsetIndex<u64> = OffsetIndex::with_capacity(16);
        let stats = index.stats();
        assert_eq!(stats.entries, 0);
        assert_eq!(
            stats.heap_bytes,
            index.capacity() * mem::size_of::<OffsetEntry<u64>>()
        );
    }
}
