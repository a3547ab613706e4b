//! Offset Index Module
//!
//! Maps packfile byte offsets to the id of the object stored there.
//!
//! ## Responsibilities
//! - Append records cheaply while a parser scans a pack front to back
//! - Answer exact-offset lookups with a binary search
//! - Repair ordering lazily, only when a lookup needs it
//! - Hand out a shareable read-only snapshot once building is done
//!
//! ## Data Structure Choice
//! A flat `Vec` of fixed-size records instead of a `HashMap<i64, ObjectId>`:
//! - No bucket metadata or load-factor slack per entry
//! - Offsets usually arrive ascending, so the vector is already sorted
//! - A single comparison per insert tracks whether that still holds
//!
//! ## Memory
//! ```text
//! ┌───────────────────────────────────────────────┐
//! │ OffsetEntry<ObjectId>                         │
//! │ ┌────────────┬──────────┬───────────────────┐ │
//! │ │ offset (8) │ algo (1) │ digest (32)       │ │
//! │ └────────────┴──────────┴───────────────────┘ │
//! │ 48 bytes with alignment, so 10M objects fit   │
//! │ in roughly 480 MB of a single allocation      │
//! └───────────────────────────────────────────────┘
//! ```

mod offset_index;
mod shared;

pub use offset_index::{IndexStats, OffsetIndex};
pub use shared::{FrozenOffsetIndex, SharedOffsetIndex};

/// One offset → id record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OffsetEntry<H> {
    /// Byte position of the object header inside the pack
    pub offset: i64,

    /// Id of the object stored at `offset`
    pub hash: H,
}

/// Binary search over records sorted by offset.
///
/// Returns the first record at `offset`, so among duplicates the one that
/// sorts earliest wins.
pub(crate) fn search_sorted<H: Copy>(entries: &[OffsetEntry<H>], offset: i64) -> Option<H> {
    let pos = entries.partition_point(|entry| entry.offset < offset);
    match entries.get(pos) {
        Some(entry) if entry.offset == offset => Some(entry.hash),
        _ => None,
    }
}
