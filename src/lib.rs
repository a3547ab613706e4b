//! # packofs
//!
//! A compact index from packfile byte offsets to object ids, for
//! pipelines that process packs with tens of millions of objects:
//! - Flat vector of fixed-size records instead of a hash map
//! - O(1) append while a parser scans the pack forward
//! - Lazy sort on the first lookup after an out-of-order insert
//! - Binary-search lookups by exact offset
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │            Pack parser / `verify-pack -v` listing            │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ add(offset, id)
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                      OffsetIndex                             │
//! │            (Vec<OffsetEntry> + sorted flag)                  │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌──────────────────┐     ┌──────────────────┐
//!   │ SharedOffsetIndex│     │ FrozenOffsetIndex│
//!   │    (RwLock)      │     │   (read-only)    │
//!   └──────────────────┘     └──────────────────┘
//! ```
//!
//! The index does no I/O and no hashing. It stores what the caller hands it.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod oid;
pub mod index;
pub mod listing;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{PackOffsetError, Result};
pub use config::Config;
pub use index::{FrozenOffsetIndex, IndexStats, OffsetEntry, OffsetIndex, SharedOffsetIndex};
pub use oid::{HashAlgorithm, ObjectId};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of packofs
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
