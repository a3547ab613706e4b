//! Listing Tests
//!
//! Tests verify:
//! - Parsing of base and delta object lines
//! - Summary lines are skipped, not rejected
//! - Malformed object lines report their line number
//! - Loading from a reader and from a file

use std::io::{Cursor, Write};

use packofs::listing::{self, ObjectKind};
use packofs::{Config, HashAlgorithm, ObjectId, PackOffsetError};
use tempfile::NamedTempFile;

// =============================================================================
// Helper Functions
// =============================================================================

const BLOB: &str = "e69de29bb2d1d6434b8b29ae775ad8c2e48c5391";
const TREE: &str = "4b825dc642cb6eb9a060e54bf8d69288fbee4904";
const COMMIT: &str = "3b18e512dba79e4c8300dd08aeb37f8e728b8dad";

fn sample_listing() -> String {
    format!(
        "{COMMIT} commit 215 148 12\n\
         {TREE} tree   0 9 160\n\
         {BLOB} blob   12 21 169 1 {TREE}\n\
         non delta: 2 objects\n\
         chain length = 1: 1 object\n\
         pack-1234.pack: ok\n"
    )
}

fn id(hex: &str) -> ObjectId {
    ObjectId::from_hex(hex).unwrap()
}

// =============================================================================
// parse_line Tests
// =============================================================================

#[test]
fn test_parse_base_object_line() {
    let line = format!("{COMMIT} commit 215 148 12");
    let entry = listing::parse_line(1, &line, HashAlgorithm::Sha1)
        .unwrap()
        .unwrap();

    assert_eq!(entry.id, id(COMMIT));
    assert_eq!(entry.kind, ObjectKind::Commit);
    assert_eq!(entry.size, 215);
    assert_eq!(entry.packed_size, 148);
    assert_eq!(entry.offset, 12);
    assert!(entry.delta.is_none());
}

#[test]
fn test_parse_delta_object_line() {
    let line = format!("{BLOB} blob   12 21 169 1 {TREE}");
    let entry = listing::parse_line(1, &line, HashAlgorithm::Sha1)
        .unwrap()
        .unwrap();

    let delta = entry.delta.unwrap();
    assert_eq!(delta.depth, 1);
    assert_eq!(delta.base, id(TREE));
    assert_eq!(entry.offset, 169);
}

#[test]
fn test_parse_skips_summary_lines() {
    for line in [
        "",
        "   ",
        "non delta: 2 objects",
        "chain length = 1: 1 object",
        "pack-1234.pack: ok",
    ] {
        assert_eq!(listing::parse_line(1, line, HashAlgorithm::Sha1).unwrap(), None);
    }
}

#[test]
fn test_parse_skips_unknown_type_column() {
    let line = format!("{BLOB} ofs-delta 12 21 169");
    assert_eq!(listing::parse_line(1, &line, HashAlgorithm::Sha1).unwrap(), None);
}

#[test]
fn test_parse_rejects_bad_offset() {
    let line = format!("{BLOB} blob 12 21 notanumber");
    let err = listing::parse_line(7, &line, HashAlgorithm::Sha1).unwrap_err();
    assert!(matches!(err, PackOffsetError::Listing { line: 7, .. }));
}

#[test]
fn test_parse_rejects_missing_columns() {
    let line = format!("{BLOB} blob 12");
    let err = listing::parse_line(3, &line, HashAlgorithm::Sha1).unwrap_err();
    assert!(matches!(err, PackOffsetError::Listing { line: 3, .. }));
}

#[test]
fn test_parse_rejects_missing_base_id() {
    let line = format!("{BLOB} blob 12 21 169 1");
    assert!(listing::parse_line(1, &line, HashAlgorithm::Sha1).is_err());
}

#[test]
fn test_parse_skips_other_algorithm_width() {
    let line = format!("{BLOB} blob 12 21 169");
    assert_eq!(listing::parse_line(2, &line, HashAlgorithm::Sha256).unwrap(), None);
}

#[test]
fn test_parse_sha256_line() {
    let sha256 = "473a0f4c3be8a93681a267e3b1e9a7dcda1185436fe141f7749120a303721813";
    let line = format!("{sha256} blob 0 9 12");
    let entry = listing::parse_line(1, &line, HashAlgorithm::Sha256)
        .unwrap()
        .unwrap();
    assert_eq!(entry.id, id(sha256));
    assert_eq!(listing::parse_line(1, &line, HashAlgorithm::Sha1).unwrap(), None);
}

// =============================================================================
// load_listing Tests
// =============================================================================

#[test]
fn test_load_listing_builds_index() {
    let config = Config::default();
    let (mut index, summary) =
        listing::load_listing(Cursor::new(sample_listing()), &config).unwrap();

    assert_eq!(summary.objects, 3);
    assert_eq!(summary.deltas, 1);
    assert_eq!(summary.skipped_lines, 3);

    assert_eq!(index.len(), 3);
    assert!(index.is_sorted());
    assert_eq!(index.lookup(12), Some(id(COMMIT)));
    assert_eq!(index.lookup(160), Some(id(TREE)));
    assert_eq!(index.lookup(169), Some(id(BLOB)));
    assert_eq!(index.lookup(13), None);
    assert_eq!(index.sort_count(), 0);
}

#[test]
fn test_load_listing_out_of_order() {
    let text = format!("{BLOB} blob 12 21 300\n{TREE} tree 0 9 12\n");
    let (mut index, _) = listing::load_listing(Cursor::new(text), &Config::default()).unwrap();

    assert!(!index.is_sorted());
    assert_eq!(index.lookup(12), Some(id(TREE)));
    assert_eq!(index.lookup(300), Some(id(BLOB)));
}

#[test]
fn test_load_listing_with_other_algorithm_skips_everything() {
    let config = Config::builder()
        .hash_algorithm(HashAlgorithm::Sha256)
        .build();
    let (index, summary) = listing::load_listing(Cursor::new(sample_listing()), &config).unwrap();

    assert_eq!(summary.objects, 0);
    assert_eq!(summary.skipped_lines, 6);
    assert!(index.is_empty());
}

#[test]
fn test_load_listing_reports_line_number() {
    let text = format!("non delta: 1 object\n{BLOB} blob 12 21 -\n");
    let err = listing::load_listing(Cursor::new(text), &Config::default()).unwrap_err();
    assert!(matches!(err, PackOffsetError::Listing { line: 2, .. }));
}

#[test]
fn test_load_listing_file() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(sample_listing().as_bytes()).unwrap();
    file.flush().unwrap();

    let config = Config::builder().capacity_hint(8).build();
    let (mut index, summary) = listing::load_listing_file(file.path(), &config).unwrap();

    assert_eq!(summary.objects, 3);
    assert!(index.capacity() >= 8);
    assert_eq!(index.lookup(160), Some(id(TREE)));
}

#[test]
fn test_load_listing_file_missing() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("missing.txt");
    let err = listing::load_listing_file(&path, &Config::default()).unwrap_err();
    assert!(matches!(err, PackOffsetError::Io(_)));
}
