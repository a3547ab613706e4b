//! Pack Listing Loader
//!
//! Feeds an [`OffsetIndex`] from the object listing printed by
//! `git verify-pack -v`, so an index can be built and queried without a
//! packfile parser.
//!
//! ## Line Format
//! ```text
//! <id> <type> <size> <size-in-pack> <offset>                   (base object)
//! <id> <type> <size> <size-in-pack> <offset> <depth> <base-id> (delta object)
//! non delta: 3 objects                                         (skipped)
//! chain length = 1: 2 objects                                  (skipped)
//! pack-1234.pack: ok                                           (skipped)
//! ```

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::config::Config;
use crate::error::{PackOffsetError, Result};
use crate::index::OffsetIndex;
use crate::oid::{HashAlgorithm, ObjectId};

/// Object type column of a listing line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    Commit,
    Tree,
    Blob,
    Tag,
}

impl ObjectKind {
    fn parse(token: &str) -> Option<Self> {
        match token {
            "commit" => Some(ObjectKind::Commit),
            "tree" => Some(ObjectKind::Tree),
            "blob" => Some(ObjectKind::Blob),
            "tag" => Some(ObjectKind::Tag),
            _ => None,
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ObjectKind::Commit => "commit",
            ObjectKind::Tree => "tree",
            ObjectKind::Blob => "blob",
            ObjectKind::Tag => "tag",
        };
        f.write_str(name)
    }
}

/// Delta chain information for a deltified object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeltaBase {
    pub depth: u32,
    pub base: ObjectId,
}

/// One object line of a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListingEntry {
    pub id: ObjectId,
    pub kind: ObjectKind,
    /// Inflated object size
    pub size: u64,
    /// Bytes the object occupies in the pack
    pub packed_size: u64,
    pub offset: i64,
    pub delta: Option<DeltaBase>,
}

/// Counters collected while loading a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ListingSummary {
    pub objects: usize,
    pub deltas: usize,
    pub skipped_lines: usize,
}

/// Parse one listing line.
///
/// Returns `Ok(None)` for summary and blank lines, and for lines whose id is
/// not `algorithm`-wide. An object line with a bad column is an error tagged
/// with `line_number`.
pub fn parse_line(
    line_number: usize,
    line: &str,
    algorithm: HashAlgorithm,
) -> Result<Option<ListingEntry>> {
    let mut fields = line.split_whitespace();

    let (id_token, kind) = match (fields.next(), fields.next()) {
        (Some(id), Some(kind)) if looks_like_oid(id, algorithm) => match ObjectKind::parse(kind) {
            Some(kind) => (id, kind),
            None => return Ok(None),
        },
        _ => return Ok(None),
    };

    let err = |message: String| PackOffsetError::Listing {
        line: line_number,
        message,
    };

    let id = ObjectId::from_hex_with(algorithm, id_token)
        .map_err(|e| err(format!("object id {}: {}", id_token, e)))?;

    let size = parse_column::<u64>(fields.next(), "size").map_err(err)?;
    let packed_size = parse_column::<u64>(fields.next(), "size-in-pack").map_err(err)?;
    let offset = parse_column::<i64>(fields.next(), "offset").map_err(err)?;

    let delta = match fields.next() {
        None => None,
        Some(depth) => {
            let depth = parse_column::<u32>(Some(depth), "depth").map_err(err)?;
            let base_token = fields
                .next()
                .ok_or_else(|| err("missing base object id".to_string()))?;
            let base = ObjectId::from_hex_with(algorithm, base_token)
                .map_err(|e| err(format!("base id {}: {}", base_token, e)))?;
            Some(DeltaBase { depth, base })
        }
    };

    if let Some(extra) = fields.next() {
        return Err(err(format!("unexpected trailing column {:?}", extra)));
    }

    Ok(Some(ListingEntry {
        id,
        kind,
        size,
        packed_size,
        offset,
        delta,
    }))
}

/// Build an index from a listing stream
pub fn load_listing<R: BufRead>(
    reader: R,
    config: &Config,
) -> Result<(OffsetIndex, ListingSummary)> {
    let mut index = OffsetIndex::from_config(config);
    let mut summary = ListingSummary::default();

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        match parse_line(i + 1, &line, config.hash_algorithm)? {
            Some(entry) => {
                index.add(entry.offset, entry.id);
                summary.objects += 1;
                if entry.delta.is_some() {
                    summary.deltas += 1;
                }
            }
            None => {
                tracing::trace!(line = i + 1, "Skipping non-object listing line");
                summary.skipped_lines += 1;
            }
        }
    }

    tracing::debug!(
        objects = summary.objects,
        deltas = summary.deltas,
        skipped = summary.skipped_lines,
        sorted = index.is_sorted(),
        "Loaded pack listing"
    );

    Ok((index, summary))
}

/// Build an index from a listing file on disk
pub fn load_listing_file(path: &Path, config: &Config) -> Result<(OffsetIndex, ListingSummary)> {
    let file = File::open(path)?;
    load_listing(BufReader::new(file), config)
}

fn looks_like_oid(token: &str, algorithm: HashAlgorithm) -> bool {
    token.len() == algorithm.hex_len() && token.bytes().all(|b| b.is_ascii_hexdigit())
}

fn parse_column<T: std::str::FromStr>(
    token: Option<&str>,
    name: &str,
) -> std::result::Result<T, String> {
    let token = token.ok_or_else(|| format!("missing {} column", name))?;
    token
        .parse()
        .map_err(|_| format!("invalid {} column {:?}", name, token))
}
