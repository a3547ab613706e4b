//! Object Identifiers
//!
//! Fixed-width content hashes as produced by the object-identification
//! scheme of a packfile. The index never interprets them; this module only
//! provides construction, the zero sentinel, and hex conversion.

use std::fmt;
use std::str::FromStr;

use crate::error::{PackOffsetError, Result};

/// Widest digest we can store inline (SHA-256)
pub const MAX_OID_LEN: usize = 32;

/// Hash algorithm that determines the width of an object id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum HashAlgorithm {
    /// 20-byte SHA-1 digests
    #[default]
    Sha1,

    /// 32-byte SHA-256 digests
    Sha256,
}

impl HashAlgorithm {
    /// Digest length in bytes
    pub const fn byte_len(self) -> usize {
        match self {
            HashAlgorithm::Sha1 => 20,
            HashAlgorithm::Sha256 => 32,
        }
    }

    /// Digest length in hex characters
    pub const fn hex_len(self) -> usize {
        self.byte_len() * 2
    }

    /// Canonical lowercase name
    pub const fn name(self) -> &'static str {
        match self {
            HashAlgorithm::Sha1 => "sha1",
            HashAlgorithm::Sha256 => "sha256",
        }
    }

    fn from_hex_len(len: usize) -> Option<Self> {
        match len {
            40 => Some(HashAlgorithm::Sha1),
            64 => Some(HashAlgorithm::Sha256),
            _ => None,
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HashAlgorithm {
    type Err = PackOffsetError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "sha1" | "sha-1" => Ok(HashAlgorithm::Sha1),
            "sha256" | "sha-256" => Ok(HashAlgorithm::Sha256),
            _ => Err(PackOffsetError::UnknownAlgorithm(s.to_string())),
        }
    }
}

/// A content hash identifying one object.
///
/// Digests are stored inline so the type is `Copy` and an index record stays
/// a fixed-size value with no heap indirection. Bytes past the algorithm's
/// width are always zero, which keeps derived equality and ordering exact.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId {
    algorithm: HashAlgorithm,
    bytes: [u8; MAX_OID_LEN],
}

impl ObjectId {
    /// The all-zero id for `algorithm`, used as the "not found" sentinel
    pub const fn null(algorithm: HashAlgorithm) -> Self {
        Self {
            algorithm,
            bytes: [0u8; MAX_OID_LEN],
        }
    }

    /// Build an id from raw digest bytes
    pub fn from_bytes(algorithm: HashAlgorithm, bytes: &[u8]) -> Result<Self> {
        if bytes.len() != algorithm.byte_len() {
            return Err(PackOffsetError::InvalidLength {
                expected: algorithm.byte_len(),
                actual: bytes.len(),
            });
        }
        let mut id = Self::null(algorithm);
        id.bytes[..bytes.len()].copy_from_slice(bytes);
        Ok(id)
    }

    /// Parse a hex id, inferring the algorithm from its length (40 or 64)
    pub fn from_hex(hex: &str) -> Result<Self> {
        let algorithm = HashAlgorithm::from_hex_len(hex.len())
            .ok_or_else(|| PackOffsetError::InvalidHex(hex.to_string()))?;
        Self::from_hex_with(algorithm, hex)
    }

    /// Parse a hex id that must be of the given algorithm
    pub fn from_hex_with(algorithm: HashAlgorithm, hex: &str) -> Result<Self> {
        if hex.len() != algorithm.hex_len() {
            return Err(PackOffsetError::InvalidLength {
                expected: algorithm.byte_len(),
                actual: hex.len() / 2,
            });
        }

        let mut id = Self::null(algorithm);
        hex::decode_to_slice(hex, &mut id.bytes[..algorithm.byte_len()])
            .map_err(|_| PackOffsetError::InvalidHex(hex.to_string()))?;
        Ok(id)
    }

    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    /// Digest bytes, exactly `algorithm().byte_len()` long
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.algorithm.byte_len()]
    }

    /// True for the zero sentinel
    pub fn is_null(&self) -> bool {
        self.bytes.iter().all(|&b| b == 0)
    }

    /// Lowercase hex encoding
    pub fn to_hex(&self) -> String {
        hex::encode(self.as_bytes())
    }
}

impl Default for ObjectId {
    fn default() -> Self {
        Self::null(HashAlgorithm::default())
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectId({}:{})", self.algorithm, self)
    }
}

impl FromStr for ObjectId {
    type Err = PackOffsetError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}
