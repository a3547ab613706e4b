//! Error types for packofs
//!
//! The offset index itself is infallible. These errors cover the edges
//! around it: object id parsing, listing parsing and I/O.

use thiserror::Error;

/// Result type alias using PackOffsetError
pub type Result<T> = std::result::Result<T, PackOffsetError>;

/// Unified error type for packofs operations
#[derive(Debug, Error)]
pub enum PackOffsetError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Object Id Errors
    // -------------------------------------------------------------------------
    #[error("Invalid hex object id: {0}")]
    InvalidHex(String),

    #[error("Invalid object id length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("Unknown hash algorithm: {0}")]
    UnknownAlgorithm(String),

    // -------------------------------------------------------------------------
    // Listing Errors
    // -------------------------------------------------------------------------
    #[error("Listing error at line {line}: {message}")]
    Listing { line: usize, message: String },
}
