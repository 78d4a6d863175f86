//! # Domain Errors
//!
//! "No data" failures (`OutOfWindow`, `NoSnapshotAnchor`, `BlockNotFound`)
//! are kept apart from "forged data" failures (`ChainMismatch`,
//! `MalformedHeader`, `ConflictingHash`).

use nr_01_header_codec::HeaderCodecError;
use thiserror::Error;

/// Blockhash registry error types.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BlockhashError {
    /// Block is not in the directly readable window.
    #[error("Block {number} outside direct window (current {current})")]
    OutOfWindow {
        /// Requested block number
        number: u64,
        /// Number of the block being built
        current: u64,
    },

    /// No stored hash to anchor a reconstruction.
    #[error("No stored hash for anchor block {0}")]
    NoSnapshotAnchor(u64),

    /// A header does not chain to the expected hash.
    #[error("Header chain broken at index {index}")]
    ChainMismatch {
        /// Position in the supplied header list
        index: usize,
    },

    /// A header could not be decoded.
    #[error("Malformed header at index {index}: {source}")]
    MalformedHeader {
        /// Position in the supplied header list
        index: usize,
        /// Codec failure
        #[source]
        source: HeaderCodecError,
    },

    /// A different non-zero hash is already stored for this number.
    #[error("Conflicting hash already stored for block {0}")]
    ConflictingHash(u64),

    /// Block source has no block with this number.
    #[error("Block {0} not found")]
    BlockNotFound(u64),

    /// Reconstruction would reach below block zero.
    #[error("Chain of {len} headers from block {start} reaches below genesis")]
    NumberOutOfRange {
        /// Anchor block number
        start: u64,
        /// Number of headers supplied
        len: usize,
    },

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
